use crate::common::*;

fn mode_config(mode: RenderingMode) -> RenderConfiguration {
    RenderConfiguration::builder()
        .rendering_mode(mode)
        .build_unchecked()
}

pub fn render_first_hit(c: &mut Criterion) {
    bench_config(c, "first-hit", mode_config(RenderingMode::FirstHit));
}

pub fn render_mip(c: &mut Criterion) {
    bench_config(c, "mip", mode_config(RenderingMode::Mip));
}

pub fn render_average(c: &mut Criterion) {
    bench_config(c, "average", mode_config(RenderingMode::Average));
}

pub fn render_dvr(c: &mut Criterion) {
    bench_config(c, "dvr", mode_config(RenderingMode::Dvr));
}

pub fn render_dvr_gradients(c: &mut Criterion) {
    let config = RenderConfiguration::builder()
        .rendering_mode(RenderingMode::Dvr)
        .gradient_opacity(true)
        .build_unchecked();

    bench_config(c, "dvr gradient opacity", config);
}
