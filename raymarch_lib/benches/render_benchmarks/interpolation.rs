use crate::common::*;

pub fn render_trilinear(c: &mut Criterion) {
    let config = RenderConfiguration::builder()
        .rendering_mode(RenderingMode::Dvr)
        .trilinear(true)
        .build_unchecked();

    bench_config(c, "dvr trilinear", config);
}

pub fn render_small_steps(c: &mut Criterion) {
    let config = RenderConfiguration::builder()
        .rendering_mode(RenderingMode::Mip)
        .trilinear(true)
        .step_size(0.25)
        .build_unchecked();

    bench_config(c, "mip trilinear step 0.25", config);
}
