pub use criterion::Criterion;

pub use nalgebra::vector;
pub use raymarch_lib::{
    render::{RenderConfiguration, RenderingMode},
    test_helpers, Volume, VolumeRenderer,
};

pub const RESOLUTION: (usize, usize) = (256, 256);
pub const VOLUME_SIDE: usize = 128;

/// Viewport rotations cycled through by every benchmark
pub const ROTATIONS: [(f32, f32); 3] = [(0.0, 0.0), (0.4, 0.7), (-0.3, 2.1)];

pub fn get_volume() -> Volume {
    test_helpers::wireframe_volume(VOLUME_SIDE)
}

/// Benchmark frames rendered by `config` on the wireframe cube
pub fn bench_config(c: &mut Criterion, bench_name: &str, config: RenderConfiguration) {
    let mut renderer = VolumeRenderer::new(get_volume());
    renderer.set_resolution(RESOLUTION).unwrap();
    renderer.set_config(config);

    let mut buffer = vec![0; renderer.buffer_len()];
    let mut rotation = ROTATIONS.iter().cycle();

    c.bench_function(bench_name, |b| {
        b.iter(|| {
            let &(x, y) = rotation.next().unwrap();
            renderer.viewport_mut().rotate(vector![x, y]);
            renderer.render_to_buffer(&mut buffer).unwrap();
        })
    });
}
