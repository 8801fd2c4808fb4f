use nalgebra::{point, vector};
use raymarch_lib::{
    color::{self, background},
    common::RaySegment,
    render::{
        Average, Compositor, Mip, NearestNeighbour, RayContext, RenderConfiguration,
        RenderingMode,
    },
    test_helpers,
    transfer_function::TfNode,
    volumetric, TransferFunction, Viewport, VolumeRenderer,
};

pub const RESOLUTION: usize = 128;

/// Index into row major frame, `y` counted from the bottom of the image
fn pixel(x: usize, y: usize) -> usize {
    (RESOLUTION - 1 - y) * RESOLUTION + x
}

#[test]
fn wireframe_first_hit() {
    let volume = test_helpers::wireframe_volume(128);
    let mut renderer = VolumeRenderer::new(volume);
    renderer.set_config(
        RenderConfiguration::builder()
            .rendering_mode(RenderingMode::FirstHit)
            .step_size(1.0)
            .build()
            .unwrap(),
    );

    let colors = renderer.render_colors().unwrap();
    assert_eq!(colors.len(), RESOLUTION * RESOLUTION);

    // Center ray passes through the empty core, nothing is hit
    assert_eq!(colors[pixel(64, 64)], color::zero());

    // Ray along an edge parallel to the projection direction
    assert_eq!(colors[pixel(20, 20)], color::mono(0.7));
    assert_eq!(colors[pixel(20, 107)], color::mono(0.7));

    // Viewport is larger than the volume
    assert_eq!(colors[pixel(0, 0)], background::FIRST_HIT);
    assert_eq!(colors[pixel(127, 64)], background::FIRST_HIT);
}

#[test]
fn wireframe_buffer() {
    let volume = test_helpers::wireframe_volume(128);
    let mut renderer = VolumeRenderer::new(volume);
    renderer.set_config(
        RenderConfiguration::builder()
            .rendering_mode(RenderingMode::FirstHit)
            .build()
            .unwrap(),
    );

    let buffer = renderer.render().unwrap();
    let at = |x: usize, y: usize| {
        let i = pixel(x, y) * 3;
        [buffer[i], buffer[i + 1], buffer[i + 2]]
    };

    assert_eq!(at(20, 20), [179, 179, 179]);
    assert_eq!(at(64, 64), [0, 0, 0]);
    assert_eq!(at(0, 0), [0, 0, 64]);
}

#[test]
fn three_node_transfer_function() {
    let tf = TransferFunction::from_nodes(vec![
        TfNode::new(0.0, 0.0, color::zero()),
        TfNode::new(0.5, 0.5, color::new(1.0, 0.0, 0.0)),
        TfNode::new(1.0, 1.0, color::mono(1.0)),
    ])
    .unwrap();

    assert_eq!(tf.opacity_at(0.25).unwrap(), 0.25);
    assert_eq!(tf.compute_opacity(0.25).unwrap(), 0.25);
    assert_eq!(tf.color_at(0.5).unwrap(), color::new(1.0, 0.0, 0.0));
    assert_eq!(tf.compute_color(0.5).unwrap(), color::new(1.0, 0.0, 0.0));
}

#[test]
fn zoom_clamped_to_floor() {
    let mut viewport = Viewport::new();
    viewport.zoom(-0.99);

    assert_eq!(viewport.current_scaling(), 0.01);
    assert!(viewport.current_scaling() > 0.0);
}

#[test]
fn single_voxel_projection() {
    let volume = test_helpers::single_voxel_volume(vector![3, 3, 3], vector![1, 1, 1], 1.0);
    let tf = TransferFunction::new();
    let ctx = RayContext::new(&volume, tf.lookup_tables(), 1.0);
    let direction = vector![0.0, 0.0, 1.0];

    // Samples at z = 0, 1, 2
    let through = RaySegment::new(point![1.0, 1.0, 0.0], point![1.0, 1.0, 3.0], direction);
    let mip = Mip.composite::<NearestNeighbour>(&ctx, &through);
    let average = Average.composite::<NearestNeighbour>(&ctx, &through);

    assert_eq!(mip, color::mono(1.0));
    assert!(average.x < mip.x);
    assert!((average - color::mono(1.0 / 3.0)).magnitude() < 0.01);

    // Only the voxel itself is sampled
    let single = RaySegment::new(point![1.0, 1.0, 1.0], point![1.0, 1.0, 1.5], direction);
    assert_eq!(Mip.composite::<NearestNeighbour>(&ctx, &single), color::mono(1.0));
    assert_eq!(Average.composite::<NearestNeighbour>(&ctx, &single), color::mono(1.0));
}

#[test]
fn single_voxel_rendered() {
    let volume = test_helpers::single_voxel_volume(vector![4, 4, 4], vector![2, 2, 2], 1.0);
    let mut renderer = VolumeRenderer::new(volume);
    renderer.set_resolution((4, 4)).unwrap();

    let mut render_mode = |mode: RenderingMode| {
        renderer.set_config(
            RenderConfiguration::builder()
                .rendering_mode(mode)
                .build()
                .unwrap(),
        );
        renderer.render_colors().unwrap()
    };

    // Row 1 from top, column 2 is the ray through the volume center, samples z = 0..3
    let mip = render_mode(RenderingMode::Mip)[4 + 2];
    let average = render_mode(RenderingMode::Average)[4 + 2];

    assert_eq!(mip, color::mono(1.0));
    assert!(average.x > 0.0 && average.x < mip.x);
}

#[test]
fn load_from_file() {
    let size = vector![4, 3, 2];
    let samples: Vec<u16> = (0..24).map(|i| i * 100).collect();
    let bytes = test_helpers::dat_bytes(size, &samples);

    let path = std::env::temp_dir().join("raymarch_lib_load_from_file.dat");
    std::fs::write(&path, bytes).unwrap();

    let volume = volumetric::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    use volumetric::ScalarField;
    assert_eq!(volume.get_size(), size);
    assert_eq!(volume.get_data(3, 2, 1), Some(2300.0 / 4095.0));
    assert!(volume.has_gradients());
}

#[test]
fn failed_load_keeps_renderer_volume() {
    let renderer = VolumeRenderer::new(test_helpers::wireframe_volume(16));

    let res = volumetric::from_file("definitely/not/here.dat");
    assert!(res.is_err());
    assert_eq!(renderer.volume().size_of_largest_dimension(), 16.0);
    assert!(renderer.render().is_ok());
}
