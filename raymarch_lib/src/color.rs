//! Colors, channels in range <0;1>

use nalgebra::{vector, Vector3};

pub type RGB = Vector3<f32>;

pub fn new(r: f32, g: f32, b: f32) -> RGB {
    vector![r, g, b]
}

pub fn zero() -> RGB {
    vector![0.0, 0.0, 0.0]
}

pub fn mono(v: f32) -> RGB {
    vector![v, v, v]
}

/// Convert one channel to 8 bits
///
/// Clamped before scaling, transfer functions can return values out of range
pub fn channel_to_u8(v: f32) -> u8 {
    // NaN clamps to NaN, cast makes it 0
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub fn to_rgb8(color: &RGB) -> [u8; 3] {
    [
        channel_to_u8(color.x),
        channel_to_u8(color.y),
        channel_to_u8(color.z),
    ]
}

/// Background colors of rays missing the volume, one per rendering mode
pub mod background {
    use super::RGB;
    use nalgebra::vector;

    pub const FIRST_HIT: RGB = vector![0.0, 0.0, 0.25];
    pub const MIP: RGB = vector![0.0, 0.25, 0.0];
    pub const AVERAGE: RGB = vector![0.25, 0.0, 0.0];
    pub const DVR: RGB = vector![0.25, 0.25, 0.0];
}
