use byteorder::{ByteOrder, LittleEndian};
use nalgebra::Vector3;

pub const HEADER_LEN: usize = 6;

/// Largest sample value, intensity 1.0
pub const SAMPLE_MAX: f32 = 4095.0;

/// Dataset header
/// little-endian, 3x 16bit dimensions (x,y,z)
/// Samples follow, 16bit each, x-fastest, z-slowest
pub fn generate_header(dims: Vector3<usize>) -> Result<[u8; HEADER_LEN], String> {
    let mut header = [0; HEADER_LEN];

    for (i, &dim) in dims.iter().enumerate() {
        let dim = u16::try_from(dim).map_err(|_| format!("Dimension {dim} does not fit 16 bits"))?;
        LittleEndian::write_u16(&mut header[2 * i..2 * i + 2], dim);
    }

    Ok(header)
}

/// Intensity in <0;1> to 12bit sample
pub fn quantize(sample: f32) -> u16 {
    (sample.clamp(0.0, 1.0) * SAMPLE_MAX).round() as u16
}
