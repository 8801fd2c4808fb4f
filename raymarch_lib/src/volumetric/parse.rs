//! Dataset format
//!
//! Little endian, header of 3x 16bit dimensions (x, y, z), then
//! x*y*z 16bit samples, x-fastest, z-slowest. Samples use 12 bits, <0;4095>.

use std::path::Path;

use log::{debug, info};
use nalgebra::{vector, Vector3};
use nom::{number::complete::le_u16, sequence::tuple, IResult};

use crate::error::VolumeError;

use super::{DataSource, Volume};

/// Largest raw sample, maps to intensity 1.0
pub const RAW_SAMPLE_MAX: f32 = 4095.0;

/// Header length in bytes
pub const HEADER_LEN: usize = 6;

fn dat_header(s: &[u8]) -> IResult<&[u8], (u16, u16, u16)> {
    tuple((le_u16, le_u16, le_u16))(s)
}

/// Read dimensions from header
pub fn parse_header(slice: &[u8]) -> Result<Vector3<usize>, VolumeError> {
    let (_rest, (x, y, z)) =
        dat_header(slice).map_err(|e| VolumeError::Parse(format!("header: {e}")))?;
    Ok(vector![x as usize, y as usize, z as usize])
}

/// Raw sample to intensity
pub fn normalize_sample(raw: u16) -> f32 {
    // Upper bits should be zero, clamp in case they are not
    f32::min(raw as f32 / RAW_SAMPLE_MAX, 1.0)
}

/// Build volume from the whole file contents
///
/// Gradients are not computed.
pub fn parse_dat(slice: &[u8]) -> Result<Volume, VolumeError> {
    let size = parse_header(slice)?;
    let samples = &slice[HEADER_LEN..];

    let expected = size.x * size.y * size.z;
    let actual = samples.len() / 2;
    if actual < expected {
        return Err(VolumeError::Truncated { expected, actual });
    }
    if actual > expected {
        debug!("Ignoring {} trailing samples", actual - expected);
    }

    let data: Vec<f32> = samples
        .chunks_exact(2)
        .take(expected)
        .map(|pair| normalize_sample(u16::from_le_bytes([pair[0], pair[1]])))
        .collect();

    Volume::new(size, data)
}

/// Load volume from dataset file and compute its gradients
pub fn from_file<P>(path: P) -> Result<Volume, VolumeError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let ds = DataSource::from_file(path)?;
    from_data_source(&ds).map(|volume| {
        info!("Loaded {:?} from {:?}", volume, path);
        volume
    })
}

/// Parse volume from bytes and compute its gradients
pub fn from_data_source(ds: &DataSource) -> Result<Volume, VolumeError> {
    let mut volume = parse_dat(ds.get_slice())?;
    let (low, high) = volume.intensity_range();
    info!("Volume intensity range <{low};{high}>");
    volume.compute_gradients();
    Ok(volume)
}
