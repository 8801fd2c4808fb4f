//! Procedural volumes, for testing without dataset files

use log::info;
use nalgebra::{vector, Vector3};

use crate::error::VolumeError;

use super::Volume;

/// Generates one sample at a time, at any location
pub trait SampleGenerator {
    /// Intensity in <0;1> of cell `coords` in a volume of size `size`
    fn sample_at(&self, size: Vector3<usize>, coords: Vector3<usize>) -> f32;
}

/// Edges of the volume's bounding box
///
/// A cell belongs to an edge when it is within `edge_width` cells of two faces.
#[derive(Debug, Clone, Copy)]
pub struct WireframeCube {
    pub edge_width: usize,
    pub intensity: f32,
}

impl Default for WireframeCube {
    fn default() -> Self {
        Self {
            edge_width: 5,
            intensity: 0.7,
        }
    }
}

impl SampleGenerator for WireframeCube {
    fn sample_at(&self, size: Vector3<usize>, coords: Vector3<usize>) -> f32 {
        let near_faces = coords
            .iter()
            .zip(size.iter())
            .filter(|&(&c, &dim)| c < self.edge_width || c + self.edge_width >= dim)
            .count();

        if near_faces >= 2 {
            self.intensity
        } else {
            0.0
        }
    }
}

/// Whole volume filled with one value
#[derive(Debug, Clone, Copy)]
pub struct Solid {
    pub intensity: f32,
}

impl SampleGenerator for Solid {
    fn sample_at(&self, _size: Vector3<usize>, _coords: Vector3<usize>) -> f32 {
        self.intensity
    }
}

/// Build volume from generator, gradients are computed
pub fn generate<G>(size: Vector3<usize>, generator: &G) -> Result<Volume, VolumeError>
where
    G: SampleGenerator + Sync,
{
    let mut volume = Volume::from_fn(size, |x, y, z| generator.sample_at(size, vector![x, y, z]))?;
    volume.compute_gradients();
    info!("Generated {:?}", volume);
    Ok(volume)
}

/// Wireframe cube of side `side`, edges 5 cells wide with intensity 0.7
pub fn wireframe_cube(side: usize) -> Result<Volume, VolumeError> {
    generate(vector![side, side, side], &WireframeCube::default())
}
