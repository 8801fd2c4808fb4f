use log::info;
use nalgebra::{point, Point3, Vector3};
use rayon::prelude::*;

use crate::{common::BoundBox, error::VolumeError};

use super::gradient::{compute_gradient_magnitudes, GradientField};

/// Dense grid of scalar values, axis aligned, lowest corner in origin
///
/// Positions are in model space, one unit per grid cell.
/// Samples outside of the grid are zero.
pub trait ScalarField {
    /// Dimensions of the grid
    fn get_size(&self) -> Vector3<usize>;

    /// Stored value, `None` if any index is out of range
    fn get_data(&self, x: usize, y: usize, z: usize) -> Option<f32>;

    /// Value of the grid cell closest to `pos`
    fn sample_nearest(&self, pos: Point3<f32>) -> f32 {
        let x = f32::floor(pos.x + 0.5);
        let y = f32::floor(pos.y + 0.5);
        let z = f32::floor(pos.z + 0.5);

        // Negated to also catch NaN
        if !(x >= 0.0 && y >= 0.0 && z >= 0.0) {
            return 0.0;
        }

        self.get_data(x as usize, y as usize, z as usize)
            .unwrap_or(0.0)
    }

    /// Trilinear interpolation of the 8 cells around `pos`
    ///
    /// Corners are fetched with [`sample_nearest`](ScalarField::sample_nearest),
    /// corners outside of the grid count as zero.
    fn sample_trilinear(&self, pos: Point3<f32>) -> f32 {
        let low = pos.map(f32::floor);
        let high = pos.map(f32::ceil);

        let xd = pos.x - low.x;
        let yd = pos.y - low.y;
        let zd = pos.z - low.z;

        let c000 = self.sample_nearest(point![low.x, low.y, low.z]);
        let c001 = self.sample_nearest(point![low.x, low.y, high.z]);
        let c010 = self.sample_nearest(point![low.x, high.y, low.z]);
        let c011 = self.sample_nearest(point![low.x, high.y, high.z]);
        let c100 = self.sample_nearest(point![high.x, low.y, low.z]);
        let c101 = self.sample_nearest(point![high.x, low.y, high.z]);
        let c110 = self.sample_nearest(point![high.x, high.y, low.z]);
        let c111 = self.sample_nearest(point![high.x, high.y, high.z]);

        // x axis
        let c00 = c000 * (1.0 - xd) + c100 * xd;
        let c01 = c001 * (1.0 - xd) + c101 * xd;
        let c10 = c010 * (1.0 - xd) + c110 * xd;
        let c11 = c011 * (1.0 - xd) + c111 * xd;

        // y axis
        let c0 = c00 * (1.0 - yd) + c10 * yd;
        let c1 = c01 * (1.0 - yd) + c11 * yd;

        // z axis
        c0 * (1.0 - zd) + c1 * zd
    }
}

/// Index into x-fastest linear storage
pub(super) fn linear_index(size: &Vector3<usize>, x: usize, y: usize, z: usize) -> Option<usize> {
    if x < size.x && y < size.y && z < size.z {
        Some(x + y * size.x + z * size.x * size.y)
    } else {
        None
    }
}

/// Scalar volume with intensities in range <0;1>
///
/// Gradient magnitudes are derived from intensities once, by [`Volume::compute_gradients`].
pub struct Volume {
    size: Vector3<usize>,
    data: Vec<f32>,
    gradients: Option<Vec<f32>>,
}

impl std::fmt::Debug for Volume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Volume")
            .field("size", &self.size)
            .field("data len", &self.data.len())
            .field("gradients", &self.gradients.is_some())
            .finish()
    }
}

impl Volume {
    /// Construct volume from samples laid out x-fastest, then y, then z
    pub fn new(size: Vector3<usize>, data: Vec<f32>) -> Result<Volume, VolumeError> {
        if size.iter().any(|&dim| dim == 0) {
            return Err(VolumeError::EmptyDimensions);
        }

        let expected = size.x * size.y * size.z;
        if data.len() < expected {
            return Err(VolumeError::Truncated {
                expected,
                actual: data.len(),
            });
        }

        let mut data = data;
        data.truncate(expected);

        Ok(Volume {
            size,
            data,
            gradients: None,
        })
    }

    /// Construct volume by evaluating `f(x, y, z)` for every cell
    pub fn from_fn<F>(size: Vector3<usize>, f: F) -> Result<Volume, VolumeError>
    where
        F: Fn(usize, usize, usize) -> f32 + Sync,
    {
        if size.iter().any(|&dim| dim == 0) {
            return Err(VolumeError::EmptyDimensions);
        }

        let slice_len = size.x * size.y;
        let mut data = vec![0.0; slice_len * size.z];

        data.par_chunks_mut(slice_len)
            .enumerate()
            .for_each(|(z, slice)| {
                for y in 0..size.y {
                    for x in 0..size.x {
                        slice[x + y * size.x] = f(x, y, z);
                    }
                }
            });

        Volume::new(size, data)
    }

    /// Largest of the three dimensions
    ///
    /// Scale between normalized space and model space, same for all axes
    pub fn size_of_largest_dimension(&self) -> f32 {
        self.size.x.max(self.size.y).max(self.size.z) as f32
    }

    /// Center of the bounding box, in model space
    pub fn center(&self) -> Point3<f32> {
        self.get_bound_box().center()
    }

    pub fn get_bound_box(&self) -> BoundBox {
        BoundBox::from_dims(self.size.map(|v| v as f32))
    }

    /// Smallest and largest intensity
    pub fn intensity_range(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(low, high), &v| {
                (f32::min(low, v), f32::max(high, v))
            })
    }

    /// Compute gradient magnitude of every cell by central differences
    ///
    /// Must be called after data is populated and before gradients are sampled.
    pub fn compute_gradients(&mut self) {
        let magnitudes = compute_gradient_magnitudes(self);
        info!("Gradients computed for volume {:?}", self.size);
        self.gradients = Some(magnitudes);
    }

    pub fn has_gradients(&self) -> bool {
        self.gradients.is_some()
    }

    /// View of gradient magnitudes, error if they were not computed yet
    pub fn gradients(&self) -> Result<GradientField<'_>, VolumeError> {
        match &self.gradients {
            Some(data) => Ok(GradientField::new(self.size, data)),
            None => Err(VolumeError::GradientsNotComputed),
        }
    }

    pub fn sample_gradient_nearest(&self, pos: Point3<f32>) -> Result<f32, VolumeError> {
        Ok(self.gradients()?.sample_nearest(pos))
    }

    pub fn sample_gradient_trilinear(&self, pos: Point3<f32>) -> Result<f32, VolumeError> {
        Ok(self.gradients()?.sample_trilinear(pos))
    }
}

impl ScalarField for Volume {
    fn get_size(&self) -> Vector3<usize> {
        self.size
    }

    fn get_data(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        linear_index(&self.size, x, y, z).map(|index| self.data[index])
    }
}
