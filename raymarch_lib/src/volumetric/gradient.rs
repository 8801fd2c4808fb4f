use nalgebra::{vector, Vector3};
use rayon::prelude::*;

use super::volume::{linear_index, ScalarField};

/// Borrowed view of gradient magnitudes of a volume
///
/// Obtained from [`Volume::gradients`](super::Volume::gradients), sampled the same way as intensities.
#[derive(Debug, Clone, Copy)]
pub struct GradientField<'a> {
    size: Vector3<usize>,
    data: &'a [f32],
}

impl<'a> GradientField<'a> {
    pub(super) fn new(size: Vector3<usize>, data: &'a [f32]) -> Self {
        Self { size, data }
    }
}

impl ScalarField for GradientField<'_> {
    fn get_size(&self) -> Vector3<usize> {
        self.size
    }

    fn get_data(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        linear_index(&self.size, x, y, z).map(|index| self.data[index])
    }
}

// Neighbour outside of the grid reads as zero
fn neighbour<F>(field: &F, x: usize, y: usize, z: usize, offset: Vector3<isize>) -> f32
where
    F: ScalarField + ?Sized,
{
    let nx = x as isize + offset.x;
    let ny = y as isize + offset.y;
    let nz = z as isize + offset.z;
    if nx < 0 || ny < 0 || nz < 0 {
        return 0.0;
    }
    field
        .get_data(nx as usize, ny as usize, nz as usize)
        .unwrap_or(0.0)
}

/// Central difference gradient in cell `(x, y, z)`
pub fn central_difference<F>(field: &F, x: usize, y: usize, z: usize) -> Vector3<f32>
where
    F: ScalarField + ?Sized,
{
    let diff = |offset: Vector3<isize>| {
        neighbour(field, x, y, z, offset) - neighbour(field, x, y, z, -offset)
    };
    vector![
        diff(vector![1, 0, 0]),
        diff(vector![0, 1, 0]),
        diff(vector![0, 0, 1])
    ] / 2.0
}

/// Gradient magnitudes of the whole field, same layout as the field
pub(super) fn compute_gradient_magnitudes<F>(field: &F) -> Vec<f32>
where
    F: ScalarField + Sync,
{
    let size = field.get_size();
    let slice_len = size.x * size.y;
    let mut magnitudes = vec![0.0; slice_len * size.z];

    magnitudes
        .par_chunks_mut(slice_len)
        .enumerate()
        .for_each(|(z, slice)| {
            for y in 0..size.y {
                for x in 0..size.x {
                    slice[x + y * size.x] = central_difference(field, x, y, z).magnitude();
                }
            }
        });

    magnitudes
}
