use nalgebra::Point3;

use crate::volumetric::ScalarField;

/// Voxel sampling strategy, chosen once per frame
///
/// Same strategy samples intensities and gradient magnitudes.
pub trait Interpolation: Copy + Send + Sync {
    fn sample<F>(field: &F, pos: Point3<f32>) -> f32
    where
        F: ScalarField;
}

#[derive(Debug, Clone, Copy)]
pub struct NearestNeighbour;

impl Interpolation for NearestNeighbour {
    #[inline]
    fn sample<F>(field: &F, pos: Point3<f32>) -> f32
    where
        F: ScalarField,
    {
        field.sample_nearest(pos)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Trilinear;

impl Interpolation for Trilinear {
    #[inline]
    fn sample<F>(field: &F, pos: Point3<f32>) -> f32
    where
        F: ScalarField,
    {
        field.sample_trilinear(pos)
    }
}
