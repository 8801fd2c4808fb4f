use std::ops::RangeBounds;

use nalgebra::{vector, Vector3};
use raymarch_lib::volumetric::generators::SampleGenerator;

/// Intensity of individual shapes differs by up to this much
const SAMPLE_VARIANCE: f32 = 0.05;

/// Generate volume with a number of randomly placed shapes
///
/// Shapes placed earlier win where they overlap.
#[derive(Debug)]
pub struct ShapesGenerator {
    shapes: Vec<ShapeInfo>,
}

impl ShapesGenerator {
    pub fn new(
        dims: Vector3<usize>,
        n_of_shapes: usize,
        sample: f32,
        obj_size: usize,
        seed: Option<u64>,
    ) -> ShapesGenerator {
        let size = vector![obj_size, obj_size, obj_size];
        let size_variance = size / 10;

        let random_shape_gen = ShapeInfoGenerator::new(dims, size, size_variance, sample, seed);
        let shapes = random_shape_gen.get_shapes(n_of_shapes);
        ShapesGenerator { shapes }
    }

    pub fn shapes(&self) -> &[ShapeInfo] {
        &self.shapes
    }
}

impl SampleGenerator for ShapesGenerator {
    fn sample_at(&self, _size: Vector3<usize>, coords: Vector3<usize>) -> f32 {
        self.shapes
            .iter()
            .find(|shape| shape.contains(coords))
            .map(|shape| shape.render_at(coords - shape.position_low))
            .unwrap_or(0.0)
    }
}

// # of enum ShapeType variants
const N_OF_SHAPE_KINDS: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Cuboid,
    Sphere,
}

/// One shape in volume, bounds inclusive
#[derive(Debug, Clone)]
pub struct ShapeInfo {
    pub position_low: Vector3<usize>,
    pub position_high: Vector3<usize>,
    pub shape_type: ShapeType,
    pub sample: f32,
}

impl ShapeInfo {
    fn contains(&self, coords: Vector3<usize>) -> bool {
        (0..3).all(|i| coords[i] >= self.position_low[i] && coords[i] <= self.position_high[i])
    }

    fn render_at(&self, offset: Vector3<usize>) -> f32 {
        match self.shape_type {
            ShapeType::Cuboid => self.sample,
            ShapeType::Sphere => self.render_sphere(offset),
        }
    }

    fn render_sphere(&self, offset: Vector3<usize>) -> f32 {
        let extent = (self.position_high - self.position_low).cast::<f32>();
        let center = extent / 2.0;
        let r = extent.x / 2.0;

        if (offset.cast::<f32>() - center).magnitude() <= r {
            self.sample
        } else {
            0.0
        }
    }
}

/// Generate shapes
/// Helper type
struct ShapeInfoGenerator {
    rng: fastrand::Rng,
    vol_dims: Vector3<usize>,
    size: Vector3<usize>,
    size_variance: Vector3<usize>,
    sample: f32,
}

impl ShapeInfoGenerator {
    fn new(
        vol_dims: Vector3<usize>,
        size: Vector3<usize>,
        size_variance: Vector3<usize>,
        sample: f32,
        seed: Option<u64>,
    ) -> Self {
        let rng = fastrand::Rng::new();
        if let Some(seed) = seed {
            rng.seed(seed);
        }

        Self {
            rng,
            vol_dims,
            size,
            size_variance,
            sample,
        }
    }

    fn random_shape(&self) -> ShapeType {
        if self.rng.u8(0..N_OF_SHAPE_KINDS) == 0 {
            ShapeType::Cuboid
        } else {
            ShapeType::Sphere
        }
    }

    fn random_vector<R>(&self, ranges: Vector3<R>) -> Vector3<usize>
    where
        R: RangeBounds<usize> + Clone,
    {
        let rand_x = self.rng.usize(ranges[0].clone());
        let rand_y = self.rng.usize(ranges[1].clone());
        let rand_z = self.rng.usize(ranges[2].clone());
        vector![rand_x, rand_y, rand_z]
    }

    fn get_shapes(&self, n: usize) -> Vec<ShapeInfo> {
        (0..n).map(|_| self.get_shape()).collect()
    }

    fn get_shape(&self) -> ShapeInfo {
        let shape_type = self.random_shape();

        // Shape always fits into the volume
        let max_size = self.vol_dims.map(|d| d.saturating_sub(1));
        let size_min = self
            .size
            .zip_map(&self.size_variance, usize::saturating_sub)
            .zip_map(&max_size, usize::min);
        let size_max = (self.size + self.size_variance).zip_map(&max_size, usize::min);

        let size_ranges = vector![
            size_min.x..=size_max.x,
            size_min.y..=size_max.y,
            size_min.z..=size_max.z
        ];
        let size = self.random_vector(size_ranges);

        let pos_ranges = vector![
            0..=(max_size.x - size.x),
            0..=(max_size.y - size.y),
            0..=(max_size.z - size.z)
        ];
        let position_low = self.random_vector(pos_ranges);
        let position_high = position_low + size;

        ShapeInfo {
            position_low,
            position_high,
            shape_type,
            sample: self.random_sample(),
        }
    }

    fn random_sample(&self) -> f32 {
        let offset = (self.rng.f32() * 2.0 - 1.0) * SAMPLE_VARIANCE;
        (self.sample + offset).clamp(0.0, 1.0)
    }
}
