//! Module with helper functions
//! Saves repetition in unit tests, integration tests and benches

use nalgebra::{vector, Vector3};

use crate::volumetric::{generators, Volume};

/// Volume of size `size` filled with `value`, gradients not computed
pub fn solid_volume(size: Vector3<usize>, value: f32) -> Volume {
    Volume::new(size, vec![value; size.x * size.y * size.z]).unwrap()
}

pub fn empty_volume(size: Vector3<usize>) -> Volume {
    solid_volume(size, 0.0)
}

/// 3x3x3 volume, cell `(x, y, z)` holds `(x + 10y + 100z) / 1000`
pub fn ramp_volume() -> Volume {
    Volume::from_fn(vector![3, 3, 3], |x, y, z| {
        (x + 10 * y + 100 * z) as f32 / 1000.0
    })
    .unwrap()
}

/// Volume of size 1x1xN, `values` along Z axis
pub fn column_volume(values: &[f32]) -> Volume {
    Volume::new(vector![1, 1, values.len()], values.to_vec()).unwrap()
}

/// Empty volume with one cell set to `value`, gradients computed
pub fn single_voxel_volume(size: Vector3<usize>, voxel: Vector3<usize>, value: f32) -> Volume {
    let mut volume = Volume::from_fn(size, |x, y, z| {
        if vector![x, y, z] == voxel {
            value
        } else {
            0.0
        }
    })
    .unwrap();
    volume.compute_gradients();
    volume
}

/// Wireframe cube with default edges, gradients computed
pub fn wireframe_volume(side: usize) -> Volume {
    generators::wireframe_cube(side).unwrap()
}

/// Dataset file contents, samples are not checked against `size`
pub fn dat_bytes(size: Vector3<usize>, samples: &[u16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(6 + samples.len() * 2);
    for dim in size.iter() {
        bytes.extend_from_slice(&(*dim as u16).to_le_bytes());
    }
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}
