use std::{
    error::Error,
    io::{BufWriter, Write},
};

use byteorder::{ByteOrder, LittleEndian};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use nalgebra::{vector, Vector3};
use rayon::prelude::*;
use raymarch_lib::volumetric::generators::{SampleGenerator, Solid, WireframeCube};

use crate::{
    config::{Config, GeneratorConfig},
    file::open_create_file,
    header::{generate_header, quantize},
};

mod shapes;

pub use shapes::ShapesGenerator;

/// Generator selected by configuration
pub enum VolumeGenerator {
    Wireframe(WireframeCube),
    Solid(Solid),
    Shapes(ShapesGenerator),
}

impl SampleGenerator for VolumeGenerator {
    fn sample_at(&self, size: Vector3<usize>, coords: Vector3<usize>) -> f32 {
        match self {
            VolumeGenerator::Wireframe(g) => g.sample_at(size, coords),
            VolumeGenerator::Solid(g) => g.sample_at(size, coords),
            VolumeGenerator::Shapes(g) => g.sample_at(size, coords),
        }
    }
}

pub fn get_sample_generator(config: &Config) -> VolumeGenerator {
    match config.generator {
        GeneratorConfig::Wireframe { edge_width, sample } => {
            VolumeGenerator::Wireframe(WireframeCube {
                edge_width,
                intensity: sample,
            })
        }
        GeneratorConfig::Solid { sample } => VolumeGenerator::Solid(Solid { intensity: sample }),
        GeneratorConfig::Shapes {
            n_of_shapes,
            sample,
            obj_size,
        } => {
            let gen = ShapesGenerator::new(config.dims, n_of_shapes, sample, obj_size, config.seed);
            debug!("Generated shapes {:?}", gen.shapes());
            VolumeGenerator::Shapes(gen)
        }
    }
}

/// Samples of one z slice, little-endian bytes, x-fastest
pub fn slice_bytes<G>(gen: &G, dims: Vector3<usize>, z: usize) -> Vec<u8>
where
    G: SampleGenerator + Sync,
{
    let mut bytes = vec![0; dims.x * dims.y * 2];

    bytes
        .par_chunks_mut(dims.x * 2)
        .enumerate()
        .for_each(|(y, row)| {
            let samples: Vec<u16> = (0..dims.x)
                .map(|x| quantize(gen.sample_at(dims, vector![x, y, z])))
                .collect();
            LittleEndian::write_u16_into(&samples, row);
        });

    bytes
}

/// Write header and all samples, slice by slice
pub fn write_volume<G, W>(gen: &G, dims: Vector3<usize>, out: &mut W) -> Result<(), Box<dyn Error>>
where
    G: SampleGenerator + Sync,
    W: Write,
{
    let header = generate_header(dims)?;
    out.write_all(&header)?;

    let pb = ProgressBar::new(dims.z as u64);
    pb.set_style(ProgressStyle::default_bar().template("{bar:40} {pos}/{len} slices ETA: {eta}"));

    for z in 0..dims.z {
        out.write_all(&slice_bytes(gen, dims, z))?;
        pb.inc(1);
    }

    pb.finish();
    out.flush()?;
    Ok(())
}

pub fn generate_vol(config: &Config) -> Result<(), Box<dyn Error>> {
    let gen = get_sample_generator(config);

    let file = open_create_file(&config.file_name)?;
    let mut writer = BufWriter::new(file);
    write_volume(&gen, config.dims, &mut writer)?;

    info!("Generating finished, result in {:?}", config.file_name);
    Ok(())
}

#[cfg(test)]
mod test {

    use raymarch_lib::volumetric::{parse::parse_dat, ScalarField};

    use super::*;

    #[test]
    fn written_volume_parses() {
        let gen = WireframeCube {
            edge_width: 1,
            intensity: 1.0,
        };
        let dims = vector![4, 3, 5];
        let mut bytes = vec![];
        write_volume(&gen, dims, &mut bytes).unwrap();

        assert_eq!(bytes.len(), 6 + 4 * 3 * 5 * 2);

        let volume = parse_dat(&bytes).unwrap();
        assert_eq!(volume.get_size(), dims);
        assert_eq!(volume.get_data(0, 0, 2), Some(1.0));
        assert_eq!(volume.get_data(1, 1, 0), Some(0.0));
        assert_eq!(volume.get_data(1, 1, 2), Some(0.0));
        assert_eq!(volume.get_data(3, 2, 4), Some(1.0));
    }

    #[test]
    fn solid_slice() {
        let gen = Solid { intensity: 0.5 };
        let bytes = slice_bytes(&gen, vector![2, 2, 1], 0);
        assert_eq!(bytes, [0, 8, 0, 8, 0, 8, 0, 8]);
    }
}
