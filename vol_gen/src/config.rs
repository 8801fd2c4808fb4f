use std::{ffi::OsString, str::FromStr};

use clap::ArgMatches;
use log::LevelFilter;
use nalgebra::{vector, Vector3};

/// Parse value of `key`, it is present thanks to defaults or validators
fn parse_value<T>(args: &ArgMatches, key: &str) -> Result<T, String>
where
    T: FromStr,
{
    let value = args
        .value_of(key)
        .ok_or_else(|| format!("Missing value of {key}"))?;
    value
        .parse()
        .map_err(|_| format!("Cannot parse {key} value '{value}'"))
}

/// Transform `Values` into `Vector`
fn values_to_vector3(args: &ArgMatches, key: &str) -> Result<Vector3<usize>, String> {
    let vals = args
        .values_of(key)
        .ok_or_else(|| format!("Missing value of {key}"))?
        .map(|v| v.parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("Cannot parse {key}: {e}"))?;

    match vals[..] {
        [x, y, z] => Ok(vector![x, y, z]),
        _ => Err(format!("{key} needs 3 values")),
    }
}

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug)]
pub struct Config {
    /// Dimensions of volume
    pub dims: Vector3<usize>,
    /// Type of generator to be used
    pub generator: GeneratorConfig,
    // Output file name
    pub file_name: OsString,
    /// Optional seed for RNG, to replicate results
    pub seed: Option<u64>,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_args(args: &ArgMatches) -> Result<Config, String> {
        let dims = values_to_vector3(args, "dims")?;
        let generator = GeneratorConfig::from_args(args)?;
        let file_name = args
            .value_of_os("output-file")
            .ok_or("Missing output file")?
            .into();
        let seed = match args.value_of("seed") {
            Some(_) => Some(parse_value(args, "seed")?),
            None => None,
        };
        let log_level = parse_value(args, "log-level")?;

        Ok(Config {
            dims,
            generator,
            file_name,
            seed,
            log_level,
        })
    }
}

/// Settings specific to generator variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeneratorConfig {
    /// Edges of the bounding box
    Wireframe { edge_width: usize, sample: f32 },
    /// Whole volume filled with one value
    Solid { sample: f32 },
    /// Randomly placed cuboids and spheres
    Shapes {
        n_of_shapes: usize,
        sample: f32,
        obj_size: usize,
    },
}

impl GeneratorConfig {
    pub fn from_args(args: &ArgMatches) -> Result<GeneratorConfig, String> {
        let sample = parse_value(args, "sample")?;
        let name: String = parse_value(args, "generator")?;

        match name.as_str() {
            "wireframe" => Ok(GeneratorConfig::Wireframe {
                edge_width: parse_value(args, "edge-width")?,
                sample,
            }),
            "solid" => Ok(GeneratorConfig::Solid { sample }),
            "shapes" => Ok(GeneratorConfig::Shapes {
                n_of_shapes: parse_value(args, "n-of-shapes")?,
                sample,
                obj_size: parse_value(args, "object-size")?,
            }),
            other => Err(format!("Unknown generator '{other}'")),
        }
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::args::get_command;

    fn config_from(args: &[&str]) -> Config {
        let matches = get_command().try_get_matches_from(args).unwrap();
        Config::from_args(&matches).unwrap()
    }

    #[test]
    fn defaults() {
        let cfg = config_from(&["vol_gen", "--dims=8,16,4"]);

        assert_eq!(cfg.dims, vector![8, 16, 4]);
        assert_eq!(
            cfg.generator,
            GeneratorConfig::Wireframe {
                edge_width: 5,
                sample: 0.7
            }
        );
        assert_eq!(cfg.file_name, OsString::from("a.dat"));
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.log_level, LevelFilter::Info);
    }

    #[test]
    fn shapes() {
        let cfg = config_from(&[
            "vol_gen",
            "--dims=32,32,32",
            "--generator",
            "shapes",
            "--n-of-shapes",
            "3",
            "--object-size",
            "8",
            "--sample",
            "0.5",
            "--seed",
            "42",
            "--log-level",
            "debug",
            "-o",
            "shapes.dat",
        ]);

        assert_eq!(
            cfg.generator,
            GeneratorConfig::Shapes {
                n_of_shapes: 3,
                sample: 0.5,
                obj_size: 8
            }
        );
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.log_level, LevelFilter::Debug);
        assert_eq!(cfg.file_name, OsString::from("shapes.dat"));
    }
}
