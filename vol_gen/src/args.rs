//! Argument parsing and validation
//! Uses library `clap`

use std::ffi::OsStr;

use clap::{Arg, Command, ValueHint};

/// Dimensions are stored as 16bit numbers
pub fn is_dimension(num: &str) -> Result<(), String> {
    match num.parse::<u16>() {
        Ok(n) if n > 0 => Ok(()),
        Ok(_) => Err("Number must be greater than 0".into()),
        Err(_) => Err("Number in range <1;65535> required".into()),
    }
}

// up to 32bit value
pub fn is_positive_number(num: &str) -> Result<(), String> {
    match num.parse::<u32>() {
        Ok(n) if n > 0 => Ok(()),
        Ok(_) => Err("Number must be greater than 0".into()),
        Err(_) => Err("Number required".into()),
    }
}

pub fn is_intensity(num: &str) -> Result<(), String> {
    match num.parse::<f32>() {
        Ok(n) if (0.0..=1.0).contains(&n) => Ok(()),
        Ok(_) => Err("Intensity must be in range <0;1>".into()),
        Err(_) => Err("Number required".into()),
    }
}

pub const GENERATOR_NAMES: &[&str] = &["wireframe", "solid", "shapes"];
pub const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

pub fn get_command<'a>() -> Command<'a> {
    Command::new("Vol-gen")
        .version("0.1.0")
        .about("Synthetic volume generator, writes 16bit .dat datasets")
        .arg(
            Arg::new("dims")
                .help("Dimensions of volume")
                .long("dims")
                .short('d')
                .required(true)
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .validator(is_dimension),
        )
        .arg(
            Arg::new("generator")
                .help("Type of generator")
                .long("generator")
                .short('g')
                .default_value("wireframe")
                .value_name("NAME")
                .possible_values(GENERATOR_NAMES),
        )
        .arg(
            Arg::new("sample")
                .help("Intensity of generated objects")
                .long("sample")
                .value_name("INTENSITY")
                .default_value("0.7")
                .validator(is_intensity),
        )
        .arg(
            Arg::new("edge-width")
                .help("Width of wireframe edges, in cells")
                .long("edge-width")
                .value_name("N")
                .default_value("5")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("n-of-shapes")
                .help("Number of shapes generated in volume")
                .long("n-of-shapes")
                .value_name("N")
                .default_value("10")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("object-size")
                .help("Side of individual generated shapes")
                .long("object-size")
                .value_name("SIDE")
                .default_value("20")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("seed")
                .help("Seed for RNG, leave out for random seed")
                .long("seed")
                .value_name("SEED")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("output-file")
                .help("File name to output")
                .long("output-file")
                .short('o')
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath)
                .default_value_os(OsStr::new("a.dat")),
        )
        .arg(
            Arg::new("log-level")
                .help("Logging verbosity")
                .long("log-level")
                .value_name("LEVEL")
                .default_value("info")
                .possible_values(LOG_LEVELS),
        )
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn dims_required() {
        let res = get_command().try_get_matches_from(["vol_gen", "--generator", "solid"]);
        assert!(res.is_err());
    }

    #[test]
    fn dims_parsed() {
        let matches = get_command()
            .try_get_matches_from(["vol_gen", "--dims=4,5,6"])
            .unwrap();
        let dims: Vec<_> = matches.values_of("dims").unwrap().collect();
        assert_eq!(dims, ["4", "5", "6"]);
        assert_eq!(matches.value_of("generator"), Some("wireframe"));
    }

    #[test]
    fn validators() {
        assert!(is_dimension("65535").is_ok());
        assert!(is_dimension("65536").is_err());
        assert!(is_dimension("0").is_err());
        assert!(is_intensity("0.5").is_ok());
        assert!(is_intensity("1.5").is_err());
        assert!(is_positive_number("x").is_err());
    }

    #[test]
    fn unknown_generator() {
        let res = get_command().try_get_matches_from(["vol_gen", "--dims=4,4,4", "-g", "noise"]);
        assert!(res.is_err());
    }
}
