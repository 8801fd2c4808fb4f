use log::{error, info};

mod args;
mod config;
mod file;
mod generators;
mod header;
mod logger;

use crate::{args::get_command, config::Config, generators::generate_vol, logger::init_logger};

pub fn main() {
    let args = get_command().get_matches();

    let cfg = match Config::from_args(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    init_logger(cfg.log_level);

    info!("Generating volume...");
    info!("{:?}", cfg);

    if let Err(e) = generate_vol(&cfg) {
        error!("Generating failed: {e}");
        std::process::exit(1);
    }
}
