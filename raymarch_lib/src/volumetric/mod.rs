mod data_source;
pub mod generators;
mod gradient;
pub mod parse;
mod volume;

pub use data_source::DataSource;
pub use gradient::{central_difference, GradientField};
pub use parse::from_file;
pub use volume::{ScalarField, Volume};
