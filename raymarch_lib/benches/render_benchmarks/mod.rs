//! Benchmark categories

pub mod interpolation;
pub mod modes;
