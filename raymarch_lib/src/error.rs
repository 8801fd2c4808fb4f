//! Error types of the library
//!
//! Sampling outside of the volume is not an error, those samples are zero.
//! Everything here is reported to the caller and ends the operation in progress
//! (one load, one frame, one edit of the transfer function).

use thiserror::Error;

/// Errors raised while loading or generating volumes
#[derive(Error, Debug)]
pub enum VolumeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path does not lead to a file")]
    NotAFile,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not enough samples, expected {expected}, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("Volume has a zero dimension")]
    EmptyDimensions,

    #[error("Gradients requested before they were computed")]
    GradientsNotComputed,
}

/// Errors raised by transfer function queries and edits
#[derive(Error, Debug, PartialEq)]
pub enum TransferFunctionError {
    #[error("Value {0} is not covered by transfer function nodes")]
    OutOfDomain(f32),

    #[error("Transfer function needs a node at 0 and a node at 1")]
    MissingBoundaryNode,

    #[error("Node {0} is a boundary node and cannot be removed")]
    BoundaryNodeRemoval(usize),

    #[error("No node with index {0}")]
    NodeIndex(usize),
}

/// Errors in render configuration
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Unknown rendering mode '{0}'")]
    UnknownRenderingMode(String),

    #[error("Step size must be a positive number, got {0}")]
    InvalidStepSize(f32),

    #[error("Resolution must be non-zero in both axes")]
    InvalidResolution,
}

/// Errors ending a frame before any pixel is written
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Volume error: {0}")]
    Volume(#[from] VolumeError),

    #[error("Buffer has {actual} bytes, frame needs {expected}")]
    BufferSize { expected: usize, actual: usize },
}
