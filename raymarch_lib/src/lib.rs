//! CPU volume ray caster
//!
//! Rays are cast from a [`Viewport`](viewport::Viewport) through a scalar [`Volume`](volumetric::Volume),
//! samples are mapped by a [`TransferFunction`](transfer_function::TransferFunction) and
//! composited by one of the algorithms in [`render`].

pub mod color;
pub mod common;
pub mod error;
pub mod interaction;
pub mod render;
pub mod test_helpers;
pub mod transfer_function;
pub mod viewport;
pub mod volumetric;

pub use render::{RenderConfiguration, RenderingMode, VolumeRenderer};
pub use transfer_function::{SharedTransferFunction, TransferFunction};
pub use viewport::Viewport;
pub use volumetric::Volume;
