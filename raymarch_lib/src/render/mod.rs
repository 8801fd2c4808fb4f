//! Frame rendering
//!
//! [`VolumeRenderer`] resolves a [`Compositor`] and an [`Interpolation`] from
//! [`RenderConfiguration`] once per frame, then casts rays in parallel, one task per row.

mod compositing;
mod config;
mod renderer;
mod sampling;

pub use compositing::{gradient_attenuation, Average, Compositor, Dvr, FirstHit, Mip, RayContext};
pub use config::{RenderConfiguration, RenderConfigurationBuilder, RenderingMode};
pub use renderer::{VolumeRenderer, DEFAULT_RESOLUTION};
pub use sampling::{Interpolation, NearestNeighbour, Trilinear};
