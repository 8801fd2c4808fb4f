//! Compositing algorithms
//!
//! Every algorithm marches one ray segment and reduces its samples to a single color.
//! Samples are mapped to colors through the transfer function's lookup tables.

use std::f32::consts::E;

use crate::{
    color::{self, background, RGB},
    common::RaySegment,
    error::VolumeError,
    transfer_function::LookupTables,
    volumetric::{GradientField, Volume},
};

use super::sampling::Interpolation;

/// Read only data shared by all rays of a frame
#[derive(Debug, Clone, Copy)]
pub struct RayContext<'a> {
    pub volume: &'a Volume,
    pub tables: &'a LookupTables,
    pub step_size: f32,
}

impl<'a> RayContext<'a> {
    pub fn new(volume: &'a Volume, tables: &'a LookupTables, step_size: f32) -> Self {
        Self {
            volume,
            tables,
            step_size,
        }
    }

    /// Intensities along the segment, entry to exit
    fn samples<I>(&self, segment: &RaySegment) -> impl Iterator<Item = f32> + 'a
    where
        I: Interpolation,
    {
        let volume = self.volume;
        segment
            .march(self.step_size)
            .map(move |pos| I::sample(volume, pos))
    }
}

pub trait Compositor: Sync {
    /// Color of rays missing the volume
    fn background(&self) -> RGB;

    fn composite<I>(&self, ctx: &RayContext<'_>, segment: &RaySegment) -> RGB
    where
        I: Interpolation;
}

/// Color of the first positive sample
#[derive(Debug, Clone, Copy)]
pub struct FirstHit;

impl Compositor for FirstHit {
    fn background(&self) -> RGB {
        background::FIRST_HIT
    }

    fn composite<I>(&self, ctx: &RayContext<'_>, segment: &RaySegment) -> RGB
    where
        I: Interpolation,
    {
        let hit = ctx.samples::<I>(segment).find(|&sample| sample > 0.0);
        ctx.tables.color(hit.unwrap_or(0.0))
    }
}

/// Maximum intensity projection
#[derive(Debug, Clone, Copy)]
pub struct Mip;

impl Compositor for Mip {
    fn background(&self) -> RGB {
        background::MIP
    }

    fn composite<I>(&self, ctx: &RayContext<'_>, segment: &RaySegment) -> RGB
    where
        I: Interpolation,
    {
        let max = ctx.samples::<I>(segment).fold(0.0, f32::max);
        ctx.tables.color(max)
    }
}

/// Mean of all samples
#[derive(Debug, Clone, Copy)]
pub struct Average;

impl Compositor for Average {
    fn background(&self) -> RGB {
        background::AVERAGE
    }

    fn composite<I>(&self, ctx: &RayContext<'_>, segment: &RaySegment) -> RGB
    where
        I: Interpolation,
    {
        let (sum, count) = ctx
            .samples::<I>(segment)
            .fold((0.0, 0usize), |(sum, count), sample| (sum + sample, count + 1));

        if count == 0 {
            return ctx.tables.color(0.0);
        }
        ctx.tables.color(sum / count as f32)
    }
}

/// Direct volume rendering, back to front
#[derive(Debug, Clone, Copy)]
pub struct Dvr<'a> {
    /// Present when opacity is attenuated by gradient magnitude
    gradients: Option<GradientField<'a>>,
}

impl<'a> Dvr<'a> {
    pub fn new(volume: &'a Volume, gradient_opacity: bool) -> Result<Self, VolumeError> {
        let gradients = if gradient_opacity {
            Some(volume.gradients()?)
        } else {
            None
        };
        Ok(Self { gradients })
    }
}

/// Opacity scale for gradient magnitude, `1 - 1 / ln(e + magnitude)`
///
/// Written as `ln(1 + magnitude / e) / ln(e + magnitude)`, so zero magnitude gives
/// exactly zero and the result is never negative. `ln(E)` is not exactly one in `f32`.
pub fn gradient_attenuation(magnitude: f32) -> f32 {
    f32::ln_1p(magnitude / E) / f32::ln(E + magnitude)
}

impl Compositor for Dvr<'_> {
    fn background(&self) -> RGB {
        background::DVR
    }

    fn composite<I>(&self, ctx: &RayContext<'_>, segment: &RaySegment) -> RGB
    where
        I: Interpolation,
    {
        let mut accum = color::zero();

        for pos in segment.march_back(ctx.step_size) {
            let sample = I::sample(ctx.volume, pos);
            let sample_color = ctx.tables.color(sample);
            let mut opacity = ctx.tables.opacity(sample);

            if let Some(gradients) = &self.gradients {
                opacity *= gradient_attenuation(I::sample(gradients, pos));
            }

            // over operator
            accum = sample_color * opacity + accum * (1.0 - opacity);
        }

        accum
    }
}
