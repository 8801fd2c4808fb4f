use std::time::Instant;

use log::{debug, warn};
use rayon::prelude::*;

use crate::{
    color::{self, RGB},
    error::{ConfigError, RenderError, VolumeError},
    transfer_function::{SharedTransferFunction, TransferFunction},
    viewport::Viewport,
    volumetric::Volume,
};

use super::{
    compositing::{Average, Compositor, Dvr, FirstHit, Mip, RayContext},
    config::{RenderConfiguration, RenderingMode},
    sampling::{Interpolation, NearestNeighbour, Trilinear},
};

/// Default render resolution, both axes
pub const DEFAULT_RESOLUTION: usize = 128;

/// Casts one ray per pixel through the viewport and composites the samples
///
/// Frames are rendered synchronously. Viewport, configuration and transfer function
/// are read once per frame, edits only take effect in the next frame.
pub struct VolumeRenderer {
    volume: Volume,
    viewport: Viewport,
    transfer_function: SharedTransferFunction,
    config: RenderConfiguration,
    resolution: (usize, usize),
}

impl VolumeRenderer {
    /// Renderer with default viewport, transfer function and configuration
    pub fn new(volume: Volume) -> VolumeRenderer {
        VolumeRenderer {
            volume,
            viewport: Viewport::new(),
            transfer_function: SharedTransferFunction::new(TransferFunction::new()),
            config: RenderConfiguration::default(),
            resolution: (DEFAULT_RESOLUTION, DEFAULT_RESOLUTION),
        }
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// Replace volume, returns the previous one
    pub fn set_volume(&mut self, volume: Volume) -> Volume {
        std::mem::replace(&mut self.volume, volume)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Handle for editors, clones share the same function
    pub fn transfer_function(&self) -> &SharedTransferFunction {
        &self.transfer_function
    }

    pub fn set_transfer_function(&mut self, transfer_function: SharedTransferFunction) {
        self.transfer_function = transfer_function;
    }

    pub fn config(&self) -> &RenderConfiguration {
        &self.config
    }

    pub fn set_config(&mut self, config: RenderConfiguration) {
        if config.use_phong_shading {
            warn!("Phong shading is not implemented, option ignored");
        }
        self.config = config;
    }

    pub fn resolution(&self) -> (usize, usize) {
        self.resolution
    }

    pub fn set_resolution(&mut self, resolution: (usize, usize)) -> Result<(), ConfigError> {
        if resolution.0 == 0 || resolution.1 == 0 {
            return Err(ConfigError::InvalidResolution);
        }
        self.resolution = resolution;
        Ok(())
    }

    /// Length of RGB8 buffer for current resolution
    pub fn buffer_len(&self) -> usize {
        self.resolution.0 * self.resolution.1 * 3
    }

    /// Render frame into a new RGB8 buffer
    pub fn render(&self) -> Result<Vec<u8>, RenderError> {
        let mut buffer = vec![0; self.buffer_len()];
        self.render_to_buffer(&mut buffer)?;
        Ok(buffer)
    }

    /// Render frame as RGB8, row by row, first row is the top of the image
    ///
    /// Buffer is untouched if the frame cannot be rendered.
    pub fn render_to_buffer(&self, buffer: &mut [u8]) -> Result<(), RenderError> {
        let expected = self.buffer_len();
        if buffer.len() != expected {
            return Err(RenderError::BufferSize {
                expected,
                actual: buffer.len(),
            });
        }

        self.render_frame(buffer, 3, |color, pixel| {
            pixel.copy_from_slice(&color::to_rgb8(&color));
        })
    }

    /// Render frame as float colors, layout as in [`render_to_buffer`](Self::render_to_buffer)
    pub fn render_colors(&self) -> Result<Vec<RGB>, RenderError> {
        let (width, height) = self.resolution;
        let mut colors = vec![color::zero(); width * height];

        self.render_frame(&mut colors, 1, |color, pixel| pixel[0] = color)?;
        Ok(colors)
    }

    /// Everything a frame needs is checked here, before any pixel is written
    fn validate(&self) -> Result<(), RenderError> {
        self.config.validate()?;
        if self.resolution.0 == 0 || self.resolution.1 == 0 {
            return Err(ConfigError::InvalidResolution.into());
        }
        if self.config.rendering_mode == RenderingMode::Dvr
            && self.config.use_gradient_opacity
            && !self.volume.has_gradients()
        {
            return Err(VolumeError::GradientsNotComputed.into());
        }
        Ok(())
    }

    // Resolves compositor and sampling strategy of this frame
    fn render_frame<P, S>(
        &self,
        pixels: &mut [P],
        pixel_len: usize,
        store: S,
    ) -> Result<(), RenderError>
    where
        P: Send,
        S: Fn(RGB, &mut [P]) + Sync,
    {
        self.validate()?;

        let start = Instant::now();
        let tf = self.transfer_function.snapshot();
        let ctx = RayContext::new(&self.volume, tf.lookup_tables(), self.config.step_size);

        match self.config.rendering_mode {
            RenderingMode::FirstHit => {
                self.with_sampling(&FirstHit, &ctx, pixels, pixel_len, &store)
            }
            RenderingMode::Mip => self.with_sampling(&Mip, &ctx, pixels, pixel_len, &store),
            RenderingMode::Average => {
                self.with_sampling(&Average, &ctx, pixels, pixel_len, &store)
            }
            RenderingMode::Dvr => {
                let dvr = Dvr::new(&self.volume, self.config.use_gradient_opacity)?;
                self.with_sampling(&dvr, &ctx, pixels, pixel_len, &store)
            }
        }

        debug!(
            "{} frame {}x{} rendered in {:?}",
            self.config.rendering_mode,
            self.resolution.0,
            self.resolution.1,
            start.elapsed()
        );
        Ok(())
    }

    fn with_sampling<C, P, S>(
        &self,
        compositor: &C,
        ctx: &RayContext<'_>,
        pixels: &mut [P],
        pixel_len: usize,
        store: &S,
    ) where
        C: Compositor,
        P: Send,
        S: Fn(RGB, &mut [P]) + Sync,
    {
        if self.config.use_trilinear_interpolation {
            self.cast_rays::<C, Trilinear, P, S>(compositor, ctx, pixels, pixel_len, store)
        } else {
            self.cast_rays::<C, NearestNeighbour, P, S>(compositor, ctx, pixels, pixel_len, store)
        }
    }

    // Every row is owned by one task, no locking
    fn cast_rays<C, I, P, S>(
        &self,
        compositor: &C,
        ctx: &RayContext<'_>,
        pixels: &mut [P],
        pixel_len: usize,
        store: &S,
    ) where
        C: Compositor,
        I: Interpolation,
        P: Send,
        S: Fn(RGB, &mut [P]) + Sync,
    {
        let (width, height) = self.resolution;
        let viewport = &self.viewport;
        let volume = ctx.volume;

        pixels
            .par_chunks_mut(width * pixel_len)
            .enumerate()
            .for_each(|(row, row_pixels)| {
                // viewport y grows upwards, buffer rows downwards
                let v = (height - 1 - row) as f32 / height as f32;

                for (x, pixel) in row_pixels.chunks_exact_mut(pixel_len).enumerate() {
                    let u = x as f32 / width as f32;

                    let color = match viewport.ray_for_pixel(volume, u, v) {
                        Some(segment) => compositor.composite::<I>(ctx, &segment),
                        None => compositor.background(),
                    };
                    store(color, pixel);
                }
            });
    }
}
