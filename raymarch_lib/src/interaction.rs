//! Pointer drags to viewport transforms
//!
//! Left button moves the viewport, right button rotates it, middle button zooms.
//! Positions are in window pixels, y growing downwards.

use nalgebra::{vector, Vector2};

use crate::viewport::Viewport;

pub const TRANSLATION_SCALING: f32 = 0.001;
pub const ROTATION_SCALING: f32 = 0.0035;
pub const ZOOM_SCALING: f32 = 0.002;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
    /// Extra side button, zooms like the middle one
    Back,
}

/// Tracks pressed buttons and the last pointer position
#[derive(Debug, Clone, Default)]
pub struct DragController {
    last_position: Vector2<f32>,
    moving: bool,
    rotating: bool,
    zooming: bool,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: PointerButton) {
        match button {
            PointerButton::Left => self.moving = true,
            PointerButton::Right => self.rotating = true,
            PointerButton::Middle | PointerButton::Back => self.zooming = true,
        }
    }

    /// Releasing any button ends all drags
    pub fn release(&mut self) {
        self.moving = false;
        self.rotating = false;
        self.zooming = false;
    }

    /// Pointer left the canvas
    pub fn leave(&mut self) {
        self.release();
    }

    pub fn is_dragging(&self) -> bool {
        self.moving || self.rotating || self.zooming
    }

    /// Apply motion since the last event to `viewport`
    ///
    /// Returns `true` if the viewport changed and the frame should be rendered again.
    pub fn pointer_moved(&mut self, viewport: &mut Viewport, position: Vector2<f32>) -> bool {
        let motion = position - self.last_position;
        self.last_position = position;

        if self.moving {
            // Viewport moves against the pointer, so the volume follows it
            let translation = vector![motion.x, motion.y, 0.0] * -TRANSLATION_SCALING;
            viewport.move_by(translation);
        }

        if self.rotating {
            // vertical motion turns around X axis
            let rotation = vector![motion.y, motion.x] * ROTATION_SCALING;
            viewport.rotate(rotation);
        }

        if self.zooming {
            viewport.zoom(motion.y * ZOOM_SCALING);
        }

        self.is_dragging()
    }
}
