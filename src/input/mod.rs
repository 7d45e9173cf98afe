//! # Input
//!
//! Platform events are translated into [`InputEvent`] records before they
//! reach the [`InteractionStateMachine`]. The records carry everything a
//! handler needs (button identity, positions, the full set of active touch
//! contacts), so tests can feed synthetic streams without a window.

pub mod interaction;
pub mod touch;

use cgmath::Vector2;

pub use interaction::{InteractionMode, InteractionStateMachine};
pub use touch::TouchTracker;

/// Mouse button identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button, rotates the object
    Primary,
    /// Right button, orbits the camera
    Secondary,
    Other,
}

impl From<winit::event::MouseButton> for PointerButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => PointerButton::Primary,
            winit::event::MouseButton::Right => PointerButton::Secondary,
            _ => PointerButton::Other,
        }
    }
}

/// One input record, positions in physical pixels
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        button: PointerButton,
        position: Vector2<f32>,
    },
    PointerMove {
        position: Vector2<f32>,
    },
    PointerUp {
        button: PointerButton,
    },
    /// Positive values move the camera away (zoom out)
    Wheel {
        delta_y: f32,
    },
    /// Contacts active after a finger went down
    TouchStart {
        touches: Vec<Vector2<f32>>,
    },
    TouchMove {
        touches: Vec<Vector2<f32>>,
    },
    /// Contacts still active after a finger lifted
    TouchEnd {
        touches: Vec<Vector2<f32>>,
    },
    Resize {
        width: u32,
        height: u32,
    },
}

/// Converts a winit scroll delta to the pixel scale wheel zoom is tuned for.
///
/// Winit reports "scroll up" as positive y, the opposite sign of a browser
/// wheel delta; line deltas are scaled by `line_height` pixels.
pub fn wheel_delta_pixels(delta: winit::event::MouseScrollDelta, line_height: f32) -> f32 {
    match delta {
        winit::event::MouseScrollDelta::LineDelta(_, y) => -y * line_height,
        winit::event::MouseScrollDelta::PixelDelta(position) => -position.y as f32,
    }
}
