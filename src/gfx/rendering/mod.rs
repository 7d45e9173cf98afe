//! Core rendering functionality
//!
//! [`RenderBackend`] is the contract between the viewer core and whatever
//! turns a frame description into pixels. [`RenderEngine`] is the wgpu
//! implementation; tests use a recording double instead.

pub mod frame_uniforms;
pub mod pipeline_manager;
pub mod render_engine;

use cgmath::{Matrix4, Vector3};

use crate::error::ViewerError;
use crate::gfx::lights::LightRig;
use crate::gfx::scene::config::{GeometryKind, MaterialKind, SceneConfig};
use crate::gfx::scene::drawable::Drawable;

// Re-export main types
pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::RenderEngine;

/// Values shown in the stats overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Readout {
    /// Last published frame rate, `None` until the first window closes
    pub fps: Option<u32>,
    pub vertex_count: usize,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub camera_position: Vector3<f32>,
    pub look_at: Vector3<f32>,
    pub view_proj: Matrix4<f32>,
    /// Object orientation
    pub model: Matrix4<f32>,
    pub drawable: Option<&'a Drawable>,
    pub lights: &'a LightRig,
    pub scene: &'a SceneConfig,
    pub readout: Readout,
}

/// What became of a [`RenderBackend::draw`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// No surface image was available; nothing reached the screen.
    Skipped,
}

/// Produces and draws drawables
///
/// Calls arrive on the event-loop thread only, one at a time.
pub trait RenderBackend {
    /// Builds GPU resources for the pairing and returns a handle to them.
    fn create_drawable(&mut self, geometry: GeometryKind, material: MaterialKind) -> Drawable;

    /// Frees everything created for `drawable`.
    fn release_drawable(&mut self, drawable: Drawable);

    /// Draws one frame. Recoverable surface trouble yields
    /// [`FrameOutcome::Skipped`]; only unrecoverable failures are errors.
    fn draw(&mut self, frame: &FrameView<'_>) -> Result<FrameOutcome, ViewerError>;

    /// Reconfigures the output for a new surface size. Must be idempotent.
    fn on_resize(&mut self, width: u32, height: u32);
}
