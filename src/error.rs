//! Error types for the spindle viewer
//!
//! The interaction and camera core has no failure modes (inputs are clamped and
//! unknown tags fall back to defaults), so errors only surface at the platform
//! boundary: window, event loop and GPU setup, and color strings coming from the
//! control panel.

use thiserror::Error;

/// Failures while bringing up or driving the window and GPU
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to create the event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create the window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create a rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open the graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    UnsupportedSurface,

    #[error("failed to acquire the next frame: {0}")]
    Frame(#[from] wgpu::SurfaceError),

    #[error("pipeline {pipeline:?} refers to unknown shader {shader:?}")]
    MissingShader { pipeline: String, shader: String },
}

/// A color string from the control panel could not be read as `#rrggbb`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("expected 6 hex digits, got {0} in {1:?}")]
    Length(usize, String),

    #[error("invalid hex digits in {0:?}")]
    Digits(String),
}
