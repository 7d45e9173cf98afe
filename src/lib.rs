// src/lib.rs
//! Spindle 3D Viewer
//!
//! An interactive viewer for a single procedurally generated solid, built on
//! wgpu and winit. Drag with the primary button to rotate the object, drag
//! with the secondary button to orbit the camera, and scroll or pinch to zoom.
//!
//! The viewer core (camera, orientation, interaction state machine, scene
//! store and frame statistics) is plain data driven by [`input::InputEvent`]
//! records and renders through the [`gfx::rendering::RenderBackend`] trait,
//! so it can be exercised without a window or GPU.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod input;
pub mod performance;
pub mod prelude;
pub mod ui;
pub mod viewer;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::SpindleApp;
pub use config::ViewerConfig;
pub use error::ViewerError;

/// Runs the viewer with `config` until its window closes.
pub fn run(config: ViewerConfig) -> Result<(), ViewerError> {
    SpindleApp::new(config).run()
}
