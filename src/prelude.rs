//! # Spindle Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use spindle::prelude::*;
//!
//! let config = ViewerConfig::for_variant(ViewerVariant::FixedFog)
//!     .with_title("Fog demo")
//!     .with_auto_rotate_timing(AutoRotateTiming::FrameRateIndependent { reference_fps: 60.0 });
//! assert!(!config.interaction.camera_orbit);
//! ```

pub use crate::app::SpindleApp;
pub use crate::config::{AutoRotateTiming, ViewerConfig, ViewerVariant};
pub use crate::error::ViewerError;
pub use crate::gfx::camera::OrbitCamera;
pub use crate::gfx::rendering::{FrameOutcome, FrameView, Readout, RenderBackend};
pub use crate::gfx::scene::{
    ConfigChange, Drawable, GeometryKind, MaterialKind, ObjectOrientation, Rgb, SceneConfig,
    SceneStore,
};
pub use crate::input::{InputEvent, InteractionMode, InteractionStateMachine, PointerButton};
pub use crate::viewer::{RenderLoop, ViewerState};
