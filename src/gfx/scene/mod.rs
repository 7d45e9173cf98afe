//! # Scene Management Module
//!
//! The viewer shows exactly one solid at a time. This module holds what
//! describes it: the editable [`SceneConfig`], the [`SceneStore`] that keeps the
//! live [`Drawable`] in sync with it, the accumulated [`ObjectOrientation`] and
//! the GPU vertex format.

pub mod config;
pub mod drawable;
pub mod orientation;
pub mod store;
pub mod vertex;

// Re-export main types
pub use config::{Backdrop, ConfigChange, GeometryKind, MaterialKind, Rgb, SceneConfig};
pub use drawable::{Drawable, DrawableId};
pub use orientation::ObjectOrientation;
pub use store::SceneStore;
pub use vertex::Vertex3D;
