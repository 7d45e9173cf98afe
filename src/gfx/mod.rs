//! # Graphics Module
//!
//! Camera, geometry, materials, lights, scene state and the wgpu renderer.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Spherical orbit camera with clamped distance and polar angle
//! - **Geometry** ([`geometry`]) - Procedural meshes for the five solids
//! - **Materials and Lights** ([`material`], [`lights`]) - Fixed presets and the animated light rig
//! - **Scene** ([`scene`]) - Editable configuration, the live drawable and object orientation
//! - **Rendering Pipeline** ([`rendering`]) - The [`RenderBackend`] contract and its wgpu implementation
//! - **Resource Management** ([`resources`]) - Depth buffers and other GPU textures
//!
//! [`RenderBackend`]: rendering::RenderBackend

pub mod camera;
pub mod geometry;
pub mod lights;
pub mod material;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
