//! # Procedural Geometry Generation
//!
//! Generates the five solids the viewer can display, so no model files are
//! needed.
//!
//! ## Supported Primitives
//!
//! - **Torus knot**: (p, q) knot swept by a circular tube
//! - **Sphere**: UV sphere with configurable resolution
//! - **Platonic solids**: dodecahedron, octahedron and icosahedron, subdivided
//!   and projected onto a sphere
//!
//! ## Usage
//!
//! ```rust
//! use spindle::gfx::geometry::{build, generate_sphere};
//! use spindle::gfx::scene::config::GeometryKind;
//!
//! let knot = build(GeometryKind::TorusKnot);
//! assert_eq!(knot.vertex_count(), 4257);
//!
//! let sphere = generate_sphere(1.0, 16, 8);
//! assert_eq!(sphere.vertex_count(), 17 * 9);
//! ```

pub mod polyhedra;
pub mod primitives;

pub use polyhedra::{generate_dodecahedron, generate_icosahedron, generate_octahedron};
pub use primitives::*;

use std::collections::HashSet;

use crate::gfx::scene::config::GeometryKind;
use crate::gfx::scene::vertex::Vertex3D;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves positions and normals into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }

    /// Line-list indices covering every triangle edge once
    pub fn edge_indices(&self) -> Vec<u32> {
        let mut seen = HashSet::with_capacity(self.indices.len());
        let mut edges = Vec::with_capacity(self.indices.len() * 2);
        for triangle in self.indices.chunks_exact(3) {
            for (a, b) in [
                (triangle[0], triangle[1]),
                (triangle[1], triangle[2]),
                (triangle[2], triangle[0]),
            ] {
                if a == b {
                    continue; // degenerate pole triangles
                }
                let key = if a < b { (a, b) } else { (b, a) };
                if seen.insert(key) {
                    edges.push(key.0);
                    edges.push(key.1);
                }
            }
        }
        edges
    }
}

/// Builds the mesh for a geometry kind with the viewer's fixed dimensions.
pub fn build(kind: GeometryKind) -> GeometryData {
    match kind {
        GeometryKind::TorusKnot => generate_torus_knot(&TorusKnotParams::default()),
        GeometryKind::Sphere => generate_sphere(1.5, 64, 64),
        GeometryKind::Dodecahedron => generate_dodecahedron(1.5, 1),
        GeometryKind::Octahedron => generate_octahedron(1.5, 2),
        GeometryKind::Icosahedron => generate_icosahedron(1.5, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_counts_per_kind() {
        let counts: Vec<(GeometryKind, usize)> = GeometryKind::ALL
            .iter()
            .map(|kind| (*kind, build(*kind).vertex_count()))
            .collect();
        assert_eq!(
            counts,
            vec![
                (GeometryKind::TorusKnot, 4257),
                (GeometryKind::Sphere, 4225),
                (GeometryKind::Dodecahedron, 432),
                (GeometryKind::Octahedron, 216),
                (GeometryKind::Icosahedron, 240),
            ]
        );
    }

    #[test]
    fn test_every_kind_has_matching_normals_and_valid_indices() {
        for kind in GeometryKind::ALL {
            let data = build(kind);
            assert_eq!(data.vertices.len(), data.normals.len(), "{kind:?}");
            assert_eq!(data.indices.len() % 3, 0, "{kind:?}");
            let n = data.vertex_count() as u32;
            assert!(data.indices.iter().all(|&i| i < n), "{kind:?}");
        }
    }

    #[test]
    fn test_edge_indices_deduplicate_shared_edges() {
        let quad = GeometryData {
            vertices: vec![[0.0; 3]; 4],
            normals: vec![[0.0, 1.0, 0.0]; 4],
            indices: vec![0, 1, 2, 2, 3, 0],
        };
        // 4 outer edges + 1 diagonal
        assert_eq!(quad.edge_indices().len(), 10);
    }
}
