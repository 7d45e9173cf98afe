//! # Primitive Shape Generation
//!
//! Curved primitives: the UV sphere and the torus knot. Both are indexed and
//! carry smooth normals.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
///
/// Seam and pole vertices are duplicated so the vertex count is
/// `(longitude_segments + 1) * (latitude_segments + 1)`.
pub fn generate_sphere(radius: f32, longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let sin_phi = phi.sin();
            let cos_phi = phi.cos();

            // Y-up, same convention as the orbit camera
            let x = sin_theta * cos_phi;
            let y = cos_theta;
            let z = sin_theta * sin_phi;

            data.vertices.push([x * radius, y * radius, z * radius]);
            data.normals.push([x, y, z]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            // Counter-clockwise seen from outside
            data.indices.extend_from_slice(&[first, first + 1, second]);
            data.indices.extend_from_slice(&[second, first + 1, second + 1]);
        }
    }

    data
}

/// Torus knot dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusKnotParams {
    /// Radius of the knot's center line
    pub radius: f32,
    /// Radius of the swept tube
    pub tube: f32,
    pub tubular_segments: u32,
    pub radial_segments: u32,
    /// Windings around the axis of rotational symmetry
    pub p: u32,
    /// Windings around the interior circle of the torus
    pub q: u32,
}

impl Default for TorusKnotParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            tube: 0.3,
            tubular_segments: 128,
            radial_segments: 32,
            p: 2,
            q: 3,
        }
    }
}

/// Generate a (p, q) torus knot
///
/// The center line is sampled `tubular_segments + 1` times and a ring of
/// `radial_segments + 1` vertices is placed around each sample in the
/// Frenet-like frame built from two neighbouring curve points.
pub fn generate_torus_knot(params: &TorusKnotParams) -> GeometryData {
    let mut data = GeometryData::new();

    let tubular = params.tubular_segments.max(3);
    let radial = params.radial_segments.max(3);
    let p = params.p.max(1) as f32;
    let q = params.q as f32;

    let curve_point = |u: f32| -> [f32; 3] {
        let cu = u.cos();
        let su = u.sin();
        let qu_over_p = q / p * u;
        let cs = qu_over_p.cos();
        [
            params.radius * (2.0 + cs) * 0.5 * cu,
            params.radius * (2.0 + cs) * su * 0.5,
            params.radius * qu_over_p.sin() * 0.5,
        ]
    };

    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * p * PI * 2.0;

        let p1 = curve_point(u);
        let p2 = curve_point(u + 0.01);

        let tangent = sub(p2, p1);
        let mut normal = add(p2, p1);
        let binormal = normalize(cross(tangent, normal));
        normal = normalize(cross(binormal, tangent));

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * PI * 2.0;
            let cx = -params.tube * v.cos();
            let cy = params.tube * v.sin();

            let vertex = [
                p1[0] + cx * normal[0] + cy * binormal[0],
                p1[1] + cx * normal[1] + cy * binormal[1],
                p1[2] + cx * normal[2] + cy * binormal[2],
            ];
            data.normals.push(normalize(sub(vertex, p1)));
            data.vertices.push(vertex);
        }
    }

    for j in 1..=tubular {
        for i in 1..=radial {
            let a = (radial + 1) * (j - 1) + (i - 1);
            let b = (radial + 1) * j + (i - 1);
            let c = (radial + 1) * j + i;
            let d = (radial + 1) * (j - 1) + i;

            data.indices.extend_from_slice(&[a, b, d]);
            data.indices.extend_from_slice(&[b, c, d]);
        }
    }

    data
}

pub(crate) fn add(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub(crate) fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub(crate) fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub(crate) fn normalize(v: [f32; 3]) -> [f32; 3] {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length > 0.0 {
        [v[0] / length, v[1] / length, v[2] / length]
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length(v: [f32; 3]) -> f32 {
        (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(1.5, 8, 6);
        assert_eq!(sphere.vertex_count(), 9 * 7);
        assert_eq!(sphere.triangle_count(), 8 * 6 * 2);
        for v in &sphere.vertices {
            assert!((length(*v) - 1.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_clamps_tiny_resolution() {
        let sphere = generate_sphere(1.0, 1, 1);
        assert_eq!(sphere.vertex_count(), 4 * 3);
    }

    #[test]
    fn test_torus_knot_layout() {
        let params = TorusKnotParams::default();
        let knot = generate_torus_knot(&params);
        assert_eq!(knot.vertex_count(), 129 * 33);
        assert_eq!(knot.triangle_count(), 128 * 32 * 2);
        assert_eq!(knot.normals.len(), knot.vertex_count());
    }

    #[test]
    fn test_torus_knot_stays_within_tube_of_center_line() {
        let params = TorusKnotParams::default();
        let knot = generate_torus_knot(&params);
        // Outer bound: center line reaches radius * 1.5 in the xy-plane.
        let bound = params.radius * 1.5 + params.tube + 1e-3;
        for v in &knot.vertices {
            assert!(length(*v) <= bound);
        }
        for n in &knot.normals {
            assert!((length(*n) - 1.0).abs() < 1e-3);
        }
    }
}
