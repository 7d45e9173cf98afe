//! Platonic solids subdivided onto a sphere
//!
//! Each base triangle is split into `(detail + 1)^2` triangles and every
//! resulting vertex is pushed out to `radius`. The output is non-indexed
//! (three vertices per triangle), so vertex counts are
//! `faces * (detail + 1)^2 * 3`.

use super::primitives::{cross, normalize, sub};
use super::GeometryData;

/// Golden ratio
const PHI: f32 = 1.618_034;

pub fn generate_octahedron(radius: f32, detail: u32) -> GeometryData {
    #[rustfmt::skip]
    let vertices = [
        [1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0, -1.0],
    ];
    #[rustfmt::skip]
    let faces = [
        [0, 2, 4], [0, 4, 3], [0, 3, 5], [0, 5, 2],
        [1, 2, 5], [1, 5, 3], [1, 3, 4], [1, 4, 2],
    ];
    generate_polyhedron(&vertices, &faces, radius, detail)
}

pub fn generate_icosahedron(radius: f32, detail: u32) -> GeometryData {
    let t = PHI;
    #[rustfmt::skip]
    let vertices = [
        [-1.0, t, 0.0], [1.0, t, 0.0], [-1.0, -t, 0.0], [1.0, -t, 0.0],
        [0.0, -1.0, t], [0.0, 1.0, t], [0.0, -1.0, -t], [0.0, 1.0, -t],
        [t, 0.0, -1.0], [t, 0.0, 1.0], [-t, 0.0, -1.0], [-t, 0.0, 1.0],
    ];
    #[rustfmt::skip]
    let faces = [
        [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
        [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
        [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
        [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
    ];
    generate_polyhedron(&vertices, &faces, radius, detail)
}

pub fn generate_dodecahedron(radius: f32, detail: u32) -> GeometryData {
    let t = PHI;
    let r = 1.0 / t;
    #[rustfmt::skip]
    let vertices = [
        // (±1, ±1, ±1)
        [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0],
        [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0],
        // (0, ±1/φ, ±φ)
        [0.0, -r, -t], [0.0, -r, t], [0.0, r, -t], [0.0, r, t],
        // (±1/φ, ±φ, 0)
        [-r, -t, 0.0], [-r, t, 0.0], [r, -t, 0.0], [r, t, 0.0],
        // (±φ, 0, ±1/φ)
        [-t, 0.0, -r], [t, 0.0, -r], [-t, 0.0, r], [t, 0.0, r],
    ];
    // Twelve pentagons, three triangles each
    #[rustfmt::skip]
    let faces = [
        [3, 11, 7], [3, 7, 15], [3, 15, 13],
        [7, 19, 17], [7, 17, 6], [7, 6, 15],
        [17, 4, 8], [17, 8, 10], [17, 10, 6],
        [8, 0, 16], [8, 16, 2], [8, 2, 10],
        [0, 12, 1], [0, 1, 18], [0, 18, 16],
        [6, 10, 2], [6, 2, 13], [6, 13, 15],
        [2, 16, 18], [2, 18, 3], [2, 3, 13],
        [18, 1, 9], [18, 9, 11], [18, 11, 3],
        [4, 14, 12], [4, 12, 0], [4, 0, 8],
        [11, 9, 5], [11, 5, 19], [11, 19, 7],
        [19, 5, 14], [19, 14, 4], [19, 4, 17],
        [1, 12, 14], [1, 14, 5], [1, 5, 9],
    ];
    generate_polyhedron(&vertices, &faces, radius, detail)
}

/// Subdivides `faces` and projects the result onto a sphere of `radius`.
///
/// With `detail == 0` the solid keeps flat face normals; with any subdivision
/// normals follow the sphere so the result shades smoothly.
pub fn generate_polyhedron(
    base_vertices: &[[f32; 3]],
    faces: &[[usize; 3]],
    radius: f32,
    detail: u32,
) -> GeometryData {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    for face in faces {
        let a = base_vertices[face[0]];
        let b = base_vertices[face[1]];
        let c = base_vertices[face[2]];
        subdivide_face(a, b, c, detail, &mut positions);
    }

    let mut data = GeometryData::new();
    for position in positions {
        let unit = normalize(position);
        data.vertices
            .push([unit[0] * radius, unit[1] * radius, unit[2] * radius]);
        data.normals.push(unit);
    }

    if detail == 0 {
        for triangle in 0..data.vertices.len() / 3 {
            let i = triangle * 3;
            let [a, b, c] = [data.vertices[i], data.vertices[i + 1], data.vertices[i + 2]];
            let face_normal = normalize(cross(sub(b, a), sub(c, a)));
            data.normals[i..i + 3].fill(face_normal);
        }
    }

    data.indices = (0..data.vertices.len() as u32).collect();
    data
}

/// Emits the triangles of one base face split into `(detail + 1)^2` pieces.
fn subdivide_face(a: [f32; 3], b: [f32; 3], c: [f32; 3], detail: u32, out: &mut Vec<[f32; 3]>) {
    let cols = detail as usize + 1;

    // rows[i][j]: i-th row from edge ab towards c, j-th point along the row
    let mut rows: Vec<Vec<[f32; 3]>> = Vec::with_capacity(cols + 1);
    for i in 0..=cols {
        let t = i as f32 / cols as f32;
        let aj = lerp(a, c, t);
        let bj = lerp(b, c, t);
        let row_len = cols - i;
        let row = (0..=row_len)
            .map(|j| {
                if row_len == 0 {
                    aj
                } else {
                    lerp(aj, bj, j as f32 / row_len as f32)
                }
            })
            .collect();
        rows.push(row);
    }

    for i in 0..cols {
        for j in 0..2 * (cols - i) - 1 {
            let k = j / 2;
            if j % 2 == 0 {
                out.push(rows[i][k + 1]);
                out.push(rows[i + 1][k]);
                out.push(rows[i][k]);
            } else {
                out.push(rows[i][k + 1]);
                out.push(rows[i + 1][k + 1]);
                out.push(rows[i + 1][k]);
            }
        }
    }
}

fn lerp(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    #[test]
    fn test_subdivision_counts() {
        assert_eq!(generate_octahedron(1.0, 0).vertex_count(), 8 * 3);
        assert_eq!(generate_octahedron(1.0, 2).vertex_count(), 8 * 9 * 3);
        assert_eq!(generate_icosahedron(1.0, 1).vertex_count(), 20 * 4 * 3);
        assert_eq!(generate_dodecahedron(1.0, 1).vertex_count(), 36 * 4 * 3);
    }

    #[test]
    fn test_vertices_lie_on_sphere() {
        for data in [
            generate_octahedron(1.5, 2),
            generate_icosahedron(1.5, 1),
            generate_dodecahedron(1.5, 1),
        ] {
            for v in &data.vertices {
                assert!((dot(*v, *v).sqrt() - 1.5).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_faces_wind_outwards() {
        for data in [
            generate_octahedron(1.0, 0),
            generate_icosahedron(1.0, 0),
            generate_dodecahedron(1.0, 0),
            generate_icosahedron(1.0, 1),
        ] {
            for tri in data.vertices.chunks_exact(3) {
                let n = cross(sub(tri[1], tri[0]), sub(tri[2], tri[0]));
                let centroid = [
                    tri[0][0] + tri[1][0] + tri[2][0],
                    tri[0][1] + tri[1][1] + tri[2][1],
                    tri[0][2] + tri[1][2] + tri[2][2],
                ];
                assert!(dot(n, centroid) > 0.0);
            }
        }
    }

    #[test]
    fn test_flat_normals_without_detail() {
        let octahedron = generate_octahedron(1.0, 0);
        let n = octahedron.normals[0];
        assert_eq!(octahedron.normals[1], n);
        assert_eq!(octahedron.normals[2], n);
        let expected = 1.0 / 3.0_f32.sqrt();
        assert!(n.iter().all(|c| (c.abs() - expected).abs() < 1e-4));
    }
}
