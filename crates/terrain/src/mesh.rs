//! Flat vertex and quad buffers handed to mesh consumers.

use serde::{Deserialize, Serialize};

/// Vertex positions plus quad faces describing a terrain surface.
///
/// Vertices are stored row-major (`row * size + col`). Each face lists four
/// vertex indices counter-clockwise when viewed from +z:
/// `(j*size+i, j*size+i+1, (j+1)*size+i+1, (j+1)*size+i)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<[f64; 3]>,
    pub faces: Vec<[usize; 4]>,
}

impl Mesh {
    /// Wraps a row-major vertex buffer of a `size x size` grid and builds
    /// its quad list.
    pub(crate) fn from_grid(vertices: Vec<[f64; 3]>, size: usize) -> Self {
        debug_assert_eq!(vertices.len(), size * size);
        Self {
            vertices,
            faces: quad_faces(size),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Splits every quad along its `a-c` diagonal.
    ///
    /// For consumers that only accept triangle lists. Winding is preserved.
    pub fn triangulate(&self) -> Vec<[usize; 3]> {
        self.faces
            .iter()
            .flat_map(|&[a, b, c, d]| [[a, b, c], [a, c, d]])
            .collect()
    }

    /// Rotates every vertex about the origin by XYZ Euler angles in radians
    /// (x applied first, then y, then z).
    pub fn rotate(&mut self, euler: [f64; 3]) {
        if euler == [0.0; 3] {
            return;
        }
        let (sx, cx) = euler[0].sin_cos();
        let (sy, cy) = euler[1].sin_cos();
        let (sz, cz) = euler[2].sin_cos();

        // Rz * Ry * Rx
        let m = [
            [cy * cz, sx * sy * cz - cx * sz, cx * sy * cz + sx * sz],
            [cy * sz, sx * sy * sz + cx * cz, cx * sy * sz - sx * cz],
            [-sy, sx * cy, cx * cy],
        ];
        for v in &mut self.vertices {
            let [x, y, z] = *v;
            *v = [
                m[0][0] * x + m[0][1] * y + m[0][2] * z,
                m[1][0] * x + m[1][1] * y + m[1][2] * z,
                m[2][0] * x + m[2][1] * y + m[2][2] * z,
            ];
        }
    }

    /// Moves every vertex by `offset`.
    pub fn translate(&mut self, offset: [f64; 3]) {
        for v in &mut self.vertices {
            v[0] += offset[0];
            v[1] += offset[1];
            v[2] += offset[2];
        }
    }
}

/// Quad list for a `size x size` vertex grid, rows outer, columns inner.
fn quad_faces(size: usize) -> Vec<[usize; 4]> {
    let cells = size.saturating_sub(1);
    let mut faces = Vec::with_capacity(cells * cells);

    for j in 0..cells {
        for i in 0..cells {
            faces.push([
                j * size + i,
                j * size + i + 1,
                (j + 1) * size + i + 1,
                (j + 1) * size + i,
            ]);
        }
    }

    faces
}
