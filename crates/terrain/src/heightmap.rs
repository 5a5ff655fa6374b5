//! Square elevation grid backing the generator.

use crate::mesh::Mesh;

/// A `(2^order + 1)` square grid of elevations.
///
/// Cells are stored row-major in a single buffer and addressed as
/// `row * size + col`. Planar coordinates are implied by the cell position
/// (`x = col / size`, `y = row / size`); only the elevation is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    order: u32,
    size: usize,
    elevations: Vec<f64>,
}

impl Heightmap {
    /// Allocates a flat grid. The caller has already validated `order`
    /// against the cell limit.
    pub(crate) fn zeroed(order: u32) -> Self {
        let size = (1usize << order) + 1;
        Self {
            order,
            size,
            elevations: vec![0.0; size * size],
        }
    }

    /// Recursion depth the grid was allocated for.
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Side length in cells (always odd).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Elevation at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside the grid.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.elevations[self.index(row, col)]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, z: f64) {
        let idx = self.index(row, col);
        self.elevations[idx] = z;
    }

    /// One row of elevations, left to right.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.size;
        &self.elevations[start..start + self.size]
    }

    /// Iterates over one column of elevations, top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        self.elevations.iter().skip(col).step_by(self.size).copied()
    }

    /// All elevations in row-major order.
    pub fn elevations(&self) -> &[f64] {
        &self.elevations
    }

    /// Applies the final scaling pass and emits the quad mesh.
    ///
    /// `width` scales x, `depth` scales y and `height` scales z. The grid is
    /// consumed; it is not needed once the vertex buffer exists.
    pub fn into_mesh(self, width: f64, height: f64, depth: f64) -> Mesh {
        let size = self.size;
        let side = size as f64;
        let mut vertices = Vec::with_capacity(size * size);

        for row in 0..size {
            for col in 0..size {
                let z = self.elevations[row * size + col];
                vertices.push([
                    col as f64 / side * width,
                    row as f64 / side * depth,
                    z * height,
                ]);
            }
        }

        Mesh::from_grid(vertices, size)
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.size && col < self.size,
            "cell ({row}, {col}) outside {0}x{0} grid",
            self.size
        );
        row * self.size + col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_grid_dimensions() {
        let grid = Heightmap::zeroed(3);
        assert_eq!(grid.size(), 9);
        assert_eq!(grid.elevations().len(), 81);
        assert!(grid.elevations().iter().all(|&z| z == 0.0));
    }

    #[test]
    fn test_row_and_column_views() {
        let mut grid = Heightmap::zeroed(1);
        grid.set(0, 2, 1.5);
        grid.set(2, 0, -0.5);

        assert_eq!(grid.row(0), &[0.0, 0.0, 1.5]);
        assert_eq!(grid.column(0).collect::<Vec<_>>(), vec![0.0, 0.0, -0.5]);
        assert_eq!(grid.get(0, 2), 1.5);
    }

    #[test]
    fn test_into_mesh_planar_coordinates() {
        let mut grid = Heightmap::zeroed(1);
        grid.set(1, 2, 0.25);

        let mesh = grid.into_mesh(3.0, 4.0, 6.0);
        assert_eq!(mesh.vertices.len(), 9);

        // row 1, col 2 -> vertex 5
        let v = mesh.vertices[5];
        assert!((v[0] - 2.0 / 3.0 * 3.0).abs() < 1e-12);
        assert!((v[1] - 1.0 / 3.0 * 6.0).abs() < 1e-12);
        assert!((v[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_range_access_panics() {
        let grid = Heightmap::zeroed(1);
        grid.get(3, 0);
    }
}
