//! Summary statistics over generated terrain.

use terrain::Mesh;

/// Elevation range and mean of a mesh, in output (scaled) units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub vertex_count: usize,
}

impl ElevationStats {
    /// Returns `None` for a mesh without vertices.
    pub fn from_mesh(mesh: &Mesh) -> Option<Self> {
        if mesh.vertices.is_empty() {
            return None;
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut total = 0.0;
        for v in &mesh.vertices {
            min = min.min(v[2]);
            max = max.max(v[2]);
            total += v[2];
        }

        Some(Self {
            min,
            max,
            mean: total / mesh.vertices.len() as f64,
            vertex_count: mesh.vertices.len(),
        })
    }

    pub fn relief(&self) -> f64 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_over_known_mesh() {
        let mesh = Mesh {
            vertices: vec![[0.0, 0.0, -1.0], [1.0, 0.0, 3.0], [0.0, 1.0, 1.0]],
            faces: Vec::new(),
        };
        let stats = ElevationStats::from_mesh(&mesh).unwrap();
        assert_eq!(stats.min, -1.0);
        assert_eq!(stats.max, 3.0);
        assert_eq!(stats.mean, 1.0);
        assert_eq!(stats.relief(), 4.0);
        assert_eq!(stats.vertex_count, 3);
    }

    #[test]
    fn test_empty_mesh_has_no_stats() {
        let mesh = Mesh {
            vertices: Vec::new(),
            faces: Vec::new(),
        };
        assert!(ElevationStats::from_mesh(&mesh).is_none());
    }
}
