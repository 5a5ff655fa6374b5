//! Diamond-square fractal terrain.
//!
//! Builds a `(2^order + 1)` square heightmap by recursive midpoint
//! displacement and emits it as a flat vertex buffer plus a quad index list,
//! ready for any mesh consumer (editor, exporter, renderer).
//!
//! # Quick Start
//!
//! ```rust
//! use terrain::{TerrainParams, generate};
//!
//! let params = TerrainParams::new(4).with_scale(10.0, 2.0, 10.0);
//! let mesh = generate(&params, Some(42)).unwrap();
//!
//! assert_eq!(mesh.vertex_count(), 17 * 17);
//! assert_eq!(mesh.face_count(), 16 * 16);
//! ```

pub mod errors;
pub mod generator;
pub mod heightmap;
pub mod mesh;

use rand::SeedableRng;
use rand::rngs::StdRng;

pub use errors::TerrainError;
pub use generator::{DEFAULT_MAX_CELLS, MAX_ORDER, MIN_ORDER, TerrainGenerator, TerrainParams};
pub use heightmap::Heightmap;
pub use mesh::Mesh;

/// Generates a terrain mesh with the default cell limit.
///
/// A `seed` makes the output reproducible; without one the thread-local
/// generator is used.
pub fn generate(params: &TerrainParams, seed: Option<u64>) -> Result<Mesh, TerrainError> {
    let generator = TerrainGenerator::new(*params)?;
    match seed {
        Some(seed) => generator.generate(&mut StdRng::seed_from_u64(seed)),
        None => generator.generate(&mut rand::thread_rng()),
    }
}
