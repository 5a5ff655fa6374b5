//! Terrain operator and tooling around the diamond-square generator.
//!
//! This crate wires [`terrain`] into something a user can run: the operator
//! with its bounded properties, layered configuration, mesh exporters and
//! elevation statistics.
//!
//! # Quick Start
//!
//! ```rust
//! use terrain_gen::prelude::*;
//!
//! let mut collector = MeshCollector::new();
//! TerrainOperator::new()
//!     .with_order(4)
//!     .with_size(10.0, 2.0, 10.0)
//!     .with_seed(12345)
//!     .execute("Terrain", &mut collector)?;
//!
//! assert_eq!(collector.meshes.len(), 1);
//! # Ok::<(), ExportError>(())
//! ```

pub mod config;
pub mod export;
pub mod operator;
pub mod run;
pub mod stats;

pub use terrain::{Mesh, TerrainError, TerrainParams};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{ConfigError, GeneratorConfig};
    pub use crate::export::{
        ExportError, JsonSink, MeshCollector, MeshSink, ObjSink, OutputFormat,
    };
    pub use crate::operator::TerrainOperator;
    pub use crate::run::write_terrain;
    pub use crate::stats::ElevationStats;
    pub use crate::{Mesh, TerrainError, TerrainParams};
}
