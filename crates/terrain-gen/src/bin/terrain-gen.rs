//! Generates one terrain mesh and writes it as OBJ or JSON.
//!
//! Run with:
//! ```
//! TERRAIN_ORDER=7 TERRAIN_SEED=12345 TERRAIN_OUTPUT=terrain.obj \
//!     cargo run -p terrain-gen --bin terrain-gen
//! ```

use std::io;

use anyhow::Context;
use terrain_gen::prelude::*;
use terrain_gen::run::write_terrain;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Standard output may carry the mesh itself, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = GeneratorConfig::load().context("loading terrain configuration")?;

    tracing::info!(
        order = config.terrain.order,
        seamless = config.terrain.seamless,
        seed = ?config.seed,
        "Generating terrain"
    );

    let mesh = write_terrain(&config)?;

    // Summary output
    tracing::info!("Terrain completed!");
    tracing::info!("  Vertices: {}", mesh.vertex_count());
    tracing::info!("  Faces: {}", mesh.face_count());
    if let Some(stats) = ElevationStats::from_mesh(&mesh) {
        tracing::info!(
            "  Elevation: min {:.4}, max {:.4}, mean {:.4}",
            stats.min,
            stats.max,
            stats.mean
        );
    }
    if let Some(path) = &config.output {
        tracing::info!("  Written to {}", path.display());
    }

    Ok(())
}
