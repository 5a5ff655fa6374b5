//! One configured generation run, from parameters to written output.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use terrain::Mesh;
use tracing::info;

use crate::config::GeneratorConfig;
use crate::export::ExportError;

/// Generates the configured terrain and writes it to the configured output.
///
/// The mesh is built before the output is opened, so a rejected request
/// leaves an existing output file untouched.
pub fn write_terrain(config: &GeneratorConfig) -> Result<Mesh, ExportError> {
    let mesh = config.operator().build_mesh()?;

    let writer: Box<dyn Write> = match &config.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut sink = config.format.sink(writer, config.triangulate);
    sink.accept(&config.name, &mesh)?;

    info!(
        name = %config.name,
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "Terrain written"
    );
    Ok(mesh)
}
