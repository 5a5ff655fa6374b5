//! JSON mesh documents.

use std::io::Write;

use serde::Serialize;
use terrain::Mesh;
use tracing::debug;

use super::{ExportError, MeshSink};

/// Serialized form of a named mesh.
#[derive(Debug, Serialize)]
pub struct MeshDocument<'a> {
    pub name: &'a str,
    pub vertices: &'a [[f64; 3]],
    pub faces: &'a [[usize; 4]],
}

impl<'a> MeshDocument<'a> {
    pub fn new(name: &'a str, mesh: &'a Mesh) -> Self {
        Self {
            name,
            vertices: &mesh.vertices,
            faces: &mesh.faces,
        }
    }
}

pub struct JsonSink<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    /// Indent the output. Useful for small meshes inspected by hand.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MeshSink for JsonSink<W> {
    fn accept(&mut self, name: &str, mesh: &Mesh) -> Result<(), ExportError> {
        debug!(name, vertices = mesh.vertex_count(), "Writing JSON mesh");
        let doc = MeshDocument::new(name, mesh);
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &doc)?;
        } else {
            serde_json::to_writer(&mut self.writer, &doc)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
