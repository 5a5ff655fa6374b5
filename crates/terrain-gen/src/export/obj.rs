//! Wavefront OBJ output.

use std::io::Write;

use terrain::Mesh;
use tracing::debug;

use super::{ExportError, MeshSink};

/// Writes a mesh as a single OBJ object.
///
/// The output includes:
/// - An `o` line naming the object
/// - One `v x y z` line per vertex, six decimal places
/// - One `f a b c d` line per quad, with OBJ's 1-based indices, or two
///   `f a b c` lines per quad when `triangulate` is set
pub fn write_obj<W: Write>(
    mesh: &Mesh,
    name: &str,
    triangulate: bool,
    writer: &mut W,
) -> std::io::Result<()> {
    writeln!(writer, "# diamond-square terrain")?;
    writeln!(writer, "o {}", sanitize_name(name))?;

    for [x, y, z] in &mesh.vertices {
        writeln!(writer, "v {x:.6} {y:.6} {z:.6}")?;
    }

    if triangulate {
        for [a, b, c] in mesh.triangulate() {
            writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
        }
    } else {
        for [a, b, c, d] in &mesh.faces {
            writeln!(writer, "f {} {} {} {}", a + 1, b + 1, c + 1, d + 1)?;
        }
    }

    Ok(())
}

/// OBJ names end at whitespace.
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        "Terrain".to_string()
    } else {
        cleaned
    }
}

pub struct ObjSink<W: Write> {
    writer: W,
    triangulate: bool,
}

impl<W: Write> ObjSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            triangulate: false,
        }
    }

    /// Emit triangles instead of quads, for importers that reject n-gons.
    pub fn triangulated(mut self) -> Self {
        self.triangulate = true;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MeshSink for ObjSink<W> {
    fn accept(&mut self, name: &str, mesh: &Mesh) -> Result<(), ExportError> {
        debug!(
            name,
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "Writing OBJ"
        );
        write_obj(mesh, name, self.triangulate, &mut self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
