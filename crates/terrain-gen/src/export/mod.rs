//! Mesh sinks: the consumers a generated terrain is handed to.
//!
//! - [`ObjSink`]: Wavefront OBJ text
//! - [`JsonSink`]: JSON document with vertex and face arrays
//! - [`MeshCollector`]: keeps meshes in memory

mod json;
mod obj;

use terrain::{Mesh, TerrainError};
use thiserror::Error;

pub use json::{JsonSink, MeshDocument};
pub use obj::{ObjSink, write_obj};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Terrain(#[from] TerrainError),
}

/// Accepts a finished mesh and turns it into something renderable or
/// exportable.
pub trait MeshSink {
    fn accept(&mut self, name: &str, mesh: &Mesh) -> Result<(), ExportError>;
}

/// Stores every accepted mesh together with its name.
#[derive(Debug, Default)]
pub struct MeshCollector {
    pub meshes: Vec<(String, Mesh)>,
}

impl MeshCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MeshSink for MeshCollector {
    fn accept(&mut self, name: &str, mesh: &Mesh) -> Result<(), ExportError> {
        self.meshes.push((name.to_string(), mesh.clone()));
        Ok(())
    }
}

/// Output encodings supported by the command-line driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Obj,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "obj" => Ok(Self::Obj),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

impl OutputFormat {
    /// Boxes the sink for this format around `writer`. `triangulate` only
    /// affects OBJ; JSON always carries the quad list.
    pub fn sink<'w, W: std::io::Write + 'w>(
        self,
        writer: W,
        triangulate: bool,
    ) -> Box<dyn MeshSink + 'w> {
        match self {
            Self::Obj if triangulate => Box::new(ObjSink::new(writer).triangulated()),
            Self::Obj => Box::new(ObjSink::new(writer)),
            Self::Json => Box::new(JsonSink::new(writer)),
        }
    }
}
