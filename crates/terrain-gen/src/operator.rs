//! "Add Terrain (Diamond Square)" operator.
//!
//! Thin adapter between a host's property panel and the generator: it owns
//! the user-facing properties and their bounds, runs the generator, places
//! the result and hands it to a [`MeshSink`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use terrain::{DEFAULT_MAX_CELLS, MAX_ORDER, MIN_ORDER, Mesh, TerrainGenerator, TerrainParams};
use tracing::{info, warn};

use crate::export::{ExportError, MeshSink};

/// Lower bound of the width/height/depth properties.
pub const MIN_SCALE: f64 = 0.01;
/// Upper bound of the width/height/depth properties.
pub const MAX_SCALE: f64 = 100.0;

/// Property set of the terrain operator.
#[derive(Debug, Clone)]
pub struct TerrainOperator {
    /// Terrain width (x scale).
    pub width: f64,
    /// Terrain height (z scale).
    pub height: f64,
    /// Terrain depth (y scale).
    pub depth: f64,
    /// Terrain order; grid side is `2^order + 1`.
    pub order: u32,
    /// Seamless edges.
    pub seamless: bool,
    /// Where the finished object is placed.
    pub location: [f64; 3],
    /// XYZ Euler rotation in radians, applied before `location`.
    pub rotation: [f64; 3],
    /// Fixed seed for reproducible terrain.
    pub seed: Option<u64>,
    /// Cell budget passed through to the generator.
    pub max_cells: u64,
}

impl Default for TerrainOperator {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
            order: 5,
            seamless: false,
            location: [0.0; 3],
            rotation: [0.0; 3],
            seed: None,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl TerrainOperator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn with_seamless(mut self, seamless: bool) -> Self {
        self.seamless = seamless;
        self
    }

    /// Sets width, height and depth.
    pub fn with_size(mut self, width: f64, height: f64, depth: f64) -> Self {
        self.width = width;
        self.height = height;
        self.depth = depth;
        self
    }

    pub fn with_location(mut self, location: [f64; 3]) -> Self {
        self.location = location;
        self
    }

    pub fn with_rotation(mut self, rotation: [f64; 3]) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_cells(mut self, max_cells: u64) -> Self {
        self.max_cells = max_cells;
        self
    }

    /// Generator parameters with every property clamped to its bounds.
    ///
    /// NaN passes through untouched and is rejected by the generator.
    pub fn params(&self) -> TerrainParams {
        TerrainParams {
            order: clamp_order(self.order),
            seamless: self.seamless,
            width: clamp_scale("width", self.width),
            height: clamp_scale("height", self.height),
            depth: clamp_scale("depth", self.depth),
        }
    }

    /// Generates and places the mesh using the configured seed, or the
    /// thread-local RNG when none is set.
    pub fn build_mesh(&self) -> Result<Mesh, ExportError> {
        match self.seed {
            Some(seed) => self.build_mesh_with(&mut StdRng::seed_from_u64(seed)),
            None => self.build_mesh_with(&mut rand::thread_rng()),
        }
    }

    /// Generates and places the mesh with a caller-supplied RNG.
    pub fn build_mesh_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Mesh, ExportError> {
        let params = self.params();
        let generator = TerrainGenerator::new(params)?.with_max_cells(self.max_cells);
        let mut mesh = generator.generate(rng)?;
        mesh.rotate(self.rotation);
        mesh.translate(self.location);
        Ok(mesh)
    }

    /// Runs the operator and passes the mesh to `sink` under `name`.
    pub fn execute(&self, name: &str, sink: &mut dyn MeshSink) -> Result<Mesh, ExportError> {
        let mesh = self.build_mesh()?;
        sink.accept(name, &mesh)?;
        info!(
            name,
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "Terrain added"
        );
        Ok(mesh)
    }
}

fn clamp_order(order: u32) -> u32 {
    let clamped = order.clamp(MIN_ORDER, MAX_ORDER);
    if clamped != order {
        warn!(order, clamped, "Order out of range, clamping");
    }
    clamped
}

fn clamp_scale(name: &str, value: f64) -> f64 {
    let clamped = value.clamp(MIN_SCALE, MAX_SCALE);
    if clamped != value && !value.is_nan() {
        warn!(property = name, value, clamped, "Scale out of range, clamping");
    }
    clamped
}
