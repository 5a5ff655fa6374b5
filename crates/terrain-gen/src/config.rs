//! Configuration for terrain generation runs.
//!
//! Values are layered: built-in defaults, then a JSON file named by
//! `TERRAIN_CONFIG`, then individual `TERRAIN_*` environment variables.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use terrain::{DEFAULT_MAX_CELLS, TerrainError, TerrainParams};
use thiserror::Error;

use crate::export::OutputFormat;
use crate::operator::{MAX_SCALE, MIN_SCALE, TerrainOperator};

pub const CONFIG_VAR: &str = "TERRAIN_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },

    #[error(transparent)]
    Terrain(#[from] TerrainError),
}

/// Everything a generation run needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Order, seamless flag and scale.
    pub terrain: TerrainParams,

    /// Fixed seed; random terrain when absent.
    pub seed: Option<u64>,

    /// Placement of the finished mesh.
    pub location: [f64; 3],

    /// XYZ Euler rotation in radians, applied before `location`.
    pub rotation: [f64; 3],

    /// Upper bound on grid cells.
    pub max_cells: u64,

    /// Object name written into the output.
    pub name: String,

    pub format: OutputFormat,

    /// Split quads into triangles (OBJ only).
    pub triangulate: bool,

    /// Output file. Standard output when absent.
    pub output: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            terrain: TerrainParams::default(),
            seed: None,
            location: [0.0; 3],
            rotation: [0.0; 3],
            max_cells: DEFAULT_MAX_CELLS,
            name: "Terrain".to_string(),
            format: OutputFormat::Obj,
            triangulate: false,
            output: None,
        }
    }
}

impl GeneratorConfig {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_VAR) {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects terrain settings outside the operator's property bounds.
    ///
    /// Configured values are never clamped: a bad order or scale in a file
    /// or variable is reported as an invalid argument.
    pub fn validate(&self) -> Result<(), TerrainError> {
        self.terrain.validate()?;
        for (name, value) in [
            ("width", self.terrain.width),
            ("height", self.terrain.height),
            ("depth", self.terrain.depth),
        ] {
            if !(MIN_SCALE..=MAX_SCALE).contains(&value) {
                return Err(TerrainError::InvalidArgument(format!(
                    "{name} must be in [{MIN_SCALE}, {MAX_SCALE}], got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Reads a JSON config file. Missing keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_overrides<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(order) = parse_var(lookup, "TERRAIN_ORDER")? {
            self.terrain.order = order;
        }
        if let Some(value) = lookup("TERRAIN_SEAMLESS") {
            self.terrain.seamless = parse_bool(&value).ok_or(ConfigError::InvalidEnv {
                var: "TERRAIN_SEAMLESS",
                value,
            })?;
        }
        if let Some(width) = parse_var(lookup, "TERRAIN_WIDTH")? {
            self.terrain.width = width;
        }
        if let Some(height) = parse_var(lookup, "TERRAIN_HEIGHT")? {
            self.terrain.height = height;
        }
        if let Some(depth) = parse_var(lookup, "TERRAIN_DEPTH")? {
            self.terrain.depth = depth;
        }
        if let Some(seed) = parse_var(lookup, "TERRAIN_SEED")? {
            self.seed = Some(seed);
        }
        if let Some(max_cells) = parse_var(lookup, "TERRAIN_MAX_CELLS")? {
            self.max_cells = max_cells;
        }
        if let Some(format) = parse_var(lookup, "TERRAIN_FORMAT")? {
            self.format = format;
        }
        if let Some(value) = lookup("TERRAIN_TRIANGULATE") {
            self.triangulate = parse_bool(&value).ok_or(ConfigError::InvalidEnv {
                var: "TERRAIN_TRIANGULATE",
                value,
            })?;
        }
        if let Some(name) = lookup("TERRAIN_NAME") {
            self.name = name;
        }
        if let Some(output) = lookup("TERRAIN_OUTPUT") {
            self.output = Some(PathBuf::from(output));
        }
        Ok(())
    }

    /// Operator carrying this configuration's properties.
    pub fn operator(&self) -> TerrainOperator {
        let mut op = TerrainOperator::new()
            .with_order(self.terrain.order)
            .with_seamless(self.terrain.seamless)
            .with_size(self.terrain.width, self.terrain.height, self.terrain.depth)
            .with_location(self.location)
            .with_rotation(self.rotation)
            .with_max_cells(self.max_cells);
        op.seed = self.seed;
        op
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    let parsed: Result<T, _> = value.trim().parse();
    match parsed {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(ConfigError::InvalidEnv { var, value }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
