//! Diamond-square elevation generation.

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::TerrainError;
use crate::heightmap::Heightmap;
use crate::mesh::Mesh;

/// Smallest accepted order (3x3 grid).
pub const MIN_ORDER: u32 = 1;
/// Largest accepted order (65537x65537 grid).
pub const MAX_ORDER: u32 = 16;
/// Default cell budget. Admits orders up to 12 (4097x4097).
pub const DEFAULT_MAX_CELLS: u64 = 1 << 26;

/// Parameters of a single terrain request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    /// Grid side is `2^order + 1`.
    pub order: u32,
    /// Force opposite edges to match so the terrain tiles.
    pub seamless: bool,
    /// Scale applied to x.
    pub width: f64,
    /// Scale applied to z (elevation).
    pub height: f64,
    /// Scale applied to y.
    pub depth: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            order: 5,
            seamless: false,
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        }
    }
}

impl TerrainParams {
    pub fn new(order: u32) -> Self {
        Self {
            order,
            ..Default::default()
        }
    }

    pub fn seamless(mut self, seamless: bool) -> Self {
        self.seamless = seamless;
        self
    }

    /// Sets the final `(width, height, depth)` scale.
    pub fn with_scale(mut self, width: f64, height: f64, depth: f64) -> Self {
        self.width = width;
        self.height = height;
        self.depth = depth;
        self
    }

    /// Checks order and scale bounds.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if !(MIN_ORDER..=MAX_ORDER).contains(&self.order) {
            return Err(TerrainError::invalid(format!(
                "order must be in [{MIN_ORDER}, {MAX_ORDER}], got {}",
                self.order
            )));
        }

        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TerrainError::invalid(format!(
                    "{name} must be a positive finite number, got {value}"
                )));
            }
        }

        Ok(())
    }

    fn cell_count(&self) -> u64 {
        let side = (1u64 << self.order) + 1;
        side * side
    }
}

/// Generates diamond-square heightmaps for a fixed set of parameters.
///
/// Randomness is injected per call so the same generator can produce
/// reproducible output from a seeded RNG or fresh output from an entropy
/// source.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    params: TerrainParams,
    max_cells: u64,
}

impl TerrainGenerator {
    /// Creates a generator, rejecting invalid parameters up front.
    pub fn new(params: TerrainParams) -> Result<Self, TerrainError> {
        params.validate()?;
        Ok(Self {
            params,
            max_cells: DEFAULT_MAX_CELLS,
        })
    }

    /// Sets the maximum number of grid cells a request may allocate.
    pub fn with_max_cells(mut self, max_cells: u64) -> Self {
        self.max_cells = max_cells;
        self
    }

    /// Generates the scaled terrain mesh.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Mesh, TerrainError> {
        let grid = self.generate_heightmap(rng)?;
        let TerrainParams {
            width,
            height,
            depth,
            ..
        } = self.params;
        Ok(grid.into_mesh(width, height, depth))
    }

    /// Runs the diamond-square passes and returns the unscaled grid.
    pub fn generate_heightmap<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Heightmap, TerrainError> {
        let requested = self.params.cell_count();
        if requested > self.max_cells {
            return Err(TerrainError::ResourceLimitExceeded {
                requested,
                limit: self.max_cells,
            });
        }

        let TerrainParams {
            order, seamless, ..
        } = self.params;
        debug!(order, seamless, cells = requested, "Generating heightmap");

        let mut grid = Heightmap::zeroed(order);
        let mut noise = Displacement::new(rng);

        if !seamless {
            seed_corners(&mut grid, &mut noise);
        }

        for k in 0..order {
            subdivide(&mut grid, k, seamless, &mut noise);
        }

        Ok(grid)
    }
}

/// Uniform displacement source in `[-0.5, 0.5)`.
struct Displacement<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
    range: Uniform<f64>,
}

impl<'a, R: Rng + ?Sized> Displacement<'a, R> {
    fn new(rng: &'a mut R) -> Self {
        Self {
            rng,
            range: Uniform::new(-0.5, 0.5),
        }
    }

    fn sample(&mut self) -> f64 {
        self.range.sample(&mut *self.rng)
    }
}

/// Gives each corner an independent random elevation.
fn seed_corners<R: Rng + ?Sized>(grid: &mut Heightmap, noise: &mut Displacement<'_, R>) {
    let last = grid.size() - 1;
    for row in [0, last] {
        for col in [0, last] {
            grid.set(row, col, noise.sample());
        }
    }
}

/// One level of refinement: diamond centres, then horizontal and vertical
/// edge midpoints.
fn subdivide<R: Rng + ?Sized>(
    grid: &mut Heightmap,
    k: u32,
    seamless: bool,
    noise: &mut Displacement<'_, R>,
) {
    let step = 1usize << (grid.order() - k);
    let half = step / 2;
    let n = 1usize << k;
    let factor = 1.0 / (2 * n) as f64;
    debug!(k, step, halfstep = half, n, factor, "Refining level");

    diamond_step(grid, step, n, factor, noise);
    horizontal_edges(grid, step, n, factor, seamless, noise);
    vertical_edges(grid, step, n, factor, seamless, noise);
}

fn diamond_step<R: Rng + ?Sized>(
    grid: &mut Heightmap,
    step: usize,
    n: usize,
    factor: f64,
    noise: &mut Displacement<'_, R>,
) {
    let half = step / 2;
    for j in 0..n {
        for i in 0..n {
            let (top, left) = (j * step, i * step);
            let avg = (grid.get(top, left)
                + grid.get(top, left + step)
                + grid.get(top + step, left)
                + grid.get(top + step, left + step))
                / 4.0;
            grid.set(top + half, left + half, avg + noise.sample() * factor);
        }
    }
}

/// Midpoints of horizontal edges, at `(j*step, i*step + half)`.
///
/// Each takes its two edge ends plus the diamond centres above and below
/// that exist inside the grid. In seamless mode the last row is not
/// computed; it receives a copy of row 0 afterwards.
fn horizontal_edges<R: Rng + ?Sized>(
    grid: &mut Heightmap,
    step: usize,
    n: usize,
    factor: f64,
    seamless: bool,
    noise: &mut Displacement<'_, R>,
) {
    let half = step / 2;
    let rows = if seamless { n } else { n + 1 };

    for j in 0..rows {
        for i in 0..n {
            let (row, left) = (j * step, i * step);
            let mut sum = grid.get(row, left) + grid.get(row, left + step);
            let mut count = 2.0;
            if j > 0 {
                sum += grid.get(row - half, left + half);
                count += 1.0;
            }
            if j < n {
                sum += grid.get(row + half, left + half);
                count += 1.0;
            }
            grid.set(row, left + half, sum / count + noise.sample() * factor);
        }
    }

    if seamless {
        let last = n * step;
        for i in 0..n {
            let col = i * step + half;
            grid.set(last, col, grid.get(0, col));
        }
    }
}

/// Midpoints of vertical edges, at `(j*step + half, i*step)`.
fn vertical_edges<R: Rng + ?Sized>(
    grid: &mut Heightmap,
    step: usize,
    n: usize,
    factor: f64,
    seamless: bool,
    noise: &mut Displacement<'_, R>,
) {
    let half = step / 2;
    let cols = if seamless { n } else { n + 1 };

    for j in 0..n {
        for i in 0..cols {
            let (top, col) = (j * step, i * step);
            let mut sum = grid.get(top, col) + grid.get(top + step, col);
            let mut count = 2.0;
            if i > 0 {
                sum += grid.get(top + half, col - half);
                count += 1.0;
            }
            if i < n {
                sum += grid.get(top + half, col + half);
                count += 1.0;
            }
            grid.set(top + half, col, sum / count + noise.sample() * factor);
        }
    }

    if seamless {
        let last = n * step;
        for j in 0..n {
            let row = j * step + half;
            grid.set(row, last, grid.get(row, 0));
        }
    }
}
