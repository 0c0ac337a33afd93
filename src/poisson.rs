use rand_core::RngCore;
use std::f64::consts::{PI, SQRT_2};
use tracing::{debug, debug_span};

use crate::rng::{unit_f64, Mulberry32};

/// Half-width of the box the first sample is jittered inside, around the
/// domain centre.
pub const SEED_JITTER: f64 = 50.0;

/// Grid cells scanned on each side of a candidate's cell. Valid only while
/// the cell side is `min_distance / sqrt(2)`.
const NEIGHBOR_REACH: usize = 2;

/// Largest background grid a run may allocate.
pub const MAX_GRID_CELLS: usize = 1 << 28;

/// Grid columns and rows for a domain, left as floats so oversized domains
/// can be rejected before any cast.
pub(crate) fn grid_extent(width: f64, height: f64, min_distance: f64) -> (f64, f64) {
    let cell_size = min_distance / SQRT_2;
    ((width / cell_size).ceil(), (height / cell_size).ceil())
}

/// Bridson's dart throwing over a background grid.
///
/// Callers must pass finite, positive `width`, `height` and `min_distance`,
/// `k >= 1`, and a grid of at most [`MAX_GRID_CELLS`] cells. Nothing here
/// checks that; see [`GeneratorConfig::validate`](crate::GeneratorConfig::validate).
pub struct PoissonDisk<R: RngCore> {
    width: f64,
    height: f64,
    min_distance: f64,
    k: u32,
    cell_size: f64,
    grid_width: usize,
    grid_height: usize,
    grid: Vec<Option<usize>>,
    samples: Vec<[f64; 2]>,
    active: Vec<usize>,
    rng: R,
}

impl<R: RngCore> PoissonDisk<R> {
    pub fn new(width: f64, height: f64, min_distance: f64, k: u32, rng: R) -> Self {
        let cell_size = min_distance / SQRT_2;
        let (columns, rows) = grid_extent(width, height, min_distance);
        let grid_width = columns as usize;
        let grid_height = rows as usize;

        Self {
            width,
            height,
            min_distance,
            k,
            cell_size,
            grid_width,
            grid_height,
            grid: vec![None; grid_width * grid_height],
            samples: Vec::new(),
            active: Vec::new(),
            rng,
        }
    }

    /// Runs to completion. The active queue is empty afterwards.
    pub fn run(&mut self) {
        let _span = debug_span!(
            "poisson_disk",
            width = self.width,
            height = self.height,
            min_distance = self.min_distance,
            k = self.k
        )
        .entered();

        self.seed_sample();
        while !self.active.is_empty() {
            self.step();
        }

        debug!(
            samples = self.samples.len(),
            grid_width = self.grid_width,
            grid_height = self.grid_height,
            "poisson disk sampling finished"
        );
    }

    fn seed_sample(&mut self) {
        // Shrunk for domains narrower than the jitter box so the seed stays inside.
        let jitter = SEED_JITTER.min(self.width).min(self.height);
        let x = self.width / 2.0 + (unit_f64(&mut self.rng) - 0.5) * jitter;
        let y = self.height / 2.0 + (unit_f64(&mut self.rng) - 0.5) * jitter;
        self.add_sample(x, y);
    }

    fn step(&mut self) {
        let position = (unit_f64(&mut self.rng) * self.active.len() as f64) as usize;
        let [base_x, base_y] = self.samples[self.active[position]];

        for _ in 0..self.k {
            let angle = unit_f64(&mut self.rng) * PI * 2.0;
            let radius = self.min_distance * (1.0 + unit_f64(&mut self.rng));

            let x = base_x + radius * angle.cos();
            let y = base_y + radius * angle.sin();

            if self.in_domain(x, y) && self.is_far_enough(x, y) {
                self.add_sample(x, y);
                return;
            }
        }

        // Retire by queue position; the queue keeps its order.
        self.active.remove(position);
    }

    fn add_sample(&mut self, x: f64, y: f64) {
        let index = self.samples.len();
        self.samples.push([x, y]);
        let (cell_x, cell_y) = self.cell_of(x, y);
        self.grid[cell_x + cell_y * self.grid_width] = Some(index);
        self.active.push(index);
    }

    fn cell_of(&self, x: f64, y: f64) -> (usize, usize) {
        let cell_x = ((x / self.cell_size) as usize).min(self.grid_width - 1);
        let cell_y = ((y / self.cell_size) as usize).min(self.grid_height - 1);
        (cell_x, cell_y)
    }

    fn in_domain(&self, x: f64, y: f64) -> bool {
        (0.0..self.width).contains(&x) && (0.0..self.height).contains(&y)
    }

    fn is_far_enough(&self, x: f64, y: f64) -> bool {
        let (cell_x, cell_y) = self.cell_of(x, y);
        let min_distance_squared = self.min_distance * self.min_distance;

        let columns = cell_x.saturating_sub(NEIGHBOR_REACH)
            ..(cell_x + NEIGHBOR_REACH + 1).min(self.grid_width);
        let rows = cell_y.saturating_sub(NEIGHBOR_REACH)
            ..(cell_y + NEIGHBOR_REACH + 1).min(self.grid_height);

        for i in columns {
            for j in rows.clone() {
                if let Some(neighbor) = self.grid[i + j * self.grid_width] {
                    let [nx, ny] = self.samples[neighbor];
                    let dx = nx - x;
                    let dy = ny - y;
                    if dx * dx + dy * dy < min_distance_squared {
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Accepted samples in registration order.
    pub fn samples(&self) -> &[[f64; 2]] {
        &self.samples
    }

    #[cfg(test)]
    fn grid_size(&self) -> (usize, usize) {
        (self.grid_width, self.grid_height)
    }

    #[cfg(test)]
    fn is_finished(&self) -> bool {
        !self.samples.is_empty() && self.active.is_empty()
    }

    /// `[x0, y0, x1, y1, ...]` in registration order.
    pub fn into_flat(self) -> Vec<f64> {
        self.samples.into_iter().flatten().collect()
    }
}

/// Samples `[0, width) × [0, height)` with a private [`Mulberry32`] seeded by
/// `seed` and returns the flattened coordinate pairs.
pub fn poisson_disk_sampling(
    width: f64,
    height: f64,
    seed: u32,
    min_distance: f64,
    k: u32,
) -> Vec<f64> {
    let mut sampler = PoissonDisk::new(width, height, min_distance, k, Mulberry32::new(seed));
    sampler.run();
    sampler.into_flat()
}
