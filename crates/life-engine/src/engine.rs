//! Multi-generation runs over a double buffer.
//!
//! [`run`] is the slice-level entry point: it takes the initial cells and
//! returns the cells after exactly `iterations` steps. [`LifeEngine`] wraps
//! the same loop around an owned [`Grid`], tracks the generation index, and
//! reports a [`RunSummary`].

use life_grid::{Cell, Grid};
use tracing::{info, trace};

use crate::boundary::BoundaryPolicy;
use crate::buffer::DoubleBuffer;

/// Outcome of [`LifeEngine::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps executed by this call.
    pub iterations: u64,
    /// Generation index after the run (0 is the initial grid).
    pub generation: u64,
    /// Live cells in the final generation.
    pub live_cells: usize,
}

/// Advance `initial` by `iterations` generations under the default
/// [`BoundaryPolicy::Linear`].
///
/// Only the first `total_cells` cells take part in the update.
pub fn run(initial: &[Cell], row_width: usize, total_cells: usize, iterations: u64) -> Vec<Cell> {
    run_with(BoundaryPolicy::Linear, initial, row_width, total_cells, iterations)
}

/// Advance `initial` by `iterations` generations under `policy`.
pub fn run_with(
    policy: BoundaryPolicy,
    initial: &[Cell],
    row_width: usize,
    total_cells: usize,
    iterations: u64,
) -> Vec<Cell> {
    let total_cells = total_cells.min(initial.len());
    let mut buffers = DoubleBuffer::new(initial.to_vec());
    for _ in 0..iterations {
        let (current, next) = buffers.split();
        policy.step(current, next, row_width, total_cells);
        buffers.swap();
    }
    buffers.into_current()
}

/// An owned grid plus scratch buffer, stepped in place.
#[derive(Debug, Clone)]
pub struct LifeEngine {
    buffers: DoubleBuffer<Grid>,
    policy: BoundaryPolicy,
    generation: u64,
}

impl LifeEngine {
    /// Take ownership of `grid` as generation 0.
    pub fn new(grid: Grid, policy: BoundaryPolicy) -> Self {
        Self {
            buffers: DoubleBuffer::new(grid),
            policy,
            generation: 0,
        }
    }

    /// The boundary policy in use.
    pub const fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    /// Index of the current generation.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// The current generation.
    pub fn current(&self) -> &Grid {
        self.buffers.current()
    }

    /// Advance by one generation.
    pub fn step_once(&mut self) {
        let row_width = self.current().cols();
        let total_cells = self.buffers.len();
        let (current, next) = self.buffers.split();
        self.policy.step(current, next, row_width, total_cells);
        self.buffers.swap();
        self.generation = self.generation.saturating_add(1);
        trace!(generation = self.generation, "Generation computed");
    }

    /// Advance by `iterations` generations.
    pub fn run(&mut self, iterations: u64) -> RunSummary {
        info!(
            rows = self.current().rows(),
            cols = self.current().cols(),
            iterations,
            policy = %self.policy,
            from_generation = self.generation,
            "Run starting"
        );
        for _ in 0..iterations {
            self.step_once();
        }
        let summary = RunSummary {
            iterations,
            generation: self.generation,
            live_cells: self.current().live_count(),
        };
        info!(
            generation = summary.generation,
            live_cells = summary.live_cells,
            "Run finished"
        );
        summary
    }

    /// Release the scratch buffer and return the current generation.
    pub fn into_grid(self) -> Grid {
        self.buffers.into_current()
    }
}
