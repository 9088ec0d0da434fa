//! Generation stepping for the Life simulator.
//!
//! The engine advances a grid under Conway's rules: a live cell survives with
//! two or three live neighbors, a dead cell is born with exactly three, and
//! every other cell is dead in the next generation. Which positions count as
//! neighbors at the grid's edges is decided by a [`BoundaryPolicy`].
//!
//! # Modules
//!
//! - [`boundary`] -- [`BoundaryPolicy`] and candidate neighbor indices.
//! - [`buffer`] -- [`DoubleBuffer`], the two-slot current/next arena.
//! - [`engine`] -- [`LifeEngine`] and the slice-level [`run`].
//! - [`rules`] -- [`count_neighbors`], [`next_state`], and [`step`].

pub mod boundary;
pub mod buffer;
pub mod engine;
pub mod rules;

// Re-export primary types at crate root.
pub use boundary::{BoundaryPolicy, ParseBoundaryError};
pub use buffer::DoubleBuffer;
pub use engine::{LifeEngine, RunSummary, run, run_with};
pub use rules::{count_neighbors, next_state, step};
