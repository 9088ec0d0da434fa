//! Grid storage for the Life simulator.
//!
//! This crate owns the on-disk and in-memory representations of a
//! Game of Life field: a rectangular grid of two-state cells stored flat in
//! row-major order, persisted in the NPY array-file format.
//!
//! # Modules
//!
//! - [`cell`] -- [`Cell`], the dead/alive enumeration and its byte encoding.
//! - [`error`] -- Error types for loading, saving, and building grids.
//! - [`grid`] -- [`Grid`], the heap-backed field used for simulation buffers.
//! - [`mapped`] -- [`MappedGrid`], a grid read straight from a file mapping.
//! - [`npy`] -- NPY header parsing and rendering.
//! - [`store`] -- [`load`] and [`save`] by path.

pub mod cell;
pub mod error;
pub mod grid;
pub mod mapped;
pub mod npy;
pub mod store;

// Re-export primary types at crate root.
pub use cell::Cell;
pub use error::GridError;
pub use grid::Grid;
pub use mapped::MappedGrid;
pub use store::{load, load_owned, save};
