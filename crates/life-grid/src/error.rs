//! Error types for the `life-grid` crate.
//!
//! All fallible operations in this crate return [`GridError`] through the
//! standard [`Result`] type alias.

use std::path::PathBuf;

/// Errors that can occur while building, loading, or saving a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The grid file could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        /// Path that was being opened.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// File metadata could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file could not be memory-mapped.
    #[error("failed to map {path}: {source}")]
    Map {
        /// Path that was being mapped.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file does not start with the NPY magic string.
    #[error("not an NPY file: bad magic string")]
    BadMagic,

    /// The NPY format version is not one this crate understands.
    #[error("unsupported NPY format version {major}.{minor}")]
    UnsupportedVersion {
        /// Major version byte.
        major: u8,
        /// Minor version byte.
        minor: u8,
    },

    /// The header dictionary could not be parsed.
    #[error("malformed NPY header: {reason}")]
    MalformedHeader {
        /// What went wrong while parsing.
        reason: String,
    },

    /// The array element type is not an unsigned single byte.
    #[error("unsupported element type {descr:?}: only unsigned 1-byte integers are accepted")]
    UnsupportedDtype {
        /// The `descr` value from the header.
        descr: String,
    },

    /// The array is stored column-major.
    #[error("unsupported layout: fortran_order is True")]
    FortranOrder,

    /// The array has a rank other than 1 or 2.
    #[error("unsupported array rank {rank}: only 1-D and 2-D arrays are accepted")]
    UnsupportedRank {
        /// Number of dimensions declared in the header.
        rank: usize,
    },

    /// The file holds fewer data bytes than the header declares.
    #[error("truncated grid data: expected {expected} bytes, found {actual}")]
    Truncated {
        /// Bytes required after the header.
        expected: usize,
        /// Bytes actually present after the header.
        actual: usize,
    },

    /// A cell byte is neither 0 (dead) nor 1 (alive).
    #[error("invalid cell value {value} at index {index}")]
    InvalidCell {
        /// Linear index of the offending cell.
        index: usize,
        /// The byte found there.
        value: u8,
    },

    /// The cell count does not match `rows * cols`.
    #[error("shape mismatch: {rows}x{cols} grid needs {expected} cells, got {actual}")]
    ShapeMismatch {
        /// Declared rows.
        rows: usize,
        /// Declared columns.
        cols: usize,
        /// `rows * cols`, if it fits in `usize`.
        expected: usize,
        /// Cells supplied.
        actual: usize,
    },

    /// `rows * cols` overflows `usize`.
    #[error("grid dimensions {rows}x{cols} overflow the address space")]
    DimensionOverflow {
        /// Declared rows.
        rows: usize,
        /// Declared columns.
        cols: usize,
    },

    /// A coordinate lies outside the grid.
    #[error("cell ({row}, {col}) is outside a {rows}x{cols} grid")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Grid rows.
        rows: usize,
        /// Grid columns.
        cols: usize,
    },

    /// Random fill density outside `[0, 1]`.
    #[error("density {0} is outside [0, 1]")]
    InvalidDensity(f64),

    /// The header dictionary does not fit in the fixed header block.
    #[error("header dictionary of {len} bytes does not fit in a {capacity}-byte header")]
    HeaderOverflow {
        /// Length of the rendered dictionary.
        len: usize,
        /// Space available for it.
        capacity: usize,
    },

    /// The output file could not be created.
    #[error("failed to create {path}: {source}")]
    Create {
        /// Path that was being created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Writing the header or data failed or was short.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Path that was being written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
