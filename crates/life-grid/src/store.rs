//! Load and save grids as NPY files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::GridError;
use crate::grid::Grid;
use crate::mapped::MappedGrid;
use crate::npy;

/// Map the grid file at `path`.
///
/// The returned [`MappedGrid`] is backed by the file; its bytes are not
/// validated until [`MappedGrid::to_grid`] is called.
///
/// # Errors
///
/// See [`MappedGrid::open`].
pub fn load(path: &Path) -> Result<MappedGrid, GridError> {
    let mapped = MappedGrid::open(path)?;
    info!(
        path = %path.display(),
        rows = mapped.rows(),
        cols = mapped.cols(),
        "Grid loaded"
    );
    Ok(mapped)
}

/// Load the grid file at `path` and copy it onto the heap.
///
/// # Errors
///
/// Any error from [`load`] or [`MappedGrid::to_grid`].
pub fn load_owned(path: &Path) -> Result<Grid, GridError> {
    load(path)?.to_grid()
}

/// Write `grid` to `path` as a version 1.0 NPY file with a 128-byte header.
///
/// An existing file is truncated.
///
/// # Errors
///
/// Returns [`GridError::Create`] if the file cannot be created,
/// [`GridError::Write`] if a write fails or is short, or
/// [`GridError::HeaderOverflow`] if the header cannot be rendered.
pub fn save(path: &Path, grid: &Grid) -> Result<(), GridError> {
    let header = npy::encode_header(grid.rows(), grid.cols())?;
    let file = File::create(path).map_err(|source| GridError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let write_err = |source: std::io::Error| GridError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut out = BufWriter::new(file);
    out.write_all(&header).map_err(write_err)?;
    out.write_all(&grid.to_bytes()).map_err(write_err)?;
    out.flush().map_err(write_err)?;

    debug!(
        path = %path.display(),
        rows = grid.rows(),
        cols = grid.cols(),
        bytes = npy::HEADER_LEN.saturating_add(grid.len()),
        "Grid saved"
    );
    Ok(())
}
