//! Memory-mapped grid loaded from an NPY file.
//!
//! [`MappedGrid`] keeps the file mapping alive and exposes the cell bytes that
//! follow the header without copying them. The mapping is released when the
//! value is dropped. It is a separate type from the heap-backed [`Grid`]; use
//! [`MappedGrid::to_grid`] to validate the bytes and take an owned copy.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use tracing::debug;

use crate::error::GridError;
use crate::grid::{Grid, cell_count};
use crate::npy;

/// A grid whose cells live in a read-only mapping of its file.
#[derive(Debug)]
pub struct MappedGrid {
    map: Mmap,
    rows: usize,
    cols: usize,
    offset: usize,
    len: usize,
}

impl MappedGrid {
    /// Map the NPY file at `path` and validate its header and size.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Open`], [`GridError::Read`] or
    /// [`GridError::Map`] for I/O failures, any header error from
    /// [`npy::parse_header`], or [`GridError::Truncated`] if the file is
    /// shorter than the header promises.
    pub fn open(path: &Path) -> Result<Self, GridError> {
        let file = File::open(path).map_err(|source| GridError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let file_len = file
            .metadata()
            .map_err(|source| GridError::Read {
                path: path.to_path_buf(),
                source,
            })?
            .len();
        if file_len == 0 {
            return Err(GridError::BadMagic);
        }

        let map = map_file(&file).map_err(|source| GridError::Map {
            path: path.to_path_buf(),
            source,
        })?;

        let header = npy::parse_header(&map)?;
        let len = cell_count(header.rows, header.cols)?;
        let actual = map.len().saturating_sub(header.data_offset);
        if actual < len {
            return Err(GridError::Truncated {
                expected: len,
                actual,
            });
        }

        debug!(
            path = %path.display(),
            rows = header.rows,
            cols = header.cols,
            data_offset = header.data_offset,
            "Grid file mapped"
        );

        Ok(Self {
            map,
            rows: header.rows,
            cols: header.cols,
            offset: header.data_offset,
            len,
        })
    }

    /// Number of rows (`m`).
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (`n`).
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total cell count.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the grid has no cells.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte offset of the first cell within the file.
    pub const fn data_offset(&self) -> usize {
        self.offset
    }

    /// The raw, unvalidated cell bytes straight from the mapping.
    pub fn bytes(&self) -> &[u8] {
        // The range was checked against the mapping length in `open`.
        self.offset
            .checked_add(self.len)
            .and_then(|end| self.map.get(self.offset..end))
            .unwrap_or_default()
    }

    /// Validate every byte and copy the cells onto the heap.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidCell`] for the first byte that is neither
    /// 0 nor 1.
    pub fn to_grid(&self) -> Result<Grid, GridError> {
        Grid::from_bytes(self.rows, self.cols, self.bytes())
    }
}

#[allow(unsafe_code)]
fn map_file(file: &File) -> std::io::Result<Mmap> {
    // SAFETY: the mapping is read-only and private to this process. Another
    // process truncating the file while mapped is outside what this crate
    // can guard against; every access goes through bounds-checked slices.
    unsafe { Mmap::map(file) }
}
