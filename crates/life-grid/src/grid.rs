//! Heap-backed grid.
//!
//! A [`Grid`] is an `rows x cols` field of [`Cell`]s stored flat in row-major
//! order: the cell at `(row, col)` lives at index `row * cols + col`.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cell::Cell;
use crate::error::GridError;

/// A rectangular field of cells owned on the heap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// An all-dead grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionOverflow`] if `rows * cols` overflows.
    pub fn dead(rows: usize, cols: usize) -> Result<Self, GridError> {
        let len = cell_count(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Dead; len],
        })
    }

    /// Wrap an existing row-major cell vector.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ShapeMismatch`] if `cells.len() != rows * cols`.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        let expected = cell_count(rows, cols)?;
        if cells.len() != expected {
            return Err(GridError::ShapeMismatch {
                rows,
                cols,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Decode raw row-major bytes, rejecting anything but 0 and 1.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ShapeMismatch`] on a length mismatch, or
    /// [`GridError::InvalidCell`] for the first byte that is not a valid cell.
    pub fn from_bytes(rows: usize, cols: usize, bytes: &[u8]) -> Result<Self, GridError> {
        let expected = cell_count(rows, cols)?;
        if bytes.len() != expected {
            return Err(GridError::ShapeMismatch {
                rows,
                cols,
                expected,
                actual: bytes.len(),
            });
        }
        let cells = bytes
            .iter()
            .enumerate()
            .map(|(index, &value)| Cell::from_byte(value).ok_or(GridError::InvalidCell { index, value }))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows, cols, cells })
    }

    /// A dead grid with the listed `(row, col)` positions set alive.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for a coordinate outside the grid.
    pub fn from_live_cells(
        rows: usize,
        cols: usize,
        live: &[(usize, usize)],
    ) -> Result<Self, GridError> {
        let mut grid = Self::dead(rows, cols)?;
        for &(row, col) in live {
            grid.set(row, col, Cell::Alive)?;
        }
        Ok(grid)
    }

    /// A seeded random grid where each cell is alive with probability `density`.
    ///
    /// The same `(rows, cols, seed, density)` always yields the same grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDensity`] if `density` is not in `[0, 1]`,
    /// or [`GridError::DimensionOverflow`] if `rows * cols` overflows.
    pub fn random(rows: usize, cols: usize, seed: u64, density: f64) -> Result<Self, GridError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(GridError::InvalidDensity(density));
        }
        let len = cell_count(rows, cols)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let cells = (0..len).map(|_| Cell::from(rng.random_bool(density))).collect();
        Ok(Self { rows, cols, cells })
    }

    /// Number of rows (`m`).
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns, i.e. the row width (`n`).
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total cell count, `rows * cols`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable row-major view of every cell.
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Take the backing vector.
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// The cell at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.index_of(row, col).and_then(|i| self.cells.get(i).copied())
    }

    /// Overwrite the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for a coordinate outside the grid.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), GridError> {
        let slot = self
            .index_of(row, col)
            .and_then(|i| self.cells.get_mut(i))
            .ok_or(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })?;
        *slot = cell;
        Ok(())
    }

    /// Number of live cells.
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// The raw bytes written to disk, one per cell.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.as_byte()).collect()
    }

    fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        row.checked_mul(self.cols)?.checked_add(col)
    }
}

impl AsRef<[Cell]> for Grid {
    fn as_ref(&self) -> &[Cell] {
        &self.cells
    }
}

/// Mutable access keeps the shape: cells can change, the length cannot.
impl AsMut<[Cell]> for Grid {
    fn as_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

/// Textual dump: one line per row, cells as `0`/`1` joined by `", "`, and a
/// trailing blank line.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cols > 0 {
            for row in self.cells.chunks(self.cols) {
                for cell in row {
                    write!(f, "{}, ", cell.as_byte())?;
                }
                writeln!(f)?;
            }
        }
        writeln!(f)
    }
}

/// `rows * cols`, checked.
pub(crate) fn cell_count(rows: usize, cols: usize) -> Result<usize, GridError> {
    rows.checked_mul(cols)
        .ok_or(GridError::DimensionOverflow { rows, cols })
}
