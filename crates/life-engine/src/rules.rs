//! Neighbor counting and the birth/survival rule.
//!
//! These functions work on flat row-major cell slices. They do not allocate
//! and never fail: candidate positions outside `0..total_cells` are excluded
//! by the [`BoundaryPolicy`] and every read goes through `get`.

use life_grid::Cell;

use crate::boundary::BoundaryPolicy;

impl BoundaryPolicy {
    /// Number of live cells among the candidate neighbors of `index`.
    ///
    /// Always in `0..=8`.
    pub fn count_neighbors(
        self,
        cells: &[Cell],
        index: usize,
        row_width: usize,
        total_cells: usize,
    ) -> u8 {
        self.neighbor_indices(index, row_width, total_cells)
            .into_iter()
            .flatten()
            .filter(|&i| cells.get(i).is_some_and(|c| c.is_alive()))
            .fold(0_u8, |count, _| count.saturating_add(1))
    }

    /// Compute one generation: read only `current`, write only `next`.
    ///
    /// Cells at indices `total_cells..` and any slice tail past the shorter
    /// buffer are left untouched.
    pub fn step(self, current: &[Cell], next: &mut [Cell], row_width: usize, total_cells: usize) {
        for (index, (slot, &cell)) in next.iter_mut().zip(current).take(total_cells).enumerate() {
            let neighbors = self.count_neighbors(current, index, row_width, total_cells);
            *slot = next_state(cell, neighbors);
        }
    }
}

/// Live neighbors of `index` under the default [`BoundaryPolicy::Linear`].
pub fn count_neighbors(cells: &[Cell], index: usize, row_width: usize, total_cells: usize) -> u8 {
    BoundaryPolicy::Linear.count_neighbors(cells, index, row_width, total_cells)
}

/// One generation under the default [`BoundaryPolicy::Linear`].
pub fn step(current: &[Cell], next: &mut [Cell], row_width: usize, total_cells: usize) {
    BoundaryPolicy::Linear.step(current, next, row_width, total_cells);
}

/// Conway's rule: a live cell survives with 2 or 3 live neighbors, a dead
/// cell is born with exactly 3. Everything else is dead.
pub const fn next_state(cell: Cell, live_neighbors: u8) -> Cell {
    match (cell, live_neighbors) {
        (Cell::Alive, 2 | 3) | (Cell::Dead, 3) => Cell::Alive,
        _ => Cell::Dead,
    }
}
