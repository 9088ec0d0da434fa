//! Boundary policies: which positions count as a cell's neighbors.
//!
//! Every policy yields up to eight candidate indices in a fixed slot order:
//! upper-left, up, upper-right, left, right, lower-left, down, lower-right.
//! A slot is `None` when the policy excludes that position.
//!
//! [`BoundaryPolicy::Linear`] is the default. It works purely on linear
//! indices: a candidate is dropped only if it would be negative or reaches
//! past the last cell. Cells on the first or last column therefore pick up
//! cells from the opposite edge of the adjacent row. Grids produced by other
//! tools with the same kernel rely on this, so it stays the default.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Number of candidate neighbor slots.
pub const NEIGHBOR_SLOTS: usize = 8;

/// Candidate neighbor indices for one cell, in slot order.
pub type NeighborSlots = [Option<usize>; NEIGHBOR_SLOTS];

/// Errors from parsing a policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown boundary policy {0:?}: expected linear, clamped, or wrapped")]
pub struct ParseBoundaryError(pub String);

/// How the edges of the grid are treated when counting neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Linear-index bounds only: negative and past-the-end candidates are
    /// skipped, column edges are not. First- and last-column cells see the
    /// opposite edge of neighboring rows.
    #[default]
    Linear,
    /// Fixed edges: positions outside `0..rows` or `0..cols` do not exist.
    Clamped,
    /// Toroidal: rows and columns wrap modulo the grid size.
    Wrapped,
}

impl BoundaryPolicy {
    /// All policies, in the order they are documented.
    pub const ALL: [Self; 3] = [Self::Linear, Self::Clamped, Self::Wrapped];

    /// The policy's name as used in configuration and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Clamped => "clamped",
            Self::Wrapped => "wrapped",
        }
    }

    /// Candidate neighbor indices of `index` in a grid of `total_cells` cells
    /// and row width `row_width`.
    ///
    /// Returns all `None` when `index` is not a valid cell.
    pub fn neighbor_indices(self, index: usize, row_width: usize, total_cells: usize) -> NeighborSlots {
        if index >= total_cells || row_width == 0 {
            return [None; NEIGHBOR_SLOTS];
        }
        match self {
            Self::Linear => linear(index, row_width, total_cells),
            Self::Clamped => clamped(index, row_width, total_cells),
            Self::Wrapped => wrapped(index, row_width, total_cells),
        }
    }
}

impl fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoundaryPolicy {
    type Err = ParseBoundaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseBoundaryError(s.to_owned()))
    }
}

fn linear(index: usize, n: usize, total: usize) -> NeighborSlots {
    let below = |i: Option<usize>| i.filter(|&i| i < total);
    [
        index.checked_sub(n).and_then(|i| i.checked_sub(1)),
        index.checked_sub(n),
        below(index.checked_add(1).and_then(|i| i.checked_sub(n))),
        index.checked_sub(1),
        below(index.checked_add(1)),
        below(index.checked_add(n).and_then(|i| i.checked_sub(1))),
        below(index.checked_add(n)),
        below(index.checked_add(n).and_then(|i| i.checked_add(1))),
    ]
}

/// Row/column offsets in slot order.
const OFFSETS: [(isize, isize); NEIGHBOR_SLOTS] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// `(rows, row, col)` for `index`; `None` only when `n` is zero.
fn coords(index: usize, n: usize, total: usize) -> Option<(usize, usize, usize)> {
    Some((total.checked_div(n)?, index.checked_div(n)?, index.checked_rem(n)?))
}

fn clamped(index: usize, n: usize, total: usize) -> NeighborSlots {
    let Some((rows, row, col)) = coords(index, n, total) else {
        return [None; NEIGHBOR_SLOTS];
    };
    OFFSETS.map(|(dr, dc)| {
        let r = row.checked_add_signed(dr).filter(|&r| r < rows)?;
        let c = col.checked_add_signed(dc).filter(|&c| c < n)?;
        r.checked_mul(n)?.checked_add(c)
    })
}

fn wrapped(index: usize, n: usize, total: usize) -> NeighborSlots {
    let Some((rows, row, col)) = coords(index, n, total) else {
        return [None; NEIGHBOR_SLOTS];
    };
    OFFSETS.map(|(dr, dc)| {
        let r = wrap(row, dr, rows)?;
        let c = wrap(col, dc, n)?;
        r.checked_mul(n)?.checked_add(c)
    })
}

/// `(value + delta) mod size` for `delta` in `-1..=1` and `value < size`.
fn wrap(value: usize, delta: isize, size: usize) -> Option<usize> {
    match delta {
        -1 => Some(value.checked_sub(1).unwrap_or_else(|| size.saturating_sub(1))),
        0 => Some(value),
        _ => value.checked_add(1).map(|v| if v >= size { 0 } else { v }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present(slots: NeighborSlots) -> Vec<usize> {
        let mut v: Vec<usize> = slots.into_iter().flatten().collect();
        v.sort_unstable();
        v
    }

    // 3x3 grid, indices:
    //   0 1 2
    //   3 4 5
    //   6 7 8

    #[test]
    fn linear_top_left_corner() {
        let slots = BoundaryPolicy::Linear.neighbor_indices(0, 3, 9);
        assert_eq!(slots, [None, None, None, None, Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn linear_top_right_corner_sees_index_zero_as_upper_right() {
        let slots = BoundaryPolicy::Linear.neighbor_indices(2, 3, 9);
        assert_eq!(
            slots,
            [None, None, Some(0), Some(1), Some(3), Some(4), Some(5), Some(6)]
        );
    }

    #[test]
    fn linear_left_edge_wraps_to_previous_row() {
        // (1, 0) sees (0, 2) as its left neighbor and (1, 2) as lower-left.
        let slots = BoundaryPolicy::Linear.neighbor_indices(3, 3, 9);
        assert_eq!(
            slots,
            [None, Some(0), Some(1), Some(2), Some(4), Some(5), Some(6), Some(7)]
        );
    }

    #[test]
    fn linear_center_is_the_full_ring() {
        let slots = BoundaryPolicy::Linear.neighbor_indices(4, 3, 9);
        assert_eq!(present(slots), vec![0, 1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn linear_right_edge_wraps_to_next_row() {
        let slots = BoundaryPolicy::Linear.neighbor_indices(5, 3, 9);
        assert_eq!(
            slots,
            [Some(1), Some(2), Some(3), Some(4), Some(6), Some(7), Some(8), None]
        );
    }

    #[test]
    fn linear_bottom_right_corner() {
        let slots = BoundaryPolicy::Linear.neighbor_indices(8, 3, 9);
        assert_eq!(
            slots,
            [Some(4), Some(5), Some(6), Some(7), None, None, None, None]
        );
    }

    #[test]
    fn linear_bottom_left_corner() {
        let slots = BoundaryPolicy::Linear.neighbor_indices(6, 3, 9);
        assert_eq!(
            slots,
            [Some(2), Some(3), Some(4), Some(5), Some(7), Some(8), None, None]
        );
    }

    #[test]
    fn clamped_corners_have_three_neighbors() {
        for corner in [0, 2, 6, 8] {
            let slots = BoundaryPolicy::Clamped.neighbor_indices(corner, 3, 9);
            assert_eq!(slots.iter().flatten().count(), 3, "corner {corner}");
        }
        assert_eq!(
            present(BoundaryPolicy::Clamped.neighbor_indices(3, 3, 9)),
            vec![0, 1, 4, 6, 7]
        );
    }

    #[test]
    fn wrapped_every_cell_has_eight_distinct_neighbors() {
        for index in 0..9 {
            let mut seen = present(BoundaryPolicy::Wrapped.neighbor_indices(index, 3, 9));
            seen.dedup();
            assert_eq!(seen.len(), 8, "index {index}");
            assert!(!seen.contains(&index));
        }
        assert_eq!(
            present(BoundaryPolicy::Wrapped.neighbor_indices(0, 3, 9)),
            vec![1, 2, 3, 4, 5, 6, 7, 8]
        );
    }

    #[test]
    fn out_of_range_index_has_no_neighbors() {
        for policy in BoundaryPolicy::ALL {
            assert_eq!(policy.neighbor_indices(9, 3, 9), [None; NEIGHBOR_SLOTS]);
        }
    }

    #[test]
    fn parses_names() {
        assert_eq!("linear".parse::<BoundaryPolicy>(), Ok(BoundaryPolicy::Linear));
        assert_eq!("Clamped".parse::<BoundaryPolicy>(), Ok(BoundaryPolicy::Clamped));
        assert_eq!(" wrapped ".parse::<BoundaryPolicy>(), Ok(BoundaryPolicy::Wrapped));
        assert!("torus".parse::<BoundaryPolicy>().is_err());
        assert_eq!(BoundaryPolicy::default(), BoundaryPolicy::Linear);
        assert_eq!(BoundaryPolicy::Clamped.to_string(), "clamped");
    }
}
