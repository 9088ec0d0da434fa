//! Property tests for neighbor counting and generation stepping.
//!
//! Grids are generated from a seed and density so failures shrink to a
//! small, reproducible case.

#![allow(clippy::unwrap_used)]

use life_engine::{BoundaryPolicy, LifeEngine, count_neighbors, run, run_with, step};
use life_grid::{Cell, Grid};
use proptest::prelude::*;

fn policy() -> impl Strategy<Value = BoundaryPolicy> {
    prop_oneof![
        Just(BoundaryPolicy::Linear),
        Just(BoundaryPolicy::Clamped),
        Just(BoundaryPolicy::Wrapped),
    ]
}

fn grid() -> impl Strategy<Value = Grid> {
    (1usize..12, 1usize..12, any::<u64>(), 0.0f64..=1.0)
        .prop_map(|(rows, cols, seed, density)| Grid::random(rows, cols, seed, density).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn neighbor_count_is_at_most_eight(grid in grid(), policy in policy()) {
        for index in 0..grid.len() {
            let count = policy.count_neighbors(grid.cells(), index, grid.cols(), grid.len());
            prop_assert!(count <= 8);
        }
    }

    #[test]
    fn dead_grid_stays_dead(rows in 0usize..16, cols in 1usize..16, steps in 0u64..6) {
        let grid = Grid::dead(rows, cols).unwrap();
        let cells = run(grid.cells(), cols, grid.len(), steps);
        prop_assert!(cells.iter().all(|c| *c == Cell::Dead));
    }

    #[test]
    fn runs_compose(grid in grid(), policy in policy(), k in 0u64..5, j in 0u64..5) {
        let (n, total) = (grid.cols(), grid.len());
        let split = run_with(policy, &run_with(policy, grid.cells(), n, total, k), n, total, j);
        let whole = run_with(policy, grid.cells(), n, total, k + j);
        prop_assert_eq!(split, whole);
    }

    #[test]
    fn engine_is_deterministic(grid in grid(), policy in policy(), steps in 0u64..6) {
        let mut a = LifeEngine::new(grid.clone(), policy);
        let mut b = LifeEngine::new(grid, policy);
        prop_assert_eq!(a.run(steps), b.run(steps));
        prop_assert_eq!(a.into_grid(), b.into_grid());
    }

    #[test]
    fn step_reads_only_current(grid in grid()) {
        // Whatever garbage the scratch buffer holds, the result is the same.
        let (n, total) = (grid.cols(), grid.len());
        let mut from_dead = vec![Cell::Dead; total];
        let mut from_alive = vec![Cell::Alive; total];
        step(grid.cells(), &mut from_dead, n, total);
        step(grid.cells(), &mut from_alive, n, total);
        prop_assert_eq!(from_dead, from_alive);
    }
}

#[test]
fn single_cell_dies_after_one_step() {
    for (row, col) in [(0, 0), (0, 4), (2, 2), (4, 0), (4, 4)] {
        let grid = Grid::from_live_cells(5, 5, &[(row, col)]).unwrap();
        let cells = run(grid.cells(), 5, 25, 1);
        assert!(cells.iter().all(|c| *c == Cell::Dead), "({row}, {col})");
    }
}

#[test]
fn origin_never_sees_negative_indices() {
    let grid = Grid::random(3, 3, 5, 1.0).unwrap();
    // Index 0 keeps right (1), lower-left (2, the end of its own row),
    // down (3) and lower-right (4).
    assert_eq!(count_neighbors(grid.cells(), 0, 3, 9), 4);
}

#[test]
fn blinker_returns_after_two_steps() {
    let horizontal = Grid::from_live_cells(7, 7, &[(3, 2), (3, 3), (3, 4)]).unwrap();
    let vertical = Grid::from_live_cells(7, 7, &[(2, 3), (3, 3), (4, 3)]).unwrap();
    let one = run(horizontal.cells(), 7, 49, 1);
    let two = run(horizontal.cells(), 7, 49, 2);
    assert_eq!(one.as_slice(), vertical.cells());
    assert_eq!(two.as_slice(), horizontal.cells());
}
