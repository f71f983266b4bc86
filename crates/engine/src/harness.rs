//! Shared helpers for engine tests.

use crate::grid::{Coord, YearGrid};

/// Intensity at (row, col), or None for Empty/out-of-bounds cells.
pub fn level_at(grid: &YearGrid, row: usize, col: usize) -> Option<u8> {
    grid.level(Coord::new(row, col))
}

/// Count of cells holding a non-zero intensity.
pub fn painted_count(grid: &YearGrid) -> usize {
    grid.painted().count()
}

/// A grid with the given (row, col, level) cells painted. Panics on
/// cells the year's calendar does not cover.
pub fn painted(grid: &YearGrid, cells: &[(usize, usize, u8)]) -> YearGrid {
    let mut out = grid.clone();
    for (row, col, level) in cells {
        assert!(
            out.is_paintable(Coord::new(*row, *col)),
            "({}, {}) is not paintable",
            row,
            col
        );
        out.set(Coord::new(*row, *col), *level)
            .expect("cell checked paintable");
    }
    out
}
