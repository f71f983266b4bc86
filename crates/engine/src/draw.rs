//! Paint tools: pencil, flood fill, rectangle.
//!
//! All operations are copy-on-write: they take the current grid and
//! return a new one, leaving the caller's value untouched. Empty cells
//! are never written, whatever the tool.

use crate::grid::{Coord, YearGrid};

/// Paint a single cell. No-op on Empty cells; idempotent per
/// coordinate, so repeated pointer-move samples are harmless.
pub fn pencil(grid: &YearGrid, at: Coord, level: u8) -> YearGrid {
    let mut next = grid.clone();
    if next.is_paintable(at) {
        let _ = next.set(at, level);
    }
    next
}

/// Flood-fill the 4-connected region of cells sharing the intensity at
/// `at`, converting them to `level`. Empty cells and cells at any other
/// intensity bound the fill. No-op when the target is Empty or already
/// at `level` (which also makes the fill idempotent).
///
/// Iterative with an explicit work stack; depth is bounded by the cell
/// count, not the call stack.
pub fn flood_fill(grid: &YearGrid, at: Coord, level: u8) -> YearGrid {
    let mut next = grid.clone();
    let original = match next.level(at) {
        Some(l) if l != level => l,
        _ => return next,
    };

    let mut stack = vec![at];
    while let Some(cur) = stack.pop() {
        if next.level(cur) != Some(original) {
            continue;
        }
        let _ = next.set(cur, level);

        if cur.row + 1 < next.rows() {
            stack.push(Coord::new(cur.row + 1, cur.col));
        }
        if cur.row > 0 {
            stack.push(Coord::new(cur.row - 1, cur.col));
        }
        if cur.col + 1 < next.cols() {
            stack.push(Coord::new(cur.row, cur.col + 1));
        }
        if cur.col > 0 {
            stack.push(Coord::new(cur.row, cur.col - 1));
        }
    }
    next
}

/// Paint the inclusive bounding box of `a` and `b`. With `bordered`,
/// only the perimeter cells are painted. Empty cells inside the box are
/// skipped.
pub fn rectangle(grid: &YearGrid, a: Coord, b: Coord, bordered: bool, level: u8) -> YearGrid {
    let mut next = grid.clone();

    let min_row = a.row.min(b.row);
    let max_row = a.row.max(b.row);
    let min_col = a.col.min(b.col);
    let max_col = a.col.max(b.col);

    for row in min_row..=max_row {
        for col in min_col..=max_col {
            if bordered
                && row != min_row
                && row != max_row
                && col != min_col
                && col != max_col
            {
                continue;
            }
            let at = Coord::new(row, col);
            if next.is_paintable(at) {
                let _ = next.set(at, level);
            }
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::{level_at, painted_count};

    #[test]
    fn test_pencil_paints_one_cell() {
        let grid = YearGrid::new(2024).unwrap();
        let next = pencil(&grid, Coord::new(1, 0), 3);
        assert_eq!(level_at(&next, 1, 0), Some(3));
        assert_eq!(painted_count(&next), 1);
        // Source grid untouched.
        assert_eq!(level_at(&grid, 1, 0), Some(0));
    }

    #[test]
    fn test_pencil_noop_on_empty_cell() {
        let grid = YearGrid::new(2024).unwrap();
        let next = pencil(&grid, Coord::new(0, 0), 3);
        assert_eq!(next, grid);
    }

    #[test]
    fn test_pencil_idempotent() {
        let grid = YearGrid::new(2024).unwrap();
        let once = pencil(&grid, Coord::new(3, 10), 2);
        let twice = pencil(&once, Coord::new(3, 10), 2);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_fill_converts_connected_region() {
        // Wall off columns 0 and 6, leaving a 7x5 all-zero block in
        // columns 1..=5. One fill converts all 35 cells.
        let grid = YearGrid::new(2024).unwrap();
        let walled = rectangle(&grid, Coord::new(0, 0), Coord::new(6, 0), false, 1);
        let walled = rectangle(&walled, Coord::new(0, 6), Coord::new(6, 6), false, 1);
        let filled = flood_fill(&walled, Coord::new(3, 2), 2);
        for row in 0..7 {
            for col in 1..=5 {
                assert_eq!(level_at(&filled, row, col), Some(2));
            }
        }
        // Walls and far side untouched.
        assert_eq!(level_at(&filled, 3, 0), Some(1));
        assert_eq!(level_at(&filled, 3, 6), Some(1));
        assert_eq!(level_at(&filled, 3, 7), Some(0));

        // A second identical fill changes nothing.
        assert_eq!(flood_fill(&filled, Coord::new(3, 2), 2), filled);
    }

    #[test]
    fn test_fill_same_level_is_noop() {
        let grid = YearGrid::new(2024).unwrap();
        let filled = flood_fill(&grid, Coord::new(3, 2), 0);
        assert_eq!(filled, grid);
    }

    #[test]
    fn test_fill_idempotent() {
        let grid = YearGrid::new(2024).unwrap();
        let once = flood_fill(&grid, Coord::new(3, 2), 2);
        let twice = flood_fill(&once, Coord::new(3, 2), 2);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_fill_on_empty_cell_is_noop() {
        let grid = YearGrid::new(2024).unwrap();
        let filled = flood_fill(&grid, Coord::new(0, 0), 2);
        assert_eq!(filled, grid);
    }

    #[test]
    fn test_fill_respects_empty_boundary() {
        // Filling from inside the year never leaks into Empty lead-in cells.
        let grid = YearGrid::new(2024).unwrap();
        let filled = flood_fill(&grid, Coord::new(1, 0), 4);
        assert_eq!(level_at(&filled, 0, 0), None);
        assert_eq!(painted_count(&filled), 366);
    }

    #[test]
    fn test_rectangle_filled() {
        let grid = YearGrid::new(2024).unwrap();
        // Coordinates given in either order.
        let next = rectangle(&grid, Coord::new(4, 6), Coord::new(2, 3), false, 3);
        for row in 2..=4 {
            for col in 3..=6 {
                assert_eq!(level_at(&next, row, col), Some(3));
            }
        }
        assert_eq!(painted_count(&next), 12);
    }

    #[test]
    fn test_rectangle_border_only() {
        let grid = YearGrid::new(2024).unwrap();
        let next = rectangle(&grid, Coord::new(1, 2), Coord::new(5, 6), true, 2);
        assert_eq!(level_at(&next, 1, 4), Some(2)); // top edge
        assert_eq!(level_at(&next, 5, 4), Some(2)); // bottom edge
        assert_eq!(level_at(&next, 3, 2), Some(2)); // left edge
        assert_eq!(level_at(&next, 3, 6), Some(2)); // right edge
        assert_eq!(level_at(&next, 3, 4), Some(0)); // interior untouched
    }

    #[test]
    fn test_rectangle_skips_empty_cells() {
        let grid = YearGrid::new(2024).unwrap();
        // Box covering the Empty lead-in corner.
        let next = rectangle(&grid, Coord::new(0, 0), Coord::new(2, 1), false, 4);
        assert_eq!(level_at(&next, 0, 0), None);
        assert_eq!(level_at(&next, 1, 0), Some(4));
    }
}
