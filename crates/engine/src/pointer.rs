//! Pixel-to-cell snapping for pointer input.

use serde::{Deserialize, Serialize};

use crate::grid::{Coord, YearGrid, GRID_ROWS};

/// On-screen cell geometry. The pitch between cell origins is
/// `cell_size + cell_padding`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellMetrics {
    pub cell_size: f32,
    pub cell_padding: f32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell_size: 10.0,
            cell_padding: 2.0,
        }
    }
}

impl CellMetrics {
    pub fn pitch(&self) -> f32 {
        self.cell_size + self.cell_padding
    }
}

/// Map a pixel position to the cell a gesture should act on.
///
/// A pointer in the padding gap between cells snaps to whichever
/// neighbor is geometrically closer, then the result is clamped into
/// grid bounds. For paint tools (`selecting == false`) an Empty snap
/// target is walked left along the row to the nearest paintable
/// column, falling back to a rightward walk when nothing exists to the
/// left. Selection skips the walk: its rectangle may cover Empty cells
/// (copy and cut ignore them anyway).
pub fn closest_cell(
    x: f32,
    y: f32,
    grid: &YearGrid,
    metrics: &CellMetrics,
    selecting: bool,
) -> Coord {
    let pitch = metrics.pitch();
    let base_col = (x / pitch).floor() as i64;
    let base_row = (y / pitch).floor() as i64;

    let x_in_unit = x - base_col as f32 * pitch;
    let y_in_unit = y - base_row as f32 * pitch;

    let mut row = base_row;
    let mut col = base_col;

    if x_in_unit > metrics.cell_size {
        let dist_to_current = x_in_unit - metrics.cell_size;
        let dist_to_next = pitch - x_in_unit;
        if dist_to_next < dist_to_current {
            col = base_col + 1;
        }
    }
    if y_in_unit > metrics.cell_size {
        let dist_to_current = y_in_unit - metrics.cell_size;
        let dist_to_next = pitch - y_in_unit;
        if dist_to_next < dist_to_current {
            row = base_row + 1;
        }
    }

    let max_row = GRID_ROWS as i64 - 1;
    let max_col = grid.cols() as i64 - 1;
    let valid_row = row.clamp(0, max_row);
    let mut valid_col = col.clamp(0, max_col);

    if selecting {
        return Coord::new(valid_row as usize, valid_col as usize);
    }

    // Walk off Empty cells: left first, then right from the row start.
    while valid_col >= 0 && !grid.is_paintable(Coord::new(valid_row as usize, valid_col as usize)) {
        valid_col -= 1;
    }
    if valid_col < 0 {
        valid_col = 0;
        while valid_col <= max_col
            && !grid.is_paintable(Coord::new(valid_row as usize, valid_col as usize))
        {
            valid_col += 1;
        }
    }
    if valid_col > max_col {
        valid_col = col.clamp(0, max_col);
    }

    Coord::new(valid_row as usize, valid_col as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> CellMetrics {
        CellMetrics::default() // 10px cells, 2px padding, 12px pitch
    }

    #[test]
    fn test_center_of_cell() {
        let grid = YearGrid::new(2024).unwrap();
        let at = closest_cell(5.0, 17.0, &grid, &metrics(), false);
        assert_eq!(at, Coord::new(1, 0));
    }

    #[test]
    fn test_padding_gap_snaps_to_closer_neighbor() {
        let grid = YearGrid::new(2024).unwrap();
        // x = 10.5: 0.5px into the gap after col 0, 1.5px from col 1.
        assert_eq!(
            closest_cell(10.5, 17.0, &grid, &metrics(), false),
            Coord::new(1, 0)
        );
        // x = 11.5: 1.5px past col 0, 0.5px from col 1.
        assert_eq!(
            closest_cell(11.5, 17.0, &grid, &metrics(), false),
            Coord::new(1, 1)
        );
    }

    #[test]
    fn test_clamps_outside_grid() {
        let grid = YearGrid::new(2024).unwrap();
        let at = closest_cell(-30.0, 1000.0, &grid, &metrics(), true);
        assert_eq!(at, Coord::new(6, 0));
        let at = closest_cell(10_000.0, -5.0, &grid, &metrics(), true);
        assert_eq!(at, Coord::new(0, grid.cols() - 1));
    }

    #[test]
    fn test_paint_tools_walk_off_empty_cells() {
        // 2024 starts Monday, so (0, 0) is Empty; painting there must
        // land on the first Sunday instead: row 0 has no paintable
        // column to the left, so the walk goes right to col 1.
        let grid = YearGrid::new(2024).unwrap();
        let at = closest_cell(3.0, 3.0, &grid, &metrics(), false);
        assert_eq!(at, Coord::new(0, 1));
    }

    #[test]
    fn test_walk_left_from_trailing_empty() {
        // The guard column at the right edge is Empty in every row;
        // painting there walks back to the last valid week.
        let grid = YearGrid::new(2024).unwrap();
        let last = grid.cols() - 1;
        let x = last as f32 * metrics().pitch() + 5.0;
        let at = closest_cell(x, 40.0, &grid, &metrics(), false);
        assert_eq!(at.row, 3);
        assert!(at.col < last);
        assert!(grid.is_paintable(at));
    }

    #[test]
    fn test_selection_keeps_empty_cells() {
        let grid = YearGrid::new(2024).unwrap();
        let at = closest_cell(3.0, 3.0, &grid, &metrics(), true);
        assert_eq!(at, Coord::new(0, 0));
        assert!(!grid.is_paintable(at));
    }
}
