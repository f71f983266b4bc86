//! Positioning and committing clipboard content onto a grid.

use serde::{Deserialize, Serialize};

use crate::grid::{Coord, YearGrid};
use crate::selection::ClipboardPayload;

/// Extra displacement applied on top of the paste anchor, adjusted
/// with the arrow keys while the paste tool is armed. Reset whenever
/// the tool is put down or a new copy/cut replaces the clipboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteOffset {
    pub row: i32,
    pub col: i32,
}

impl PasteOffset {
    pub fn nudge(&mut self, d_row: i32, d_col: i32) {
        self.row += d_row;
        self.col += d_col;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Cells that a paste at `anchor + offset` would write: clipboard cell
/// non-Empty, destination in bounds and paintable. Everything else is
/// skipped: never previewed, never written. Level-0 clipboard cells
/// do paste (they blank the destination).
pub fn preview(
    grid: &YearGrid,
    payload: &ClipboardPayload,
    anchor: Coord,
    offset: PasteOffset,
) -> Vec<(Coord, u8)> {
    let mut eligible = Vec::new();
    for r in 0..payload.height {
        for c in 0..payload.width {
            let level = match payload.get(r, c).level() {
                Some(l) => l,
                None => continue,
            };
            let row = anchor.row as i64 + r as i64 + offset.row as i64;
            let col = anchor.col as i64 + c as i64 + offset.col as i64;
            if row < 0 || col < 0 {
                continue;
            }
            let at = Coord::new(row as usize, col as usize);
            if grid.is_paintable(at) {
                eligible.push((at, level));
            }
        }
    }
    eligible
}

/// Write the eligible cells into a copy of `grid` in one step.
/// `None` when nothing is eligible; the grid is left unchanged and
/// no history entry should be created.
pub fn commit(
    grid: &YearGrid,
    payload: &ClipboardPayload,
    anchor: Coord,
    offset: PasteOffset,
) -> Option<YearGrid> {
    let eligible = preview(grid, payload, anchor, offset);
    if eligible.is_empty() {
        return None;
    }
    let mut next = grid.clone();
    for (at, level) in eligible {
        let _ = next.set(at, level);
    }
    Some(next)
}
