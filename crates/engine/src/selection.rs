//! Selection and clipboard state shared by every grid.
//!
//! The process has at most one active selection and at most one
//! clipboard payload. Rather than a module-level singleton, the state
//! lives in a [`SelectionContext`] owned by the session and handed to
//! whatever shell drives it; grids are identified by opaque ids, not
//! object identity.

use serde::{Deserialize, Serialize};

use crate::grid::{Cell, Coord, YearGrid};

/// Opaque grid identity, assigned by the session. Monotonically
/// increasing, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridId(pub u64);

/// Inclusive rectangle bounds, normalized from two corner coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

/// One rectangular selection, owned by a single grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub grid: GridId,
    pub start: Coord,
    pub end: Coord,
}

impl Selection {
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min_row: self.start.row.min(self.end.row),
            max_row: self.start.row.max(self.end.row),
            min_col: self.start.col.min(self.end.col),
            max_col: self.start.col.max(self.end.col),
        }
    }
}

/// A by-value snapshot of a rectangular region at copy time. Later
/// edits to the source grid do not affect it. Empty markers are
/// preserved so paste can skip them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipboardPayload {
    cells: Vec<Cell>,
    pub width: usize,
    pub height: usize,
}

impl ClipboardPayload {
    pub fn get(&self, row: usize, col: usize) -> Cell {
        debug_assert!(row < self.height && col < self.width);
        self.cells[row * self.width + col]
    }
}

/// Holder of the process-wide selection and clipboard.
#[derive(Debug, Default)]
pub struct SelectionContext {
    selection: Option<Selection>,
    clipboard: Option<ClipboardPayload>,
}

impl SelectionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a selection on `grid` at `at`. If another grid owned the
    /// previous selection, its id is returned so it can repaint before
    /// the new selection becomes visible.
    pub fn begin(&mut self, grid: GridId, at: Coord) -> Option<GridId> {
        let superseded = match self.selection {
            Some(prev) if prev.grid != grid => Some(prev.grid),
            _ => None,
        };
        self.selection = Some(Selection {
            grid,
            start: at,
            end: at,
        });
        superseded
    }

    /// Extend the active selection. Ignored when no selection is
    /// active or `grid` is not the owner.
    pub fn update_end(&mut self, grid: GridId, at: Coord) {
        if let Some(sel) = self.selection.as_mut() {
            if sel.grid == grid {
                sel.end = at;
            }
        }
    }

    /// Drop the selection, returning the owner that must repaint.
    pub fn clear(&mut self) -> Option<GridId> {
        self.selection.take().map(|s| s.grid)
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    pub fn clipboard(&self) -> Option<&ClipboardPayload> {
        self.clipboard.as_ref()
    }

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    /// Snapshot the selected rectangle of `grid` into the clipboard.
    /// A defined no-op (returns false) without an active selection.
    pub fn copy(&mut self, grid: &YearGrid) -> bool {
        let sel = match self.selection {
            Some(s) => s,
            None => return false,
        };
        let b = sel.bounds();
        let width = b.max_col - b.min_col + 1;
        let height = b.max_row - b.min_row + 1;

        let mut cells = Vec::with_capacity(width * height);
        for row in b.min_row..=b.max_row {
            for col in b.min_col..=b.max_col {
                cells.push(grid.get(Coord::new(row, col)).unwrap_or(Cell::Empty));
            }
        }
        self.clipboard = Some(ClipboardPayload {
            cells,
            width,
            height,
        });
        true
    }

    /// Copy, then blank every paintable cell in the rectangle.
    /// Returns the resulting grid, or `None` without a selection.
    pub fn cut(&mut self, grid: &YearGrid) -> Option<YearGrid> {
        if !self.copy(grid) {
            return None;
        }
        let b = self.selection.as_ref()?.bounds();
        let mut next = grid.clone();
        for row in b.min_row..=b.max_row {
            for col in b.min_col..=b.max_col {
                let at = Coord::new(row, col);
                if next.is_paintable(at) {
                    let _ = next.set(at, 0);
                }
            }
        }
        Some(next)
    }
}
