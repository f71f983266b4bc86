//! Per-year undo/redo history.
//!
//! A history is a linear sequence of full-grid snapshots plus a
//! cursor. Pushing while the cursor is behind the end truncates the
//! abandoned future; pushing a state equal to the current one is a
//! no-op. One completed gesture produces at most one entry, however
//! many cells it touched.

use crate::grid::YearGrid;

const DEFAULT_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct History {
    stack: Vec<YearGrid>,
    cursor: usize,
    max_entries: usize,
}

impl History {
    /// A history always holds at least one entry: the grid it was
    /// created with.
    pub fn new(initial: YearGrid) -> Self {
        Self::with_limit(initial, DEFAULT_LIMIT)
    }

    pub fn with_limit(initial: YearGrid, max_entries: usize) -> Self {
        Self {
            stack: vec![initial],
            cursor: 0,
            max_entries: max_entries.max(1),
        }
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &YearGrid {
        &self.stack[self.cursor]
    }

    /// Record a new state. Returns false (and records nothing) when
    /// `grid` equals the current snapshot. Otherwise drops any redo
    /// future, appends, and advances the cursor; the oldest snapshot
    /// falls off once the limit is reached.
    pub fn push(&mut self, grid: YearGrid) -> bool {
        if grid == self.stack[self.cursor] {
            return false;
        }
        self.stack.truncate(self.cursor + 1);
        self.stack.push(grid);
        self.cursor += 1;

        if self.stack.len() > self.max_entries {
            self.stack.remove(0);
            self.cursor -= 1;
        }
        true
    }

    /// Step back, returning the restored state. `None` at the start.
    pub fn undo(&mut self) -> Option<YearGrid> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.stack[self.cursor].clone())
    }

    /// Step forward, returning the restored state. `None` at the end.
    pub fn redo(&mut self) -> Option<YearGrid> {
        if self.cursor + 1 >= self.stack.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.stack[self.cursor].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.stack.len()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        false // a history always holds its initial entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Coord, YearGrid};
    use crate::harness::painted;

    fn base() -> YearGrid {
        YearGrid::new(2024).unwrap()
    }

    #[test]
    fn test_starts_with_one_entry() {
        let h = History::new(base());
        assert_eq!(h.len(), 1);
        assert!(!h.can_undo());
        assert!(!h.can_redo());
    }

    #[test]
    fn test_undo_at_start_and_redo_at_end_fail() {
        let mut h = History::new(base());
        assert!(h.undo().is_none());
        assert!(h.redo().is_none());
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn test_push_unchanged_state_is_noop() {
        let mut h = History::new(base());
        assert!(!h.push(base()));
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn test_undo_redo_walk_the_stack() {
        let mut h = History::new(base());
        let a = painted(&base(), &[(1, 0, 1)]);
        let b = painted(&a, &[(2, 0, 2)]);
        assert!(h.push(a.clone()));
        assert!(h.push(b.clone()));

        assert_eq!(h.undo().as_ref(), Some(&a));
        assert_eq!(h.undo().as_ref(), Some(&base()));
        assert!(h.undo().is_none());
        assert_eq!(h.redo().as_ref(), Some(&a));
        assert_eq!(h.redo().as_ref(), Some(&b));
        assert!(h.redo().is_none());
    }

    #[test]
    fn test_push_truncates_future() {
        // push A, push B, undo, push C: redo must fail, C replaced B.
        let mut h = History::new(base());
        let a = painted(&base(), &[(1, 0, 1)]);
        let b = painted(&base(), &[(2, 0, 2)]);
        let c = painted(&base(), &[(3, 0, 3)]);
        h.push(a.clone());
        h.push(b);
        h.undo();
        assert!(h.push(c.clone()));
        assert!(h.redo().is_none());
        assert_eq!(h.current(), &c);
        assert_eq!(h.undo().as_ref(), Some(&a));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut h = History::with_limit(base(), 3);
        let mut grid = base();
        for i in 0..5u8 {
            grid.set(Coord::new(1, i as usize), (i % 4) + 1).unwrap();
            h.push(grid.clone());
        }
        assert_eq!(h.len(), 3);
        // Two undos reach the oldest retained snapshot; a third fails.
        assert!(h.undo().is_some());
        assert!(h.undo().is_some());
        assert!(h.undo().is_none());
    }
}
