use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calendar;

/// Grids always have one row per weekday.
pub const GRID_ROWS: usize = 7;

/// One day-cell of a year grid.
///
/// `Empty` marks positions that are not calendar days of the grid's
/// year (the lead-in before January 1 and the tail after December 31).
/// The Empty set is fixed at grid creation and no tool ever writes to
/// an Empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    /// Painted intensity, 0 (blank) through 4 (darkest).
    Level(u8),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn level(&self) -> Option<u8> {
        match self {
            Cell::Empty => None,
            Cell::Level(l) => Some(*l),
        }
    }
}

/// A (row, col) grid position. Row 0 = Sunday, col 0 = first week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Coordinate outside the matrix. Callers are expected to clamp
    /// before indexing; this is a contract violation, not user input.
    OutOfBounds { at: Coord, rows: usize, cols: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds { at, rows, cols } => {
                write!(f, "coordinate {} outside {}x{} grid", at, rows, cols)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// The intensity matrix for one calendar year.
///
/// Flat row-major buffer, 7 rows by [`calendar::total_weeks`] columns.
/// `Clone` is a deep copy and `PartialEq` a deep comparison; history
/// snapshots rely on both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearGrid {
    year: i32,
    cols: usize,
    cells: Vec<Cell>,
}

impl YearGrid {
    /// Build the grid for a year, stamping `Empty` outside valid days
    /// and `Level(0)` inside. `None` if the year has no calendar
    /// representation.
    pub fn new(year: i32) -> Option<Self> {
        let cols = calendar::total_weeks(year)?;
        let mut cells = vec![Cell::Empty; GRID_ROWS * cols];
        for col in 0..cols {
            for row in 0..GRID_ROWS {
                if calendar::cell_to_date(year, Coord::new(row, col)).is_some() {
                    cells[row * cols + col] = Cell::Level(0);
                }
            }
        }
        Some(Self { year, cols, cells })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn rows(&self) -> usize {
        GRID_ROWS
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, at: Coord) -> bool {
        at.row < GRID_ROWS && at.col < self.cols
    }

    fn idx(&self, at: Coord) -> usize {
        at.row * self.cols + at.col
    }

    pub fn get(&self, at: Coord) -> Result<Cell, GridError> {
        if !self.in_bounds(at) {
            return Err(GridError::OutOfBounds {
                at,
                rows: GRID_ROWS,
                cols: self.cols,
            });
        }
        Ok(self.cells[self.idx(at)])
    }

    /// Paint a cell. Writes to an `Empty` cell are silently ignored;
    /// out-of-range coordinates are an error, never wrapped.
    pub fn set(&mut self, at: Coord, level: u8) -> Result<(), GridError> {
        debug_assert!(level <= 4, "intensity {} out of range", level);
        if !self.in_bounds(at) {
            return Err(GridError::OutOfBounds {
                at,
                rows: GRID_ROWS,
                cols: self.cols,
            });
        }
        let i = self.idx(at);
        if !self.cells[i].is_empty() {
            self.cells[i] = Cell::Level(level.min(4));
        }
        Ok(())
    }

    /// In-bounds and not `Empty`.
    pub fn is_paintable(&self, at: Coord) -> bool {
        self.get(at).map(|c| !c.is_empty()).unwrap_or(false)
    }

    /// Intensity at a coordinate, `None` for Empty or out of bounds.
    pub fn level(&self, at: Coord) -> Option<u8> {
        self.get(at).ok().and_then(|c| c.level())
    }

    /// All cells with a non-zero intensity, row-major order.
    pub fn painted(&self) -> impl Iterator<Item = (Coord, u8)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            match cell.level() {
                Some(l) if l > 0 => Some((Coord::new(i / self.cols, i % self.cols), l)),
                _ => None,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stamps_empty_and_zero() {
        let grid = YearGrid::new(2024).unwrap();
        assert_eq!(grid.cols(), 54);
        // 2024 starts Monday: (0, 0) is the Sunday before New Year.
        assert_eq!(grid.get(Coord::new(0, 0)), Ok(Cell::Empty));
        assert_eq!(grid.get(Coord::new(1, 0)), Ok(Cell::Level(0)));
        let valid = grid
            .cells
            .iter()
            .filter(|c| !c.is_empty())
            .count();
        assert_eq!(valid, 366);
    }

    #[test]
    fn test_get_out_of_bounds_errors() {
        let grid = YearGrid::new(2024).unwrap();
        assert!(matches!(
            grid.get(Coord::new(7, 0)),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(matches!(
            grid.get(Coord::new(0, 54)),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_set_ignores_empty_cells() {
        let mut grid = YearGrid::new(2024).unwrap();
        grid.set(Coord::new(0, 0), 4).unwrap();
        assert_eq!(grid.get(Coord::new(0, 0)), Ok(Cell::Empty));
        grid.set(Coord::new(1, 0), 4).unwrap();
        assert_eq!(grid.get(Coord::new(1, 0)), Ok(Cell::Level(4)));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut grid = YearGrid::new(2024).unwrap();
        let copy = grid.clone();
        grid.set(Coord::new(1, 0), 3).unwrap();
        assert_eq!(copy.get(Coord::new(1, 0)), Ok(Cell::Level(0)));
        assert_ne!(grid, copy);
    }

    #[test]
    fn test_painted_skips_blank_and_empty() {
        let mut grid = YearGrid::new(2024).unwrap();
        grid.set(Coord::new(1, 0), 3).unwrap();
        grid.set(Coord::new(2, 0), 0).unwrap();
        let painted: Vec<_> = grid.painted().collect();
        assert_eq!(painted, vec![(Coord::new(1, 0), 3)]);
    }
}
