// ASCII projection of a year grid for `heatmark show`

use heatmark_config::theme::Palette;
use heatmark_config::Color;
use heatmark_engine::grid::{Cell, Coord, YearGrid, GRID_ROWS};

/// One character per intensity level; a space marks cells outside the
/// year's calendar.
const LEVEL_CHARS: [char; 5] = ['.', '-', '+', '*', '#'];

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Render one year as rows of weeks, Sunday first. Each output line is
/// a weekday; each column is a week of the year.
pub fn render_year(grid: &YearGrid) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", grid.year()));
    for row in 0..GRID_ROWS {
        out.push_str(WEEKDAY_LABELS[row]);
        out.push(' ');
        for col in 0..grid.cols() {
            let ch = match grid.get(Coord::new(row, col)) {
                Ok(Cell::Level(level)) => LEVEL_CHARS[level.min(4) as usize],
                Ok(Cell::Empty) | Err(_) => ' ',
            };
            out.push(ch);
        }
        // Trailing guard-column spaces add nothing.
        while out.ends_with(' ') {
            out.pop();
        }
        out.push('\n');
    }
    out
}

/// Render with 24-bit ANSI background colors from a palette. Two
/// columns per cell so the blocks read roughly square.
pub fn render_year_color(grid: &YearGrid, palette: &Palette) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", grid.year()));
    for row in 0..GRID_ROWS {
        out.push_str(WEEKDAY_LABELS[row]);
        out.push(' ');
        for col in 0..grid.cols() {
            match grid.get(Coord::new(row, col)) {
                Ok(Cell::Level(level)) => {
                    out.push_str(&bg_escape(palette.level(level)));
                    out.push_str("  ");
                    out.push_str("\x1b[0m");
                }
                Ok(Cell::Empty) | Err(_) => out.push_str("  "),
            }
        }
        out.push('\n');
    }
    out
}

fn bg_escape(color: Color) -> String {
    let r = (color.r * 255.0).round() as u8;
    let g = (color.g * 255.0).round() as u8;
    let b = (color.b * 255.0).round() as u8;
    format!("\x1b[48;2;{};{};{}m", r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_shape() {
        let grid = YearGrid::new(2024).unwrap();
        let text = render_year(&grid);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8); // year header + 7 weekday rows
        assert_eq!(lines[0], "2024");
        assert!(lines[1].starts_with("Sun"));
        assert!(lines[7].starts_with("Sat"));
    }

    #[test]
    fn test_painted_cell_changes_glyph() {
        let mut grid = YearGrid::new(2024).unwrap();
        grid.set(Coord::new(1, 0), 4).unwrap(); // Jan 1 on the Monday row
        let text = render_year(&grid);
        let monday = text.lines().nth(2).unwrap();
        // "Mon " prefix, then week 0.
        assert_eq!(monday.chars().nth(4), Some('#'));
    }

    #[test]
    fn test_color_render_emits_reset_per_cell() {
        let grid = YearGrid::new(2024).unwrap();
        let text = render_year_color(&grid, &Palette::light());
        assert!(text.contains("\x1b[48;2;"));
        assert!(text.contains("\x1b[0m"));
    }

    #[test]
    fn test_cells_before_jan_1_are_blank() {
        // 2024 starts on a Monday, so the Sunday row's first week is
        // outside the year.
        let grid = YearGrid::new(2024).unwrap();
        let text = render_year(&grid);
        let sunday = text.lines().nth(1).unwrap();
        assert_eq!(sunday.chars().nth(4), Some(' '));
    }
}
