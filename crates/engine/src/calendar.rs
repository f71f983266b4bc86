//! Calendar-to-grid coordinate math.
//!
//! A year's grid has 7 rows (one per weekday, row 0 = Sunday) and one
//! column per week. Both directions of the date⇄cell mapping live here;
//! they must round-trip exactly for every valid day of every year, or
//! import/export silently corrupts data.
//!
//! All arithmetic is on `chrono::NaiveDate` civil dates, so the layout
//! is identical regardless of host timezone or DST rules.

use chrono::{Datelike, Days, NaiveDate};

use crate::grid::Coord;

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

fn jan1(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// Weekday index of January 1 (0 = Sunday .. 6 = Saturday).
/// `None` if the year is outside the representable date range.
pub fn first_weekday(year: i32) -> Option<u32> {
    jan1(year).map(|d| d.weekday().num_days_from_sunday())
}

/// Number of week columns in the year's grid.
///
/// The trailing `+1` guard column absorbs the rounding at the year
/// boundary; without it December 31 falls outside the grid in some
/// years. Keep the formula as-is.
pub fn total_weeks(year: i32) -> Option<usize> {
    let first = first_weekday(year)? as usize;
    let days = days_in_year(year) as usize;
    Some((days + first + 6) / 7 + 1)
}

/// Calendar date at a grid position, or `None` for cells that fall
/// before January 1 or after December 31 (those cells are Empty).
pub fn cell_to_date(year: i32, at: Coord) -> Option<NaiveDate> {
    let first = first_weekday(year)? as i64;
    let offset = at.col as i64 * 7 + at.row as i64 - first;
    if offset < 0 {
        return None;
    }
    let date = jan1(year)?.checked_add_days(Days::new(offset as u64))?;
    if date.year() != year {
        return None;
    }
    Some(date)
}

/// Grid position of a calendar date. Inverse of [`cell_to_date`] for
/// every date whose year the grid covers.
pub fn date_to_cell(date: NaiveDate) -> Coord {
    // The date exists, so its year's January 1 does too.
    let first = first_weekday(date.year()).unwrap_or(0) as usize;
    let day_of_year = date.ordinal0() as usize;
    Coord::new((day_of_year + first) % 7, (day_of_year + first) / 7)
}
