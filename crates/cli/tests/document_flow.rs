// End-to-end document lifecycle through the same layers the binary
// drives: engine session ops bracketed by native load/save.

use chrono::NaiveDate;
use tempfile::tempdir;

use heatmark_engine::calendar;
use heatmark_engine::grid::Coord;
use heatmark_engine::session::{Session, Tool};
use heatmark_io::{json, native};

fn paint_day(session: &mut Session, date: NaiveDate, level: u8) {
    use chrono::Datelike;
    session.set_tool(Tool::Pencil);
    session.set_intensity(level);
    session.begin_gesture(date.year(), calendar::date_to_cell(date));
    session.end_gesture(None);
}

#[test]
fn paint_save_reload_export() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("activity.heat");

    let mut session = Session::new();
    assert!(session.add_year(2024));
    paint_day(&mut session, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), 3);
    native::save(&session, &path).unwrap();

    let reloaded = native::load(&path).unwrap();
    let text = json::to_string(&reloaded).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["2024-03-05"], 3);
}

#[test]
fn rect_between_dates_fills_week_block() {
    let mut session = Session::new();
    session.add_year(2024);
    session.set_tool(Tool::Rectangle);
    session.set_intensity(2);

    // Mon Mar 4 through Fri Apr 12, 2024
    let a = calendar::date_to_cell(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    let b = calendar::date_to_cell(NaiveDate::from_ymd_opt(2024, 4, 12).unwrap());
    session.begin_gesture(2024, a);
    session.end_gesture(Some(b));

    let map = session.export_map();
    // Corners and an interior day.
    assert_eq!(map.get("2024-03-04"), Some(&2));
    assert_eq!(map.get("2024-04-12"), Some(&2));
    assert_eq!(map.get("2024-03-20"), Some(&2));
    // Same weekday band, outside the weeks.
    assert!(map.get("2024-03-01").is_none());
    assert!(map.get("2024-04-15").is_none());
}

#[test]
fn region_copy_stamps_across_years() {
    let mut session = Session::new();
    session.add_year(2024);
    session.add_year(2025);
    paint_day(&mut session, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 4);

    session.set_tool(Tool::Select);
    let from = calendar::date_to_cell(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    session.begin_gesture(2024, from);
    session.end_gesture(None);
    assert!(session.copy());

    session.set_tool(Tool::Paste);
    let at = calendar::date_to_cell(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
    assert!(session.begin_gesture(2025, at));

    assert_eq!(session.export_map().get("2025-06-02"), Some(&4));
}

#[test]
fn import_rejects_bad_payload_without_touching_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("activity.heat");

    let mut session = Session::new();
    session.add_year(2024);
    paint_day(&mut session, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 1);
    native::save(&session, &path).unwrap();

    let mut loaded = native::load(&path).unwrap();
    let before = loaded.export_map();
    assert!(json::import(&mut loaded, r#"{"2024-02-01": 7}"#).is_err());
    assert_eq!(loaded.export_map(), before);
}

#[test]
fn import_opens_missing_years() {
    let mut session = Session::new();
    session.add_year(2024);
    let changed = json::import(&mut session, r#"{"2026-12-25": 2}"#).unwrap();
    assert_eq!(changed, vec![2026]);
    assert_eq!(session.years(), vec![2024, 2026]);
}

#[test]
fn erase_with_level_zero() {
    let mut session = Session::new();
    session.add_year(2024);
    let day = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
    paint_day(&mut session, day, 3);
    assert_eq!(session.export_map().len(), 1);
    paint_day(&mut session, day, 0);
    assert!(session.export_map().is_empty());
}

#[test]
fn guard_week_never_exports() {
    // Painting the last column only reaches real days; the guard week
    // holds no dates, so a full-height rectangle over the final weeks
    // exports only entries parseable back into the year.
    let mut session = Session::new();
    session.add_year(2024);
    session.set_tool(Tool::Rectangle);
    session.set_intensity(1);
    let grid_cols = session.grid(2024).unwrap().cols();
    session.begin_gesture(2024, Coord::new(0, grid_cols - 2));
    session.end_gesture(Some(Coord::new(6, grid_cols - 1)));

    for key in session.export_map().keys() {
        let date = NaiveDate::parse_from_str(key, "%Y-%m-%d").unwrap();
        use chrono::Datelike;
        assert_eq!(date.year(), 2024);
    }
}
