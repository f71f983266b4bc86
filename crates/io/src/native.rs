// Native .heat format using SQLite

use std::path::Path;

use rusqlite::{params, Connection};

use heatmark_engine::grid::{Coord, YearGrid};
use heatmark_engine::session::Session;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS years (
    year INTEGER PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS cells (
    year INTEGER NOT NULL,
    row INTEGER NOT NULL,
    col INTEGER NOT NULL,
    level INTEGER NOT NULL,   -- 1..=4, blank cells are not stored
    PRIMARY KEY (year, row, col)
);
"#;

/// Save every open year. Only painted cells are written; blank and
/// calendar-Empty cells are implied by the year row.
pub fn save(session: &Session, path: &Path) -> Result<(), String> {
    // Delete existing file if present (SQLite will create fresh)
    if path.exists() {
        std::fs::remove_file(path).map_err(|e| e.to_string())?;
    }

    let conn = Connection::open(path).map_err(|e| e.to_string())?;
    conn.execute_batch(SCHEMA).map_err(|e| e.to_string())?;

    conn.execute(
        "INSERT INTO meta (key, value) VALUES (?1, ?2)",
        params!["format_version", crate::NATIVE_FORMAT_VERSION.to_string()],
    )
    .map_err(|e| e.to_string())?;

    conn.execute("BEGIN TRANSACTION", [])
        .map_err(|e| e.to_string())?;

    {
        let mut year_stmt = conn
            .prepare("INSERT INTO years (year) VALUES (?1)")
            .map_err(|e| e.to_string())?;
        let mut cell_stmt = conn
            .prepare("INSERT INTO cells (year, row, col, level) VALUES (?1, ?2, ?3, ?4)")
            .map_err(|e| e.to_string())?;

        for year in session.years() {
            year_stmt
                .execute(params![year as i64])
                .map_err(|e| e.to_string())?;
            let grid = match session.grid(year) {
                Some(g) => g,
                None => continue,
            };
            for (at, level) in grid.painted() {
                cell_stmt
                    .execute(params![
                        year as i64,
                        at.row as i64,
                        at.col as i64,
                        level as i64
                    ])
                    .map_err(|e| e.to_string())?;
            }
        }
    }

    conn.execute("COMMIT", []).map_err(|e| e.to_string())?;

    Ok(())
}

/// Load a session from disk. Histories restart at the loaded state.
/// Cell rows that no longer land on a valid calendar day are ignored.
pub fn load(path: &Path) -> Result<Session, String> {
    if !path.exists() {
        return Err(format!("no such file: {}", path.display()));
    }
    let conn = Connection::open(path).map_err(|e| e.to_string())?;

    let version: u32 = conn
        .query_row(
            "SELECT value FROM meta WHERE key = 'format_version'",
            [],
            |row| {
                let s: String = row.get(0)?;
                Ok(s.parse().unwrap_or(1))
            },
        )
        .unwrap_or(1);
    if version > crate::NATIVE_FORMAT_VERSION {
        return Err(format!(
            "file uses format version {} but this build reads up to {}",
            version,
            crate::NATIVE_FORMAT_VERSION
        ));
    }

    let mut session = Session::new();

    let mut year_stmt = conn
        .prepare("SELECT year FROM years ORDER BY year")
        .map_err(|e| e.to_string())?;
    let years = year_stmt
        .query_map([], |row| row.get::<_, i64>(0))
        .map_err(|e| e.to_string())?;

    for year in years {
        let year = year.map_err(|e| e.to_string())? as i32;
        let mut grid = match YearGrid::new(year) {
            Some(g) => g,
            None => continue,
        };

        let mut cell_stmt = conn
            .prepare("SELECT row, col, level FROM cells WHERE year = ?1")
            .map_err(|e| e.to_string())?;
        let cells = cell_stmt
            .query_map(params![year as i64], |row| {
                let r: i64 = row.get(0)?;
                let c: i64 = row.get(1)?;
                let level: i64 = row.get(2)?;
                Ok((r, c, level))
            })
            .map_err(|e| e.to_string())?;

        for cell in cells {
            let (r, c, level) = cell.map_err(|e| e.to_string())?;
            if r < 0 || c < 0 || !(1..=4).contains(&level) {
                continue;
            }
            let at = Coord::new(r as usize, c as usize);
            if grid.is_paintable(at) {
                let _ = grid.set(at, level as u8);
            }
        }

        session.insert_year_grid(grid);
    }

    session.take_events();
    Ok(session)
}
