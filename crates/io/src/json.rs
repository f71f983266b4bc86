// Sparse JSON interchange: {"YYYY-MM-DD": level, ...}

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::NaiveDate;
use serde_json::Value;

use heatmark_engine::session::Session;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Serialize every open year's painted cells as a sorted date map.
pub fn to_string(session: &Session) -> Result<String, String> {
    serde_json::to_string_pretty(&session.export_map()).map_err(|e| e.to_string())
}

/// Export the session's painted cells to a JSON file.
pub fn export(session: &Session, path: &Path) -> Result<(), String> {
    let file = File::create(path).map_err(|e| e.to_string())?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &session.export_map()).map_err(|e| e.to_string())
}

/// Parse an interchange payload. Validation is all-or-nothing: a
/// single malformed key or value rejects the whole payload, so a
/// failed import never partially applies.
pub fn parse(text: &str) -> Result<BTreeMap<NaiveDate, u8>, String> {
    let value: Value = serde_json::from_str(text).map_err(|e| format!("invalid JSON: {}", e))?;
    let object = match value {
        Value::Object(map) => map,
        other => {
            return Err(format!(
                "expected a JSON object of date keys, got {}",
                type_name(&other)
            ))
        }
    };

    let mut entries = BTreeMap::new();
    for (key, raw) in &object {
        let date = NaiveDate::parse_from_str(key, DATE_FORMAT)
            .map_err(|_| format!("invalid date key: {:?}", key))?;
        let level = match raw.as_u64() {
            Some(n @ 1..=4) => n as u8,
            _ => {
                return Err(format!(
                    "invalid level for {:?}: expected an integer 1-4, got {}",
                    key, raw
                ))
            }
        };
        entries.insert(date, level);
    }
    Ok(entries)
}

/// Parse and apply a payload onto the session. Years are opened
/// lazily; entries whose date falls on a cell outside the target
/// year's calendar are skipped. Returns the years that changed.
pub fn import(session: &mut Session, text: &str) -> Result<Vec<i32>, String> {
    let entries = parse(text)?;
    Ok(session.apply_import(&entries))
}

/// Import from a file.
pub fn import_file(session: &mut Session, path: &Path) -> Result<Vec<i32>, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    import(session, &text)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
