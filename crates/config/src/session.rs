// Persisted shell state: what was open when the app last closed
// Stored at ~/.config/heatmark/session.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use heatmark_engine::session::Tool;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionState {
    pub version: u32,
    pub current_file: Option<PathBuf>,
    pub open_years: Vec<i32>,
    pub active_year: Option<i32>,
    pub active_tool: Tool,
    pub intensity: u8,
    pub dark_mode: bool,
}

impl SessionState {
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("heatmark")
            .join("session.json")
    }

    pub fn load() -> Option<Self> {
        let path = Self::path();
        fs::read_to_string(&path).ok()
            .and_then(|s| serde_json::from_str(&s).ok())
    }

    pub fn save(&self) -> Result<(), String> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(&path, json).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_fresh() {
        let state = SessionState::default();
        assert!(state.current_file.is_none());
        assert!(state.open_years.is_empty());
        assert_eq!(state.active_tool, Tool::Pencil);
    }

    #[test]
    fn test_tool_serializes_snake_case() {
        let state = SessionState {
            active_tool: Tool::RectangleBorder,
            ..Default::default()
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"rectangle_border\""));
        let back: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.active_tool, Tool::RectangleBorder);
    }

    #[test]
    fn test_unknown_fields_do_not_break_load() {
        let back: SessionState =
            serde_json::from_str(r#"{"open_years": [2024], "future_field": true}"#).unwrap();
        assert_eq!(back.open_years, vec![2024]);
    }
}
