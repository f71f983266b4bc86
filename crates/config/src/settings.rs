// Application settings
// Loaded from ~/.config/heatmark/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Grid appearance
    #[serde(rename = "grid.cellSize")]
    pub cell_size: f32,

    #[serde(rename = "grid.cellPadding")]
    pub cell_padding: f32,

    #[serde(rename = "grid.showWeekdayLabels")]
    pub show_weekday_labels: bool,

    #[serde(rename = "grid.showMonthLabels")]
    pub show_month_labels: bool,

    // Editing
    #[serde(rename = "editor.defaultIntensity")]
    pub default_intensity: u8,

    #[serde(rename = "editor.historyLimit")]
    pub history_limit: usize,

    // File
    #[serde(rename = "file.recentFilesLimit")]
    pub recent_files_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Grid
            cell_size: 10.0,
            cell_padding: 2.0,
            show_weekday_labels: true,
            show_month_labels: true,
            // Editing
            default_intensity: 1,
            history_limit: 100,
            // File
            recent_files_limit: 10,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("heatmark");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file();
            return settings;
        }

        match fs::read_to_string(&path) {
            Ok(contents) => {
                // Strip comments (lines starting with //)
                let cleaned: String = contents
                    .lines()
                    .filter(|line| !line.trim().starts_with("//"))
                    .collect::<Vec<_>>()
                    .join("\n");

                match serde_json::from_str(&cleaned) {
                    Ok(settings) => settings,
                    Err(e) => {
                        eprintln!("Error parsing settings.json: {}", e);
                        eprintln!("Using default settings");
                        Self::default()
                    }
                }
            }
            Err(e) => {
                eprintln!("Error reading settings.json: {}", e);
                Self::default()
            }
        }
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path = Self::config_path();

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| e.to_string())?;

        fs::write(&path, json).map_err(|e| e.to_string())
    }

    /// Create default settings file with comments
    fn create_default_file(&self) {
        let path = Self::config_path();

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Error creating config directory: {}", e);
                return;
            }
        }

        let default_config = r#"{
    // Grid appearance (cell size and padding in pixels)
    "grid.cellSize": 10,
    "grid.cellPadding": 2,
    "grid.showWeekdayLabels": true,
    "grid.showMonthLabels": true,

    // Editing
    // Intensity painted by a fresh session (0-4)
    "editor.defaultIntensity": 1,
    // Undo entries kept per year
    "editor.historyLimit": 100,

    // File handling
    "file.recentFilesLimit": 10
}
"#;

        if let Err(e) = fs::write(&path, default_config) {
            eprintln!("Error writing default settings.json: {}", e);
        }
    }

    /// Get the config file path for display/opening
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}
