// Theme configuration
// Built-in light/dark ramps plus custom JSON themes

use crate::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Theme source - where to load the palette from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ThemeSource {
    /// Built-in light ramp (default)
    Light,
    /// Built-in dark ramp
    Dark,
    /// Custom palette from file path
    Custom(String),
}

impl Default for ThemeSource {
    fn default() -> Self {
        ThemeSource::Light
    }
}

/// JSON-serializable palette (hex strings)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteConfig {
    pub name: String,
    /// Exactly five entries, intensity 0 through 4
    pub levels: Vec<String>,
    #[serde(default = "default_accent")]
    pub accent: String,
    #[serde(default = "default_empty")]
    pub empty: String,
}

fn default_accent() -> String {
    "#1a73e8".into()
}

fn default_empty() -> String {
    "#00000000".into()
}

/// Runtime palette colors
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Cell fill per intensity level, index 0 through 4
    pub levels: [Color; 5],
    /// Selection and paste-preview outline
    pub accent: Color,
    /// Fill for cells outside the year's calendar
    pub empty: Color,
}

impl Palette {
    /// Built-in light ramp (the familiar contribution-graph greens)
    pub fn light() -> Self {
        Palette {
            levels: [
                Color::from_hex(0xebedf0),
                Color::from_hex(0x9be9a8),
                Color::from_hex(0x40c463),
                Color::from_hex(0x30a14e),
                Color::from_hex(0x216e39),
            ],
            accent: Color::from_hex(0x1a73e8),
            empty: Color::from_rgba(0.0, 0.0, 0.0, 0.0),
        }
    }

    /// Built-in dark ramp
    pub fn dark() -> Self {
        Palette {
            levels: [
                Color::from_hex(0x161b22),
                Color::from_hex(0x0e4429),
                Color::from_hex(0x006d32),
                Color::from_hex(0x26a641),
                Color::from_hex(0x39d353),
            ],
            accent: Color::from_hex(0x58a6ff),
            empty: Color::from_rgba(0.0, 0.0, 0.0, 0.0),
        }
    }

    /// Fill color for an intensity level (clamped to 4)
    pub fn level(&self, level: u8) -> Color {
        self.levels[level.min(4) as usize]
    }

    /// Resolve a theme source, falling back to the light ramp when a
    /// custom file is missing or malformed.
    pub fn from_source(source: &ThemeSource) -> Self {
        match source {
            ThemeSource::Light => Self::light(),
            ThemeSource::Dark => Self::dark(),
            ThemeSource::Custom(path) => match Self::load_custom(Path::new(path)) {
                Ok(palette) => palette,
                Err(e) => {
                    eprintln!("Error loading theme {}: {}", path, e);
                    Self::light()
                }
            },
        }
    }

    fn load_custom(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let config: PaletteConfig =
            serde_json::from_str(&contents).map_err(|e| e.to_string())?;
        Self::from_config(&config)
    }

    pub fn from_config(config: &PaletteConfig) -> Result<Self, String> {
        if config.levels.len() != 5 {
            return Err(format!(
                "palette needs exactly 5 level colors, got {}",
                config.levels.len()
            ));
        }
        let mut levels = [Color::from_rgb(0.0, 0.0, 0.0); 5];
        for (i, hex) in config.levels.iter().enumerate() {
            levels[i] = parse_hex(hex)?;
        }
        Ok(Palette {
            levels,
            accent: parse_hex(&config.accent)?,
            empty: parse_hex(&config.empty)?,
        })
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}

/// Parse "#RRGGBB" or "#RRGGBBAA"
fn parse_hex(hex: &str) -> Result<Color, String> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    match digits.len() {
        6 => {
            let value =
                u32::from_str_radix(digits, 16).map_err(|_| format!("bad hex color: {}", hex))?;
            Ok(Color::from_hex(value))
        }
        8 => {
            let value =
                u32::from_str_radix(digits, 16).map_err(|_| format!("bad hex color: {}", hex))?;
            let base = Color::from_hex(value >> 8);
            Ok(Color::from_rgba(
                base.r,
                base.g,
                base.b,
                (value & 0xFF) as f32 / 255.0,
            ))
        }
        _ => Err(format!("bad hex color: {}", hex)),
    }
}
