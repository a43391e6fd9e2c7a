//! # Converter Settings
//!
//! User preferences for front ends, persisted as a small JSON file.
//!
//! Saves are atomic: the JSON is written to a `.tmp` sibling, synced, then
//! renamed over the target, so an interrupted save never leaves a truncated
//! settings file behind.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lunar_core::settings::{load_settings, save_settings, ConverterSettings, Locale};
//! use std::path::Path;
//!
//! let mut settings = ConverterSettings::default();
//! settings.locale = Locale::Bilingual;
//!
//! let path = Path::new("lunar.json");
//! save_settings(&settings, path)?;
//! assert_eq!(load_settings(path)?, settings);
//! # Ok::<(), lunar_core::errors::CalendarError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalendarError, CalendarResult};

/// Language used when rendering names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    English,
    Chinese,
    /// English followed by Chinese, e.g. `Dragon (龙)`
    Bilingual,
}

impl Locale {
    /// Pick or combine the English and Chinese form of a name.
    pub fn label(&self, english: &str, chinese: &str) -> String {
        match self {
            Locale::English => english.to_string(),
            Locale::Chinese => chinese.to_string(),
            Locale::Bilingual => format!("{} ({})", english, chinese),
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "zh" | "chinese" => Ok(Locale::Chinese),
            "both" | "bilingual" => Ok(Locale::Bilingual),
            other => Err(CalendarError::invalid_input(
                "locale",
                other,
                "Expected one of: en, zh, both",
            )),
        }
    }
}

/// Front-end preferences.
///
/// ## JSON Example
///
/// ```json
/// { "locale": "Chinese", "include_solar_festivals": true, "json_output": false }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterSettings {
    /// Language for names in text output
    pub locale: Locale,

    /// Report Gregorian holidays next to lunar festivals
    pub include_solar_festivals: bool,

    /// Print results as JSON instead of text
    pub json_output: bool,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        ConverterSettings {
            locale: Locale::English,
            include_solar_festivals: true,
            json_output: false,
        }
    }
}

/// Save settings with an atomic write.
pub fn save_settings(settings: &ConverterSettings, path: &Path) -> CalendarResult<()> {
    let json = serde_json::to_string_pretty(settings)?;

    let tmp_path = path.with_extension("json.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalendarError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalendarError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalendarError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalendarError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::debug!(path = %path.display(), "saved settings");
    Ok(())
}

/// Load settings from a file. Missing fields take their defaults.
pub fn load_settings(path: &Path) -> CalendarResult<ConverterSettings> {
    let mut file = File::open(path).map_err(|e| {
        CalendarError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalendarError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let settings = serde_json::from_str(&contents).map_err(|e| {
        CalendarError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })?;

    tracing::debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// Load settings if a path is given, otherwise use the defaults.
pub fn load_or_default(path: Option<&Path>) -> CalendarResult<ConverterSettings> {
    match path {
        Some(path) => load_settings(path),
        None => Ok(ConverterSettings::default()),
    }
}
