//! Application settings loading from config.toml
//!
//! Settings control presentation defaults: which currency glyph to print, which
//! reminder window the dashboard opens with, and the fixed service vocabulary
//! offered when adding a subscription. Every field has a default, so a missing
//! file is not an error.

use crate::core::stats::ReminderWindow;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Glyph prepended to amounts in messages
    pub currency_symbol: String,
    /// Window the dashboard uses when none is given
    pub default_window: ReminderWindow,
    /// Subscriptions expiring within this many days are flagged urgent
    pub urgent_days: i64,
    /// How far ahead the reminder list looks
    pub alert_lookahead_days: i64,
    /// Known service names offered by autocomplete
    pub services: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            default_window: ReminderWindow::SevenDays,
            urgent_days: 7,
            alert_lookahead_days: 7,
            services: [
                "Netflix",
                "Prime Video",
                "YouTube Premium",
                "Zee5",
                "SonyLiv",
                "Hotstar",
                "Spotify",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
        }
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A field has the wrong type or an unknown window code
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    parse_settings(&contents)
}

/// Parses settings from TOML text
pub fn parse_settings(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from ./config.toml, or the defaults when the file is absent
pub fn load_default_settings() -> Result<Settings> {
    let path = Path::new("config.toml");
    if !path.exists() {
        tracing::info!("No config.toml found, using default settings");
        return Ok(Settings::default());
    }
    load_settings(path)
}
