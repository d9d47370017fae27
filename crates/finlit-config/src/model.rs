use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

/// Stores user-configurable preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub plain_output: bool,
    #[serde(default = "Config::default_compounding_frequency")]
    pub default_compounding_frequency: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for ledger data. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-GB".into(),
            currency: "GBP".into(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            plain_output: false,
            default_compounding_frequency: Self::default_compounding_frequency(),
            data_dir: None,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 6] = [
        "locale",
        "currency",
        "ui_color_enabled",
        "plain_output",
        "default_compounding_frequency",
        "data_dir",
    ];

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_compounding_frequency() -> u32 {
        12
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }

        dirs::data_dir()
            .or_else(dirs::home_dir)
            .map(|base| base.join("finlit"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Updates one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "locale" if !value.is_empty() => self.locale = value.to_string(),
            "currency" if !value.is_empty() => self.currency = value.to_ascii_uppercase(),
            "ui_color_enabled" => self.ui_color_enabled = parse_flag(value).ok_or_else(invalid)?,
            "plain_output" => self.plain_output = parse_flag(value).ok_or_else(invalid)?,
            "default_compounding_frequency" => {
                let frequency: u32 = value.parse().map_err(|_| invalid())?;
                if frequency == 0 {
                    return Err(invalid());
                }
                self.default_compounding_frequency = frequency;
            }
            "data_dir" => {
                self.data_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            "locale" | "currency" => return Err(invalid()),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Key/value pairs for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("locale", self.locale.clone()),
            ("currency", self.currency.clone()),
            ("ui_color_enabled", self.ui_color_enabled.to_string()),
            ("plain_output", self.plain_output.to_string()),
            (
                "default_compounding_frequency",
                self.default_compounding_frequency.to_string(),
            ),
            ("data_dir", self.resolve_data_dir().display().to_string()),
        ]
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}
