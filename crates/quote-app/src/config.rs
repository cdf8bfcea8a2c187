//! Configuration management for car-quote
//!
//! Config stored at: ~/.config/car-quote/config.json

use std::path::PathBuf;
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use quote_types::{ConfigError, OutputFormat, Result};

/// Published export of the dealership price sheet
pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vTXy0hBS-sxSyOU7VNpyuQtOZBin6hAWw6Wt_RGOxTOIhlVXShbQp5ne0A48nYYrhQAByaP7fu8m0Fl/pub?gid=796832465&single=true&output=csv";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Published CSV export URL
    #[serde(default = "default_sheet_url")]
    pub sheet_url: String,

    /// Local CSV used instead of the URL (optional)
    #[serde(default)]
    pub price_file: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Shop name shown in the header
    #[serde(default = "default_shop_name")]
    pub shop_name: String,

    /// Quote title override; computed from today's date when unset
    #[serde(default)]
    pub quote_title: Option<String>,
}

fn default_sheet_url() -> String {
    DEFAULT_SHEET_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_shop_name() -> String {
    "皇昌車業".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_url: default_sheet_url(),
            price_file: None,
            timeout_secs: default_timeout_secs(),
            output_format: default_output_format(),
            shop_name: default_shop_name(),
            quote_title: None,
        }
    }
}

/// Title in the ROC calendar used on printed quotes, e.g. "115年 1月 報價單"
pub fn roc_quote_title(date: NaiveDate) -> String {
    format!("{}年 {}月 報價單", date.year() - 1911, date.month())
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("car-quote");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Configured title, or the ROC-calendar title for the current month
    pub fn quote_title(&self) -> String {
        self.quote_title
            .clone()
            .unwrap_or_else(|| roc_quote_title(Local::now().date_naive()))
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Car Quote Configuration")?;
        writeln!(f, "=======================")?;
        writeln!(f)?;
        writeln!(f, "Sheet URL:      {}", self.sheet_url)?;
        writeln!(
            f,
            "Price file:     {}",
            self.price_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string())
        )?;
        writeln!(f, "Timeout:        {}s", self.timeout_secs)?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(f, "Shop name:      {}", self.shop_name)?;
        writeln!(f, "Quote title:    {}", self.quote_title())?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roc_title() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        assert_eq!(roc_quote_title(date), "115年 1月 報價單");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.sheet_url, DEFAULT_SHEET_URL);
        assert_eq!(config.shop_name, "皇昌車業");
        assert!(config.price_file.is_none());
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_title_override() {
        let config = Config {
            quote_title: Some("特別報價".to_string()),
            ..Default::default()
        };
        assert_eq!(config.quote_title(), "特別報價");
    }

    #[test]
    fn test_roundtrip_json() {
        let config = Config {
            price_file: Some(PathBuf::from("/tmp/prices.csv")),
            output_format: OutputFormat::Json,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
