//! Error types for car-quote

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch price sheet: {0}")]
    Fetch(String),

    #[error("Price sheet request failed with HTTP status {0}")]
    HttpStatus(u16),

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Unknown version '{version}' for model '{model}'")]
    UnknownVersion { model: String, version: String },

    #[error("Unknown plan '{0}' for the selected version")]
    UnknownPlan(String),

    #[error("No plan is offered for '{model}' / '{version}'")]
    NoPlanOffered { model: String, version: String },

    #[error("Excel export error: {0}")]
    Excel(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl Error {
    /// Whether this error came from loading the price sheet
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Error::Fetch(_) | Error::HttpStatus(_) | Error::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failure_classification() {
        assert!(Error::HttpStatus(404).is_load_failure());
        assert!(Error::Fetch("timeout".to_string()).is_load_failure());
        assert!(!Error::UnknownModel("X".to_string()).is_load_failure());
    }

    #[test]
    fn test_unknown_version_message() {
        let err = Error::UnknownVersion {
            model: "ModelX".to_string(),
            version: "V9".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown version 'V9' for model 'ModelX'");
    }
}
