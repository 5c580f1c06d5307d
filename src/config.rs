//! Simulator-level configuration.
//!
//! The control unit itself has no configuration. These settings decide
//! what the surrounding simulator does with its results, and are read
//! from a JSON file where every field is optional.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// What to do when an instruction fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultPolicy {
    /// Stop at the first unsupported instruction.
    #[default]
    Halt,
    /// Report the fault and continue with the next word.
    Skip,
}

/// Output format for CLI reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Simulator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Fault handling for unsupported opcodes and function codes.
    pub on_unsupported: FaultPolicy,
    /// Stop after this many words. `None` decodes the whole program.
    pub max_instructions: Option<usize>,
    pub output: OutputFormat,
}

impl SimConfig {
    /// Parse a JSON configuration document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json(&text)
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("invalid configuration: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = SimConfig::from_json("{}").unwrap();
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.on_unsupported, FaultPolicy::Halt);
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_full_document() {
        let config = SimConfig::from_json(
            r#"{"on_unsupported": "skip", "max_instructions": 16, "output": "json"}"#,
        )
        .unwrap();
        assert_eq!(config.on_unsupported, FaultPolicy::Skip);
        assert_eq!(config.max_instructions, Some(16));
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_rejects_unknown_fields() {
        assert!(matches!(
            SimConfig::from_json(r#"{"on_unsuported": "skip"}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_bad_policy() {
        assert!(SimConfig::from_json(r#"{"on_unsupported": "ignore"}"#).is_err());
    }
}
