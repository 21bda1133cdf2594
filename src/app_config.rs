use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Input protocol name; resolved from the file extension when absent
    #[serde(default)]
    pub input_format: Option<String>,

    /// Output protocol name; resolved from the file extension when absent
    #[serde(default)]
    pub output_format: Option<String>,

    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty_json: bool,

    /// Fields merged into every payload before validation (mixin)
    #[serde(default)]
    pub mixin: Map<String, Value>,

    /// Fields every payload must carry to pass validation
    #[serde(default)]
    pub required_fields: Vec<String>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_format: None,
            output_format: None,
            pretty_json: false,
            mixin: Map::new(),
            required_fields: Vec::new(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        // Validate format names
        for format in [&self.input_format, &self.output_format].into_iter().flatten() {
            if format.trim().is_empty() {
                return Err(anyhow!("Format names must not be blank"));
            }
        }

        // Validate mixin keys
        if self.mixin.keys().any(|k| k.trim().is_empty()) {
            return Err(anyhow!("Mixin field names must not be blank"));
        }

        // Validate required field names
        if self.required_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(anyhow!("Required field names must not be blank"));
        }

        Ok(())
    }
}
