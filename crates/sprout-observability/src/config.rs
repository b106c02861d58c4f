//! Logging configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{ObservabilityError, Result};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level or filter directives (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human readable output
    #[serde(default)]
    pub json_format: bool,

    /// Include the event target
    #[serde(default = "default_true")]
    pub include_target: bool,

    /// Include thread ids
    #[serde(default)]
    pub include_thread_id: bool,

    /// Include source line numbers
    #[serde(default)]
    pub include_line_number: bool,

    /// Colorize output
    #[serde(default = "default_true")]
    pub ansi_colors: bool,

    /// Per-module levels, e.g. `sprout_llm = "debug"`
    #[serde(default)]
    pub module_levels: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
            include_target: true,
            include_thread_id: false,
            include_line_number: false,
            ansi_colors: true,
            module_levels: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Read the level from `RUST_LOG`, falling back to the default
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(level) = std::env::var("RUST_LOG") {
            if !level.trim().is_empty() {
                config.level = level;
            }
        }
        config
    }

    /// Set the default level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Toggle JSON output
    pub fn with_json_format(mut self, json: bool) -> Self {
        self.json_format = json;
        self
    }

    /// Set a level for one module
    pub fn with_module_level(mut self, module: impl Into<String>, level: impl Into<String>) -> Self {
        self.module_levels.insert(module.into(), level.into());
        self
    }

    /// Reject empty levels before they reach the subscriber
    pub fn validate(&self) -> Result<()> {
        if self.level.trim().is_empty() {
            return Err(ObservabilityError::config("log level must not be empty"));
        }
        if let Some((module, _)) = self.module_levels.iter().find(|(_, level)| level.trim().is_empty()) {
            return Err(ObservabilityError::config(format!(
                "log level for module {} must not be empty",
                module
            )));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
