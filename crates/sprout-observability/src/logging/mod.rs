//! Structured logging
//!
//! Installs a global `tracing` subscriber whose filter can be changed at runtime.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing_subscriber::{
    filter::Directive,
    layer::SubscriberExt,
    reload::{self, Handle},
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

use crate::config::LoggingConfig;
use crate::error::{ObservabilityError, Result};

/// Reload handle for the active filter
type ReloadHandle = Handle<EnvFilter, Registry>;

/// Owns the global subscriber's filter
#[derive(Debug)]
pub struct LogManager {
    config: LoggingConfig,
    reload_handle: Arc<RwLock<ReloadHandle>>,
}

impl LogManager {
    /// Install the global subscriber.
    ///
    /// Fails if a global subscriber is already set.
    pub fn init(config: LoggingConfig) -> Result<Self> {
        config.validate()?;
        let filter = build_filter(&config)?;
        let (filter, reload_handle) = reload::Layer::new(filter);

        let registry = tracing_subscriber::registry().with(filter);

        let installed = if config.json_format {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_target(config.include_target)
                .with_thread_ids(config.include_thread_id)
                .with_line_number(config.include_line_number)
                .with_file(true)
                .with_ansi(config.ansi_colors);

            registry.with(layer).try_init()
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_target(config.include_target)
                .with_thread_ids(config.include_thread_id)
                .with_line_number(config.include_line_number)
                .with_file(true)
                .with_ansi(config.ansi_colors);

            registry.with(layer).try_init()
        };
        installed.map_err(|e| ObservabilityError::logging(format!("Failed to install subscriber: {}", e)))?;

        tracing::info!(
            target: "sprout_observability",
            "Log manager initialized with level: {}",
            config.level
        );

        Ok(Self {
            config,
            reload_handle: Arc::new(RwLock::new(reload_handle)),
        })
    }

    /// Swap the default level without reinstalling the subscriber
    pub fn update_level(&mut self, level: &str) -> Result<()> {
        let mut config = self.config.clone();
        config.level = level.to_string();
        let new_filter = build_filter(&config)?;

        self.reload_handle
            .write()
            .modify(|filter| *filter = new_filter)
            .map_err(|e| ObservabilityError::logging(format!("Failed to update log level: {}", e)))?;

        self.config = config;
        tracing::info!(target: "sprout_observability", "Log level updated to: {}", level);
        Ok(())
    }

    /// Current configuration
    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }
}

/// Build the filter for `config`: the default level plus per-module directives
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let mut filter = EnvFilter::try_new(&config.level)
        .map_err(|e| ObservabilityError::logging(format!("Invalid log level: {}", e)))?;

    for (module, level) in &config.module_levels {
        let directive: Directive = format!("{}={}", module, level)
            .parse()
            .map_err(|e| ObservabilityError::logging(format!("Invalid directive: {}", e)))?;
        filter = filter.add_directive(directive);
    }

    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_with_modules() {
        let config = LoggingConfig::default()
            .with_level("warn")
            .with_module_level("sprout_llm", "debug");

        let filter = build_filter(&config).unwrap();
        let rendered = filter.to_string();
        assert!(rendered.contains("warn"));
        assert!(rendered.contains("sprout_llm=debug"));
    }

    #[test]
    fn test_build_filter_rejects_bad_directives() {
        let bad_level = LoggingConfig::default().with_level("sprout_llm=loud");
        assert!(matches!(build_filter(&bad_level), Err(ObservabilityError::Logging { .. })));

        let bad_module = LoggingConfig::default().with_module_level("sprout_llm", "loud");
        assert!(matches!(build_filter(&bad_module), Err(ObservabilityError::Logging { .. })));
    }

    #[test]
    fn test_init_once_then_update() {
        let mut manager = LogManager::init(LoggingConfig::default().with_json_format(true)).unwrap();
        assert!(LogManager::init(LoggingConfig::default()).is_err());

        manager.update_level("debug").unwrap();
        assert_eq!(manager.config().level, "debug");
        assert!(manager.update_level("sprout_llm=loud").is_err());
        assert_eq!(manager.config().level, "debug");
    }
}
