//! Observability for the sprout crates
//!
//! Structured logging on top of `tracing-subscriber`.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod logging;

pub use config::LoggingConfig;
pub use error::{ObservabilityError, Result};
pub use logging::LogManager;
