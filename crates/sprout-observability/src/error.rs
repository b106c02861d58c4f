//! Error type for observability setup

/// Observability error type
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ObservabilityError {
    /// Invalid configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Logging setup or update failed
    #[error("Logging error: {message}")]
    Logging {
        /// Error message
        message: String,
    },
}

impl ObservabilityError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a logging error
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}

/// Result alias for observability operations
pub type Result<T> = std::result::Result<T, ObservabilityError>;
