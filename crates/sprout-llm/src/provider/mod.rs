pub mod base;
pub mod config;
pub mod metadata;

pub use base::BaseProvider;
pub use config::ProviderConfig;
pub use metadata::{LLMProvider, ProviderMetadata};
