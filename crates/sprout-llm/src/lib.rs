pub mod citation;
pub mod error;
pub mod provider;
pub mod providers;
pub mod transformer;
pub mod transport;
pub mod types;

// Re-export core types
pub use citation::{collate, CitationEntry, RenderedCitations};
pub use error::{ConversionError, LLMError, Result};
pub use provider::{BaseProvider, LLMProvider, ProviderConfig, ProviderMetadata};
pub use providers::OpenAiProvider;
pub use transformer::{ChatAnswer, ResponsesTransformer, SchemaTransformer};
pub use transport::{
    default_executor, is_copilot_url, CopilotTransport, HttpExecutor, LoggingMiddleware,
};
pub use types::{InputMessage, ResponseRequest, Tool, UserLocation, WebSearchTool};
