pub mod responses;

pub use responses::ResponsesTransformer;

use serde::Serialize;
use serde_json::Value;
use sprout_core::{ChatMessage, ChatOptions};

use crate::citation::RenderedCitations;
use crate::error::ConversionError;

/// Schema transformer trait for converting between internal and provider formats
pub trait SchemaTransformer: Send + Sync {
    /// Provider request body
    type Request: Serialize + Send + Sync;

    /// Get the provider ID
    fn provider_id(&self) -> &str;

    /// Path of the generation endpoint, relative to the base URL
    fn endpoint(&self) -> &str;

    /// Build the provider request. Never fails.
    fn transform_request(&self, messages: &[ChatMessage], options: &ChatOptions) -> Self::Request;

    /// Parse a complete (non-streaming) response
    fn parse_response(&self, data: &Value) -> Result<ChatAnswer, ConversionError>;
}

/// Generated text plus the sources it cites
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatAnswer {
    pub text: String,
    pub citations: RenderedCitations,
}

impl ChatAnswer {
    /// Final answer text, with the Sources section appended when there is one
    pub fn into_text(self) -> String {
        let mut text = self.text;
        self.citations.append_to(&mut text);
        text
    }
}
