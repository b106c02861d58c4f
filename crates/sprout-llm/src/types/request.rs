//! Request body for the OpenAI Responses API (`POST /responses`).

use serde::{Deserialize, Serialize};
use sprout_core::{ChatMessage, Role};

/// Provider request assembled from a conversation and its options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRequest {
    pub model: String,
    pub input: Vec<InputMessage>,
    pub temperature: f64,
    pub top_p: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// `None` when no tools were requested; never `Some(vec![])`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
}

/// One input item of the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputMessage {
    pub role: Role,
    pub content: String,
}

impl From<&ChatMessage> for InputMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role(),
            content: msg.content().to_string(),
        }
    }
}

/// Hosted tool attached to a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Tool {
    #[serde(rename = "web_search_preview")]
    WebSearchPreview(WebSearchTool),
}

impl Tool {
    /// Wire value of the `type` tag
    pub fn type_name(&self) -> &'static str {
        match self {
            Tool::WebSearchPreview(_) => WebSearchTool::TYPE,
        }
    }

    pub fn as_web_search(&self) -> Option<&WebSearchTool> {
        match self {
            Tool::WebSearchPreview(tool) => Some(tool),
        }
    }
}

/// Web search tool configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebSearchTool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_location: Option<UserLocation>,
}

impl WebSearchTool {
    pub const TYPE: &'static str = "web_search_preview";

    pub fn new() -> Self {
        Self::default()
    }

    /// Search with an approximate location in the given timezone
    pub fn with_timezone(timezone: impl Into<String>) -> Self {
        Self {
            user_location: Some(UserLocation::approximate(timezone)),
        }
    }
}

/// Kind of user location; the API only accepts approximate locations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    #[default]
    Approximate,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Approximate => "approximate",
        }
    }
}

/// Approximate user location for search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    #[serde(rename = "type")]
    pub location_type: LocationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl UserLocation {
    pub fn approximate(timezone: impl Into<String>) -> Self {
        Self {
            location_type: LocationType::Approximate,
            timezone: Some(timezone.into()),
        }
    }
}
