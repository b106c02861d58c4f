use serde::{Deserialize, Serialize};

/// Caller-supplied tuning parameters for a completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatOptions {
    pub model: String,
    pub temperature: f64,
    pub top_p: f64,
    /// `None` means "not set"; `Some(0)` is treated the same way by providers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Send the conversation as-is, without pattern/system handling upstream
    #[serde(default)]
    pub raw: bool,
    /// Attach the provider's web search tool
    #[serde(default)]
    pub search: bool,
    /// IANA timezone used as the approximate search location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_location: Option<String>,
}

impl ChatOptions {
    /// Create default options for a model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Set temperature (0.0 - 2.0)
    pub fn with_temperature(mut self, temp: f64) -> Self {
        self.temperature = temp;
        self
    }

    /// Set top_p (0.0 - 1.0)
    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = top_p;
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// Enable web search
    pub fn with_search(mut self) -> Self {
        self.search = true;
        self
    }

    /// Set the search location (e.g. "America/Los_Angeles")
    pub fn with_search_location(mut self, location: impl Into<String>) -> Self {
        self.search_location = Some(location.into());
        self
    }

    /// The search location, if one was given and it is non-empty.
    pub fn search_timezone(&self) -> Option<&str> {
        self.search_location
            .as_deref()
            .filter(|location| !location.is_empty())
    }
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            model: String::new(),
            temperature: 0.7,
            top_p: 0.9,
            max_tokens: None,
            raw: false,
            search: false,
            search_location: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_options_builder() {
        let options = ChatOptions::new("gpt-4o")
            .with_temperature(0.8)
            .with_top_p(0.5)
            .with_max_tokens(200)
            .with_search()
            .with_search_location("Europe/Berlin");

        assert_eq!(options.model, "gpt-4o");
        assert_eq!(options.temperature, 0.8);
        assert_eq!(options.top_p, 0.5);
        assert_eq!(options.max_tokens, Some(200));
        assert!(options.search);
        assert_eq!(options.search_timezone(), Some("Europe/Berlin"));
    }

    #[test]
    fn test_empty_search_location_is_absent() {
        let options = ChatOptions::new("gpt-4o").with_search_location("");
        assert_eq!(options.search_timezone(), None);
        assert_eq!(ChatOptions::default().search_timezone(), None);
    }

    #[test]
    fn test_deserialize_with_missing_optionals() {
        let options: ChatOptions = serde_json::from_str(
            r#"{"model":"gpt-4o","temperature":0.2,"top_p":1.0}"#,
        )
        .unwrap();

        assert_eq!(options.max_tokens, None);
        assert!(!options.raw);
        assert!(!options.search);
        assert_eq!(options.search_location, None);
    }
}
