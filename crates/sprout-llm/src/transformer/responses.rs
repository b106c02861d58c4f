use serde_json::Value;
use sprout_core::{ChatMessage, ChatOptions, Role};

use crate::citation::{collate, CitationEntry};
use crate::error::ConversionError;
use crate::transformer::{ChatAnswer, SchemaTransformer};
use crate::types::{InputMessage, ResponseRequest, Tool, WebSearchTool};

/// Transformer for the OpenAI Responses API.
/// Also used for OpenAI-compatible gateways such as GitHub Copilot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponsesTransformer;

impl ResponsesTransformer {
    pub fn new() -> Self {
        Self
    }

    /// Map a conversation and its options onto a Responses API request.
    pub fn build_request(&self, messages: &[ChatMessage], options: &ChatOptions) -> ResponseRequest {
        ResponseRequest {
            model: options.model.clone(),
            input: convert_messages(messages, &options.model),
            temperature: options.temperature,
            top_p: options.top_p,
            max_output_tokens: options.max_tokens.filter(|&max| max != 0),
            tools: build_tools(options),
        }
    }
}

// DeepSeek models reject a conversation made of a lone system message.
fn convert_messages(messages: &[ChatMessage], model: &str) -> Vec<InputMessage> {
    if model.contains("deepseek") {
        if let [only] = messages {
            if only.role() == Role::System {
                return vec![InputMessage::from(&only.with_role(Role::User))];
            }
        }
    }
    messages.iter().map(InputMessage::from).collect()
}

fn build_tools(options: &ChatOptions) -> Option<Vec<Tool>> {
    if !options.search {
        return None;
    }
    let tool = match options.search_timezone() {
        Some(timezone) => WebSearchTool::with_timezone(timezone),
        None => WebSearchTool::new(),
    };
    Some(vec![Tool::WebSearchPreview(tool)])
}

impl SchemaTransformer for ResponsesTransformer {
    type Request = ResponseRequest;

    fn provider_id(&self) -> &str {
        "openai"
    }

    fn endpoint(&self) -> &str {
        "responses"
    }

    fn transform_request(&self, messages: &[ChatMessage], options: &ChatOptions) -> ResponseRequest {
        self.build_request(messages, options)
    }

    fn parse_response(&self, data: &Value) -> Result<ChatAnswer, ConversionError> {
        let output = data
            .get("output")
            .and_then(Value::as_array)
            .ok_or_else(|| ConversionError::MissingField("output".to_string()))?;

        let mut text = String::new();
        let mut sources = Vec::new();

        let parts = output
            .iter()
            .filter(|item| item["type"] == "message")
            .filter_map(|item| item["content"].as_array())
            .flatten()
            .filter(|part| part["type"] == "output_text");

        for part in parts {
            if let Some(chunk) = part["text"].as_str() {
                text.push_str(chunk);
            }
            let annotations = part["annotations"]
                .as_array()
                .into_iter()
                .flatten()
                .filter(|a| a["type"] == "url_citation");
            for annotation in annotations {
                let Some(url) = annotation["url"].as_str() else {
                    continue;
                };
                let title = annotation["title"].as_str().unwrap_or_default();
                sources.push(CitationEntry::new(url, title));
            }
        }

        Ok(ChatAnswer {
            text,
            citations: collate(sources),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocationType;
    use serde_json::json;

    fn two_user_messages() -> Vec<ChatMessage> {
        vec![ChatMessage::user("My msg"), ChatMessage::user("My msg")]
    }

    #[test]
    fn test_build_request_with_max_tokens() {
        let options = ChatOptions::default()
            .with_temperature(0.8)
            .with_top_p(0.9)
            .with_max_tokens(50);

        let request = ResponsesTransformer::new().build_request(&two_user_messages(), &options);

        assert_eq!(request.model, options.model);
        assert_eq!(request.temperature, 0.8);
        assert_eq!(request.top_p, 0.9);
        assert_eq!(request.max_output_tokens, Some(50));
        assert_eq!(request.input.len(), 2);
    }

    #[test]
    fn test_build_request_without_max_tokens() {
        let transformer = ResponsesTransformer::new();
        let unset = ChatOptions::default().with_temperature(0.8).with_top_p(0.9);
        let zero = unset.clone().with_max_tokens(0);

        assert_eq!(transformer.build_request(&two_user_messages(), &unset).max_output_tokens, None);
        assert_eq!(transformer.build_request(&two_user_messages(), &zero).max_output_tokens, None);
    }

    #[test]
    fn test_build_request_without_search() {
        let options = ChatOptions::new("gpt-4o")
            .with_temperature(0.7)
            .with_search_location("America/Los_Angeles");

        let request = ResponsesTransformer::new()
            .build_request(&[ChatMessage::user("Hello")], &options);

        assert!(request.tools.is_none());
        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.temperature, 0.7);
    }

    #[test]
    fn test_build_request_with_search() {
        let options = ChatOptions::new("gpt-4o").with_search();

        let request = ResponsesTransformer::new()
            .build_request(&[ChatMessage::user("What's the weather today?")], &options);

        let tools = request.tools.expect("tools when search is enabled");
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].type_name(), "web_search_preview");
        let search = tools[0].as_web_search().unwrap();
        assert!(search.user_location.is_none());
    }

    #[test]
    fn test_build_request_with_empty_search_location() {
        let options = ChatOptions::new("gpt-4o").with_search().with_search_location("");

        let request = ResponsesTransformer::new().build_request(&[], &options);

        let tools = request.tools.unwrap();
        assert_eq!(tools.len(), 1);
        assert!(tools[0].as_web_search().unwrap().user_location.is_none());
    }

    #[test]
    fn test_build_request_with_search_and_location() {
        let options = ChatOptions::new("gpt-4o")
            .with_temperature(0.7)
            .with_search()
            .with_search_location("America/Los_Angeles");

        let request = ResponsesTransformer::new()
            .build_request(&[ChatMessage::user("What's the weather in San Francisco?")], &options);

        let tools = request.tools.unwrap();
        let location = tools[0]
            .as_web_search()
            .and_then(|tool| tool.user_location.as_ref())
            .expect("user location");
        assert_eq!(location.location_type, LocationType::Approximate);
        assert_eq!(location.location_type.as_str(), "approximate");
        assert_eq!(location.timezone.as_deref(), Some("America/Los_Angeles"));
    }

    #[test]
    fn test_empty_conversation_still_builds() {
        let request = ResponsesTransformer::new().build_request(&[], &ChatOptions::new("gpt-4o"));
        assert!(request.input.is_empty());
        assert_eq!(request.model, "gpt-4o");
    }

    #[test]
    fn test_deepseek_lone_system_message_becomes_user() {
        let transformer = ResponsesTransformer::new();
        let options = ChatOptions::new("deepseek-chat");

        let request = transformer.build_request(&[ChatMessage::system("Summarize")], &options);
        assert_eq!(request.input[0].role, Role::User);

        let request = transformer.build_request(
            &[ChatMessage::system("Summarize"), ChatMessage::user("text")],
            &options,
        );
        assert_eq!(request.input[0].role, Role::System);

        let request = transformer
            .build_request(&[ChatMessage::system("Summarize")], &ChatOptions::new("gpt-4o"));
        assert_eq!(request.input[0].role, Role::System);
    }

    #[test]
    fn test_parse_response_with_citations() {
        let data = json!({
            "id": "resp_1",
            "output": [
                {"type": "web_search_call", "id": "ws_1", "status": "completed"},
                {
                    "type": "message",
                    "role": "assistant",
                    "content": [{
                        "type": "output_text",
                        "text": "Based on recent research, artificial intelligence is advancing rapidly.",
                        "annotations": [
                            {"type": "url_citation", "url": "https://example.com/ai-research", "title": "AI Research Advances 2025"},
                            {"type": "url_citation", "url": "https://another-source.com/tech-news", "title": "Technology News Today"},
                            {"type": "url_citation", "url": "https://example.com/ai-research", "title": "AI Research Advances 2025"}
                        ]
                    }]
                }
            ]
        });

        let answer = ResponsesTransformer::new().parse_response(&data).unwrap();
        assert_eq!(answer.citations.len(), 2);

        let text = answer.into_text();
        assert!(text.starts_with("Based on recent research, artificial intelligence is advancing rapidly."));
        assert!(text.contains("\n\n## Sources\n\n"));
        assert!(text.contains("[AI Research Advances 2025](https://example.com/ai-research)"));
        assert!(text.contains("[Technology News Today](https://another-source.com/tech-news)"));
        assert_eq!(text.matches("- [").count(), 2);
    }

    #[test]
    fn test_parse_response_without_citations() {
        let data = json!({
            "output": [{
                "type": "message",
                "content": [
                    {"type": "output_text", "text": "Hello", "annotations": []},
                    {"type": "output_text", "text": ", world"}
                ]
            }]
        });

        let text = ResponsesTransformer::new().parse_response(&data).unwrap().into_text();
        assert_eq!(text, "Hello, world");
    }

    #[test]
    fn test_parse_response_missing_output() {
        let err = ResponsesTransformer::new()
            .parse_response(&json!({"id": "resp_1"}))
            .unwrap_err();
        assert!(matches!(err, ConversionError::MissingField(field) if field == "output"));
    }
}
