//! Example: asking a question with web search enabled
//!
//! Reads `OPENAI_API_KEY` and, optionally, `OPENAI_API_BASE_URL`. Pointing the
//! base URL at `https://api.githubcopilot.com` routes requests through the
//! Copilot transport.

use sprout_core::{ChatMessage, ChatOptions};
use sprout_llm::{LLMProvider, OpenAiProvider};
use sprout_observability::{LogManager, LoggingConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _logs = LogManager::init(LoggingConfig::from_env())?;

    let provider = OpenAiProvider::from_env()?;
    println!("Using provider: {}", provider.metadata().name);

    let options = ChatOptions::new("gpt-4o")
        .with_temperature(0.7)
        .with_max_tokens(500)
        .with_search()
        .with_search_location("America/Los_Angeles");

    let messages = [
        ChatMessage::system("Answer briefly and cite your sources."),
        ChatMessage::user("What's the weather in San Francisco today?"),
    ];

    let answer = provider.chat(&messages, &options).await?;
    println!("{}", answer);

    Ok(())
}
