pub mod types;
pub mod chat;

pub use types::{ChatMessage, Role};
pub use chat::ChatOptions;
