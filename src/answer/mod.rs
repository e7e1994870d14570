// file: src/answer/mod.rs
// description: answer synthesis module exports
// reference: internal module structure

pub mod chat;
pub mod patterns;
pub mod prompt;
pub mod synthesizer;

pub use chat::{AzureChatClient, ChatMessage, ChatModel, Role};
pub use prompt::PromptTemplate;
pub use synthesizer::{AnswerSynthesizer, parse_reply};
