//! Hosted model access
//!
//! Both stages talk to the chat-completions endpoint through the
//! [`TextGenerator`] seam; [`AzureOpenAiClient`] is the production impl.

pub mod client;
pub mod generator;
pub mod types;

pub use client::AzureOpenAiClient;
pub use generator::TextGenerator;
pub use types::{ChatMessage, ChatRequest, ChatResponse};
