//! Chat-completions request/response types

use serde::{Deserialize, Serialize};

/// One message in a chat-completions request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for POST .../chat/completions
///
/// `temperature` is always serialized, even at 0, so identical inputs
/// produce identical request bodies.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// Response body from the chat-completions endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice, if the model returned any
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_temperature_at_zero() {
        let request = ChatRequest {
            model: "gpt-4o".to_string(),
            messages: vec![ChatMessage::user("hello")],
            temperature: 0.0,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"temperature\":0.0") || json.contains("\"temperature\":0"));
        assert!(json.contains("\"role\":\"user\""));
    }

    #[test]
    fn test_identical_inputs_identical_bodies() {
        let build = || ChatRequest {
            model: "gpt-4o".to_string(),
            messages: vec![
                ChatMessage::system("answer from the report"),
                ChatMessage::user("Roof"),
            ],
            temperature: 0.0,
        };

        let a = serde_json::to_string(&build()).unwrap();
        let b = serde_json::to_string(&build()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_response_first_content() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"the shingles show wear"}}]}"#;
        let response: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.first_content(), Some("the shingles show wear"));
    }

    #[test]
    fn test_response_without_choices() {
        let raw = r#"{"choices":[]}"#;
        let response: ChatResponse = serde_json::from_str(raw).unwrap();
        assert!(response.first_content().is_none());
    }
}
