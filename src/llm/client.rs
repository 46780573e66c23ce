//! Azure OpenAI chat-completions client
//!
//! Endpoint: POST {endpoint}/openai/deployments/{deployment}/chat/completions
//! Authentication: `api-key` header; version via `api-version` query param.

use crate::config::{AzureConfig, ModelSettings};
use crate::errors::{PipelineError, Result};
use crate::llm::generator::TextGenerator;
use crate::llm::types::{ChatMessage, ChatRequest, ChatResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Request timeout for one generation call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client for the Azure OpenAI chat-completions API
#[derive(Debug, Clone)]
pub struct AzureOpenAiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    api_version: String,
    model: String,
    deployment: String,
    temperature: f32,
}

impl AzureOpenAiClient {
    /// Create a client from the loaded configuration
    pub fn new(azure: &AzureConfig, model: &ModelSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(PipelineError::HttpError)?;

        Ok(Self {
            client,
            endpoint: azure.endpoint.trim_end_matches('/').to_string(),
            api_key: azure.api_key.clone(),
            api_version: azure.api_version.clone(),
            model: model.model.clone(),
            deployment: model.deployment.clone(),
            temperature: model.temperature,
        })
    }

    /// URL of the chat-completions route for the configured deployment
    pub fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.endpoint, self.deployment
        )
    }

    /// Model identifier sent in request bodies
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(self.completions_url())
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(PipelineError::HttpError)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(PipelineError::GenerationFailure(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion: ChatResponse = response.json().await.map_err(PipelineError::HttpError)?;

        match completion.first_content() {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Err(PipelineError::GenerationFailure(
                "empty output".to_string(),
            )),
        }
    }
}

#[async_trait]
impl TextGenerator for AzureOpenAiClient {
    async fn generate(&self, messages: Vec<ChatMessage>) -> Result<String> {
        self.chat(messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AzureConfig, ModelSettings};

    fn client() -> AzureOpenAiClient {
        let azure = AzureConfig {
            endpoint: "https://example.openai.azure.com/".to_string(),
            api_key: "test-key".to_string(),
            api_version: "2024-02-01".to_string(),
        };
        AzureOpenAiClient::new(&azure, &ModelSettings::default()).unwrap()
    }

    #[test]
    fn test_completions_url_shape() {
        assert_eq!(
            client().completions_url(),
            "https://example.openai.azure.com/openai/deployments/gpt-4o/chat/completions"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        assert!(!client().completions_url().contains(".com//"));
    }

    #[test]
    fn test_temperature_carried_from_settings() {
        assert_eq!(client().temperature, 0.0);
        assert_eq!(client().model(), "gpt-4o");
    }
}
