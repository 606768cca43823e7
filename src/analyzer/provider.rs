//! Completion provider boundary.
//!
//! The analyzer talks to a remote text-completion API through the
//! `CompletionProvider` trait so the live OpenAI client can be swapped
//! for a test double. Provider failures never cross the HTTP boundary;
//! the analyzer degrades to canned recommendations instead.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// OpenAI chat completions endpoint.
pub const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Model used for recommendations.
pub const COMPLETION_MODEL: &str = "gpt-4";

/// Balanced between creativity and consistency.
pub const COMPLETION_TEMPERATURE: f32 = 0.7;

/// Output-length cap for a recommendation block.
pub const COMPLETION_MAX_TOKENS: u32 = 1000;

/// Errors from the completion provider. Trigger the mock fallback,
/// logged internally, never surfaced to API clients.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error (status {status}): {body}")]
    Http { status: u16, body: String },

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned no completion text")]
    EmptyCompletion,
}

/// Interface every completion provider implementation must satisfy.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends the system instruction and user prompt, returning the
    /// generated text.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ProviderError>;
}

/// Client for the OpenAI chat completions API.
pub struct OpenAiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, CHAT_COMPLETIONS_URL.to_string())
    }

    /// Builds a client against a custom endpoint. Exists for tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, ProviderError> {
        let http_client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            base_url,
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: COMPLETION_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: COMPLETION_TEMPERATURE,
            max_tokens: COMPLETION_MAX_TOKENS,
        };

        let response = self
            .http_client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletion = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.is_empty())
            .ok_or(ProviderError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_serializes_expected_shape() {
        let request = ChatRequest {
            model: COMPLETION_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "hello",
                },
            ],
            temperature: COMPLETION_TEMPERATURE,
            max_tokens: COMPLETION_MAX_TOKENS,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"gpt-4\""));
        assert!(json.contains("\"temperature\":0.7"));
        assert!(json.contains("\"max_tokens\":1000"));
        assert!(json.contains("\"role\":\"system\""));
        assert!(json.contains("\"role\":\"user\""));
    }

    #[test]
    fn completion_response_parses_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"save energy"}}]}"#;
        let completion: ChatCompletion = serde_json::from_str(body).unwrap();
        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap();
        assert_eq!(text, "save energy");
    }

    #[test]
    fn default_client_targets_openai() {
        let client = OpenAiClient::new("sk-test".to_string()).unwrap();
        assert_eq!(client.base_url, CHAT_COMPLETIONS_URL);
    }
}
