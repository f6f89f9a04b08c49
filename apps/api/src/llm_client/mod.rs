//! LLM Client — the single point of entry for completion API calls.
//!
//! Handlers and the analyzer only see `CompletionTransport`; the concrete
//! `GroqClient` is built once in `main` and injected through `AppState`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::UpstreamConfig;

#[cfg(test)]
pub mod mock;
pub mod prompts;

/// OpenAI-compatible API root used when `GROQ_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const MAX_TOKENS: u32 = 300;
const TEMPERATURE: f32 = 0.0;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Could not decode completion API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Completion API did not answer within {0:?}")]
    Timeout(Duration),
}

/// Capability: send a prompt, receive the model's raw text.
///
/// `complete` yields `Ok(None)` when the call succeeded but the reply
/// carried no text at all.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<Option<String>, LlmError>;

    /// Model ids available to the configured credential.
    async fn list_models(&self) -> Result<Vec<String>, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Token counts. OpenAI-compatible servers differ in which fields they send.
#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: Option<u32>,
    #[serde(default)]
    completion_tokens: Option<u32>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if the API returned any.
    fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
    }
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Groq chat-completions client (OpenAI-compatible wire format).
/// A single attempt per call; the client-level timeout bounds each request.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GroqClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(config.timeout).build()?,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout(self.timeout)
        } else {
            LlmError::Http(err)
        }
    }

    /// Sends the request and returns the body of a successful response.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, LlmError> {
        let response = request
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl CompletionTransport for GroqClient {
    async fn complete(&self, system: &str, user: &str) -> Result<Option<String>, LlmError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let body = self
            .send(
                self.client
                    .post(format!("{}/chat/completions", self.base_url))
                    .json(&request_body),
            )
            .await?;

        let completion: ChatCompletionResponse = serde_json::from_str(&body)?;
        if let Some(usage) = &completion.usage {
            debug!(
                "Completion call succeeded: prompt_tokens={:?}, completion_tokens={:?}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(completion.into_text())
    }

    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let body = self
            .send(self.client.get(format!("{}/models", self.base_url)))
            .await?;
        let models: ModelsResponse = serde_json::from_str(&body)?;
        Ok(models.data.into_iter().map(|m| m.id).collect())
    }
}
