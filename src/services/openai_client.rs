use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::error;

/// The completion model is a fixed constant of the product, not a tunable.
pub const CHAT_COMPLETION_MODEL: &str = "gpt-4o";

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Chat-completions API client.
///
/// Thin transport wrapper: prompt construction and reply parsing live in
/// `GenerationService`. The base URL is overridable so tests can point the
/// client at a local mock server.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionMessage {
    pub role: String,
    pub content: String,
}

impl ChatCompletionMessage {
    pub fn new(role: &str, content: impl Into<String>) -> Self {
        ChatCompletionMessage {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatCompletionMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
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

impl OpenAiClient {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Send a chat-completion request and return the first choice's content.
    ///
    /// `json_mode` asks the API for a JSON-object reply; `max_tokens` caps
    /// the reply length. The content can legitimately be absent.
    pub async fn chat_completion(
        &self,
        messages: &[ChatCompletionMessage],
        json_mode: bool,
        max_tokens: Option<u32>,
    ) -> Result<Option<String>> {
        let request = ChatCompletionRequest {
            model: CHAT_COMPLETION_MODEL,
            messages,
            response_format: json_mode.then_some(ResponseFormat {
                format_type: "json_object",
            }),
            max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send chat completion request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Chat completion request failed: {} - {}", status, error_text);
            anyhow::bail!("Chat completion request failed: {}", status);
        }

        let completion = response
            .json::<ChatCompletionResponse>()
            .await
            .context("Failed to parse chat completion response")?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}
