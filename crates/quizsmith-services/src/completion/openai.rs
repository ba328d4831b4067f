//! OpenAI Chat Completions client

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use quizsmith_core::CompletionConfig;
use serde::{Deserialize, Serialize};

use super::CompletionProvider;

pub struct OpenAiCompletionClient {
    http_client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl Debug for OpenAiCompletionClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("OpenAiCompletionClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiCompletionClient {
    pub fn new(config: &CompletionConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .context("Failed to create HTTP client for OpenAI API")?;

        Ok(Self {
            http_client,
            api_key: config.api_key.clone(),
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        tracing::debug!(
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "Sending chat completion request to OpenAI API"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await
            .context("Failed to send request to OpenAI API")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            if let Ok(error_body) = serde_json::from_str::<ErrorResponse>(&error_text) {
                return Err(anyhow::anyhow!(
                    "OpenAI API error ({}): {} - Status: {}",
                    error_body.error.error_type.as_deref().unwrap_or("api_error"),
                    error_body.error.message,
                    status
                ));
            }

            return Err(anyhow::anyhow!(
                "OpenAI API request failed: {} - {}",
                status,
                error_text
            ));
        }

        let chat_response: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI API response")?;

        if let Some(usage) = &chat_response.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "OpenAI usage"
            );
        }

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .context("No completion in OpenAI API response")
    }
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
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}
