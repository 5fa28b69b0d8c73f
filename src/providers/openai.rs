// src/providers/openai.rs

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::config::OpenAICompatConfig;
use crate::errors::ProviderError;
use crate::providers::{LlmProvider, body_read_error};

/// A provider for any OpenAI-compatible chat completions API (Groq, OpenRouter).
pub struct OpenAIProvider {
    name: String,
    client: Client,
    config: OpenAICompatConfig,
    timeout: Duration,
}

#[derive(Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<MessageContent>,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

impl OpenAIProvider {
    /// Creates a new `OpenAIProvider`. `name` is used in logs and errors.
    pub fn new(name: impl Into<String>, client: Client, config: OpenAICompatConfig, timeout: Duration) -> Self {
        Self {
            name: name.into(),
            client,
            config,
            timeout,
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'));

        log::info!("📡 Calling {}: {} with model: {}", self.name, url, self.config.model);

        let body = OpenAIRequest {
            model: &self.config.model,
            messages: vec![
                Message {
                    role: "system",
                    content: system_prompt,
                },
                Message {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: 0.7,
            max_tokens: self.config.max_tokens,
            top_p: self.config.top_p,
        };

        let start = Instant::now();

        let mut request = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .bearer_auth(&self.config.api_key)
            .json(&body);
        for (header, value) in &self.config.extra_headers {
            request = request.header(header.as_str(), value.as_str());
        }

        let resp = request
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(&self.name, e))?;

        let status = resp.status();
        let latency_ms = start.elapsed().as_millis() as u64;

        log::info!("📥 {} response status: {} ({}ms)", self.name, status, latency_ms);

        if !status.is_success() {
            let error_body = resp
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_string());
            return Err(ProviderError::http_status(&self.name, status.as_u16(), &error_body));
        }

        let openai_resp: OpenAIResponse = resp.json().await.map_err(|e| body_read_error(&self.name, e))?;

        let output = openai_resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default();

        if output.trim().is_empty() {
            return Err(ProviderError::empty_response(&self.name));
        }

        Ok(output)
    }
}
