// src/providers/huggingface.rs

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::{Duration, Instant};

use crate::config::HuggingFaceConfig;
use crate::errors::ProviderError;
use crate::providers::{LlmProvider, body_read_error};

/// A provider for the HuggingFace text-generation inference API.
pub struct HuggingFaceProvider {
    name: String,
    client: Client,
    config: HuggingFaceConfig,
    timeout: Duration,
}

impl HuggingFaceProvider {
    /// Creates a new `HuggingFaceProvider`.
    pub fn new(name: impl Into<String>, client: Client, config: HuggingFaceConfig, timeout: Duration) -> Self {
        Self {
            name: name.into(),
            client,
            config,
            timeout,
        }
    }
}

/// The inference API takes a single prompt string, so both prompts are
/// folded into an instruction transcript.
fn build_inputs(system_prompt: &str, user_prompt: &str) -> String {
    format!("{}\n\nUser: {}\n\nAssistant:", system_prompt, user_prompt)
}

#[async_trait]
impl LlmProvider for HuggingFaceProvider {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, ProviderError> {
        let url = format!(
            "{}/models/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        );

        log::info!("📡 Calling {}: {}", self.name, url);

        let body = json!({
            "inputs": build_inputs(system_prompt, user_prompt),
            "parameters": {
                "max_new_tokens": self.config.max_new_tokens,
                "temperature": 0.7,
                "return_full_text": false,
                "do_sample": true
            }
        });

        let start = Instant::now();

        let resp = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .bearer_auth(&self.config.api_key)
            .json(&body)
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

        let response_json: serde_json::Value = resp.json().await.map_err(|e| body_read_error(&self.name, e))?;

        let output = response_json
            .get(0)
            .and_then(|c| c.get("generated_text"))
            .and_then(|t| t.as_str())
            .unwrap_or_default();

        if output.trim().is_empty() {
            return Err(ProviderError::empty_response(&self.name));
        }

        Ok(output.to_string())
    }
}
