// src/providers/mod.rs

use async_trait::async_trait;

use crate::errors::ProviderError;

pub mod huggingface;
pub mod openai;

/// A common trait for text-generation backends.
///
/// An implementation performs exactly one network call per invocation and
/// never retries: fallback between backends is the orchestrator's job.
/// Errors must not carry credentials.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generates a response for the given system and user prompts.
    ///
    /// # Returns
    /// The generated text, or a `ProviderError` tagged `Network`,
    /// `HttpStatus`, `Timeout` or `EmptyResponse`.
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, ProviderError>;
}

/// Maps a failure while reading a success response body. A body that is not
/// the expected JSON counts as an absent completion.
pub(crate) fn body_read_error(provider: &str, err: reqwest::Error) -> ProviderError {
    if err.is_decode() {
        ProviderError::new(
            provider,
            crate::errors::ProviderErrorKind::EmptyResponse,
            "Response body did not contain a readable completion",
        )
    } else {
        ProviderError::from_reqwest(provider, err)
    }
}
