// src/errors.rs
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Startup and configuration errors. Nothing here is raised per request.
#[derive(Error, Debug)]
pub enum SiteGenError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider '{0}' is registered more than once")]
    DuplicateProvider(String),
}

pub type Result<T> = std::result::Result<T, SiteGenError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    Network,
    HttpStatus,
    EmptyResponse,
    Timeout,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderErrorKind::Network => write!(f, "network"),
            ProviderErrorKind::HttpStatus => write!(f, "http status"),
            ProviderErrorKind::EmptyResponse => write!(f, "empty response"),
            ProviderErrorKind::Timeout => write!(f, "timeout"),
        }
    }
}

/// A single failed call to one provider. Logged and folded into fallback,
/// never returned to the caller of the orchestrator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{provider} failed ({kind}): {message}")]
pub struct ProviderError {
    pub provider: String,
    pub kind: ProviderErrorKind,
    pub message: String,
}

/// Longest slice of an upstream error body kept in a `ProviderError`.
const MAX_BODY_SNIPPET: usize = 200;

impl ProviderError {
    pub fn new(provider: impl Into<String>, kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn http_status(provider: &str, status: u16, body: &str) -> Self {
        let snippet: String = body.chars().take(MAX_BODY_SNIPPET).collect();
        Self::new(
            provider,
            ProviderErrorKind::HttpStatus,
            format!("API request failed with status {}: {}", status, snippet),
        )
    }

    pub fn empty_response(provider: &str) -> Self {
        Self::new(
            provider,
            ProviderErrorKind::EmptyResponse,
            "Received empty text response from model",
        )
    }

    /// Classifies a transport error. The URL is dropped so query-string
    /// credentials can never end up in logs.
    pub fn from_reqwest(provider: &str, err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ProviderErrorKind::Timeout
        } else {
            ProviderErrorKind::Network
        };
        Self::new(provider, kind, err.without_url().to_string())
    }
}

/// Admission was refused. `retry_after` is how long until the key's window
/// resets, or `None` when the cost is larger than a whole window's budget and
/// waiting will not help.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Rate limit exceeded. {}", retry_hint(.retry_after.as_ref()))]
pub struct RateLimitExceeded {
    pub retry_after: Option<Duration>,
}

/// The only failures that escape `Orchestrator::generate`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    #[error("AI rate limit exceeded. {}", retry_hint(.retry_after.as_ref()))]
    RateLimitExceeded { retry_after: Option<Duration> },

    #[error("All AI providers are currently unavailable. Please try again later.")]
    AllProvidersUnavailable,
}

impl From<RateLimitExceeded> for OrchestratorError {
    fn from(err: RateLimitExceeded) -> Self {
        OrchestratorError::RateLimitExceeded {
            retry_after: err.retry_after,
        }
    }
}

fn retry_hint(retry_after: Option<&Duration>) -> String {
    match retry_after {
        Some(wait) => format!("Please try again in {} seconds.", wait.as_secs().max(1)),
        None => "This request is larger than the rate limit allows.".to_string(),
    }
}
