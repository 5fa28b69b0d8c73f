// src/config.rs
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::{Result, SiteGenError};

/// Configuration for an OpenAI-compatible chat completions backend (Groq, OpenRouter).
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAICompatConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub priority: u32,
    pub max_tokens: u32,
    pub top_p: Option<f32>,
    /// Extra headers sent with every request, e.g. OpenRouter attribution.
    pub extra_headers: Vec<(String, String)>,
}

/// Configuration for the HuggingFace inference API.
#[derive(Debug, Clone, PartialEq)]
pub struct HuggingFaceConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub priority: u32,
    pub max_new_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    pub max_points: u32,
    pub window_secs: u64,
    pub max_keys: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_points: 100,
            window_secs: 900,
            max_keys: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// High-level application configuration. Credentials only ever come from
/// the environment; the optional TOML file tunes everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub rate_limit: RateLimitConfig,
    pub request_timeout_secs: u64,
    pub groq: Option<OpenAICompatConfig>,
    pub huggingface: Option<HuggingFaceConfig>,
    pub openrouter: Option<OpenAICompatConfig>,
}

/// Shape of the optional TOML config file. Every field may be omitted.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct FileConfig {
    pub request_timeout_secs: Option<u64>,
    pub server: FileServer,
    pub rate_limit: FileRateLimit,
    pub providers: FileProviders,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct FileServer {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct FileRateLimit {
    pub max_points: Option<u32>,
    pub window_secs: Option<u64>,
    pub max_keys: Option<usize>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct FileProviders {
    pub groq: FileProvider,
    pub huggingface: FileProvider,
    pub openrouter: FileProvider,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct FileProvider {
    pub enabled: bool,
    pub priority: Option<u32>,
    pub model: Option<String>,
    pub api_base: Option<String>,
}

impl Default for FileProvider {
    fn default() -> Self {
        Self {
            enabled: true,
            priority: None,
            model: None,
            api_base: None,
        }
    }
}

impl FileConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}

impl AppConfig {
    /// Load configuration from the config file (if any) and environment variables.
    pub fn load() -> Result<Self> {
        let file = match config_file_path() {
            Some(path) if path.exists() => {
                log::info!("Loading configuration from {}", path.display());
                FileConfig::from_path(&path)?
            }
            _ => FileConfig::default(),
        };
        Self::from_sources(&file, |key| std::env::var(key).ok())
    }

    /// Load configuration from environment variables only.
    pub fn from_env() -> Result<Self> {
        Self::from_sources(&FileConfig::default(), |key| std::env::var(key).ok())
    }

    /// Builds the configuration from a parsed file and a variable lookup.
    /// Variables win over the file, the file wins over defaults.
    pub fn from_sources<F>(file: &FileConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = RateLimitConfig::default();
        let rate_limit = RateLimitConfig {
            max_points: parse_var(&lookup, "RATE_LIMIT_MAX")?
                .or(file.rate_limit.max_points)
                .unwrap_or(defaults.max_points),
            window_secs: parse_var(&lookup, "RATE_LIMIT_WINDOW")?
                .or(file.rate_limit.window_secs)
                .unwrap_or(defaults.window_secs),
            max_keys: parse_var(&lookup, "RATE_LIMIT_MAX_KEYS")?
                .or(file.rate_limit.max_keys)
                .unwrap_or(defaults.max_keys),
        };
        if rate_limit.window_secs == 0 {
            return Err(SiteGenError::Config("RATE_LIMIT_WINDOW must be positive".to_string()));
        }
        if rate_limit.max_points == 0 {
            return Err(SiteGenError::Config("RATE_LIMIT_MAX must be positive".to_string()));
        }
        if rate_limit.max_keys == 0 {
            return Err(SiteGenError::Config("RATE_LIMIT_MAX_KEYS must be positive".to_string()));
        }

        let server = ServerConfig {
            host: lookup("SITEGEN_HOST")
                .or_else(|| file.server.host.clone())
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_var(&lookup, "SITEGEN_PORT")?
                .or(file.server.port)
                .unwrap_or(8080),
        };

        let request_timeout_secs = parse_var(&lookup, "AI_REQUEST_TIMEOUT_SECS")?
            .or(file.request_timeout_secs)
            .unwrap_or(30);

        let groq = enabled_key(&lookup, "GROQ_API_KEY", &file.providers.groq).map(|api_key| {
            OpenAICompatConfig {
                api_base: lookup("GROQ_API_BASE")
                    .or_else(|| file.providers.groq.api_base.clone())
                    .unwrap_or_else(|| "https://api.groq.com/openai/v1".to_string()),
                api_key,
                model: lookup("GROQ_MODEL")
                    .or_else(|| file.providers.groq.model.clone())
                    .unwrap_or_else(|| "llama3-70b-8192".to_string()),
                priority: file.providers.groq.priority.unwrap_or(1),
                max_tokens: 4000,
                top_p: Some(0.9),
                extra_headers: Vec::new(),
            }
        });

        let huggingface = enabled_key(&lookup, "HUGGINGFACE_TOKEN", &file.providers.huggingface).map(
            |api_key| HuggingFaceConfig {
                api_base: lookup("HUGGINGFACE_API_BASE")
                    .or_else(|| file.providers.huggingface.api_base.clone())
                    .unwrap_or_else(|| "https://api-inference.huggingface.co".to_string()),
                api_key,
                model: lookup("HUGGINGFACE_MODEL")
                    .or_else(|| file.providers.huggingface.model.clone())
                    .unwrap_or_else(|| "mistralai/Mixtral-8x7B-Instruct-v0.1".to_string()),
                priority: file.providers.huggingface.priority.unwrap_or(2),
                max_new_tokens: 3000,
            },
        );

        let openrouter = enabled_key(&lookup, "OPENROUTER_API_KEY", &file.providers.openrouter).map(
            |api_key| OpenAICompatConfig {
                api_base: lookup("OPENROUTER_API_BASE")
                    .or_else(|| file.providers.openrouter.api_base.clone())
                    .unwrap_or_else(|| "https://openrouter.ai/api/v1".to_string()),
                api_key,
                model: lookup("OPENROUTER_MODEL")
                    .or_else(|| file.providers.openrouter.model.clone())
                    .unwrap_or_else(|| "google/gemma-7b-it:free".to_string()),
                priority: file.providers.openrouter.priority.unwrap_or(3),
                max_tokens: 3000,
                top_p: None,
                extra_headers: vec![
                    (
                        "HTTP-Referer".to_string(),
                        lookup("OPENROUTER_REFERER").unwrap_or_else(|| "https://ai-builder.com".to_string()),
                    ),
                    (
                        "X-Title".to_string(),
                        lookup("OPENROUTER_TITLE").unwrap_or_else(|| "AI Website Builder".to_string()),
                    ),
                ],
            },
        );

        if groq.is_none() && huggingface.is_none() && openrouter.is_none() {
            return Err(SiteGenError::Config(
                "No AI providers configured. Please set GROQ_API_KEY, HUGGINGFACE_TOKEN or OPENROUTER_API_KEY."
                    .to_string(),
            ));
        }

        Ok(AppConfig {
            server,
            rate_limit,
            request_timeout_secs,
            groq,
            huggingface,
            openrouter,
        })
    }
}

/// `SITEGEN_CONFIG` if set, else `<config dir>/sitegen/config.toml`.
pub fn config_file_path() -> Option<PathBuf> {
    std::env::var("SITEGEN_CONFIG")
        .ok()
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|dir| dir.join("sitegen").join("config.toml")))
}

fn enabled_key<F>(lookup: &F, key: &str, file: &FileProvider) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if !file.enabled {
        return None;
    }
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| SiteGenError::Config(format!("{} must be a number, got '{}'", key, raw))),
        None => Ok(None),
    }
}
