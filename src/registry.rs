// src/registry.rs
//
// Ordered, immutable set of providers handed to the orchestrator.

use log::info;
use reqwest::Client;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::errors::{ProviderError, Result, SiteGenError};
use crate::providers::{LlmProvider, huggingface::HuggingFaceProvider, openai::OpenAIProvider};

/// One backend plus its place in the fallback order. Lower priority runs first.
#[derive(Clone)]
pub struct ProviderDescriptor {
    name: String,
    priority: u32,
    provider: Arc<dyn LlmProvider>,
}

impl ProviderDescriptor {
    pub fn new(name: impl Into<String>, priority: u32, provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            name: name.into(),
            priority,
            provider,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub async fn invoke(&self, system_prompt: &str, user_prompt: &str) -> std::result::Result<String, ProviderError> {
        self.provider.generate(system_prompt, user_prompt).await
    }
}

impl fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// Providers sorted by ascending priority; equal priorities keep
/// registration order. Names are unique.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<ProviderDescriptor>,
}

#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<ProviderDescriptor>,
}

impl RegistryBuilder {
    pub fn register<P>(self, name: impl Into<String>, priority: u32, provider: P) -> Self
    where
        P: LlmProvider + 'static,
    {
        self.register_arc(name, priority, Arc::new(provider))
    }

    pub fn register_arc(mut self, name: impl Into<String>, priority: u32, provider: Arc<dyn LlmProvider>) -> Self {
        self.entries.push(ProviderDescriptor::new(name, priority, provider));
        self
    }

    pub fn build(mut self) -> Result<ProviderRegistry> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.name.clone()) {
                return Err(SiteGenError::DuplicateProvider(entry.name.clone()));
            }
        }

        // sort_by_key is stable, which gives the registration-order tie break.
        self.entries.sort_by_key(|d| d.priority);
        Ok(ProviderRegistry {
            providers: self.entries,
        })
    }
}

impl ProviderRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Builds the registry for every provider that has credentials configured.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let client = Client::builder().timeout(timeout).build()?;
        let mut builder = Self::builder();

        if let Some(groq) = &config.groq {
            info!("Registering provider groq (priority {}, model {})", groq.priority, groq.model);
            builder = builder.register(
                "groq",
                groq.priority,
                OpenAIProvider::new("groq", client.clone(), groq.clone(), timeout),
            );
        }
        if let Some(hf) = &config.huggingface {
            info!("Registering provider huggingface (priority {}, model {})", hf.priority, hf.model);
            builder = builder.register(
                "huggingface",
                hf.priority,
                HuggingFaceProvider::new("huggingface", client.clone(), hf.clone(), timeout),
            );
        }
        if let Some(openrouter) = &config.openrouter {
            info!(
                "Registering provider openrouter (priority {}, model {})",
                openrouter.priority, openrouter.model
            );
            builder = builder.register(
                "openrouter",
                openrouter.priority,
                OpenAIProvider::new("openrouter", client, openrouter.clone(), timeout),
            );
        }

        builder.build()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.providers.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|d| d.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
