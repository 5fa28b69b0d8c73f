// src/api/state.rs
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::orchestrator::Orchestrator;
use crate::rate_limiter::RateLimiter;
use crate::registry::ProviderRegistry;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// Wires the registry and rate limiter described by `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let registry = ProviderRegistry::from_config(config)?;
        let rate_limiter = Arc::new(RateLimiter::from_config(&config.rate_limit));
        Ok(Self::new(Orchestrator::new(registry, rate_limiter)))
    }
}
