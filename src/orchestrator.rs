// src/orchestrator.rs
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Instant;

use crate::errors::OrchestratorError;
use crate::models::{GenerationRequest, GenerationResult};
use crate::output;
use crate::prompts;
use crate::rate_limiter::RateLimiter;
use crate::registry::ProviderRegistry;
use crate::sanitize::sanitize;

/// Points charged against the requester's budget for one generation.
pub const REQUEST_COST: u32 = 1;

/// Turns a generation request into validated HTML by walking the provider
/// registry in priority order.
///
/// Each provider gets exactly one attempt per request. A provider error or an
/// unacceptable document moves on to the next provider; the first document
/// that passes validation is normalized and returned. There is no memory of
/// failures across requests, so a provider that is down is still tried (and
/// still costs its timeout) on every request.
///
/// Dropping the future returned by [`Orchestrator::generate`] cancels the
/// in-flight provider call.
pub struct Orchestrator {
    registry: ProviderRegistry,
    rate_limiter: Arc<RateLimiter>,
}

impl Orchestrator {
    pub fn new(registry: ProviderRegistry, rate_limiter: Arc<RateLimiter>) -> Self {
        Self {
            registry,
            rate_limiter,
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Convenience wrapper building the request from its parts.
    pub async fn generate_website(
        &self,
        requester_key: &str,
        requirements: &str,
        project_type: &str,
    ) -> Result<GenerationResult, OrchestratorError> {
        self.generate(&GenerationRequest::new(requester_key, requirements, project_type))
            .await
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, OrchestratorError> {
        let start = Instant::now();

        // Admission comes first so a rejected request never reaches a provider.
        if let Err(limited) = self.rate_limiter.admit(&request.requester_key, REQUEST_COST) {
            warn!("🚫 {} ({})", limited, request.requester_key);
            return Err(limited.into());
        }

        let requirements = sanitize(&request.requirements);
        let system_prompt = prompts::system_prompt(request.project_type);
        let user_prompt = prompts::user_prompt(&requirements, request.project_type);

        let total = self.registry.len();
        for (index, provider) in self.registry.iter().enumerate() {
            info!("🔄 Trying {} ({}/{})...", provider.name(), index + 1, total);

            let candidate = match provider.invoke(system_prompt, &user_prompt).await {
                Ok(text) => text,
                Err(e) => {
                    warn!("⚠️  {} failed: {}", provider.name(), e);
                    continue;
                }
            };

            if let Err(reason) = output::validate(&candidate) {
                warn!("⚠️  {} returned unusable output: {}", provider.name(), reason);
                continue;
            }

            let html = output::normalize(&candidate);
            let elapsed_millis = start.elapsed().as_millis() as u64;
            info!("✅ Success with {} ({}ms)", provider.name(), elapsed_millis);

            return Ok(GenerationResult {
                html,
                provider_used: provider.name().to_string(),
                elapsed_millis,
            });
        }

        error!(
            "❌ All {} providers exhausted for requester {}",
            total, request.requester_key
        );
        Err(OrchestratorError::AllProvidersUnavailable)
    }
}
