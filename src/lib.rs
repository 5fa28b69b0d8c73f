// src/lib.rs
pub mod api;
pub mod banner;
pub mod config;
pub mod errors;
pub mod models;
pub mod orchestrator;
pub mod output;
pub mod prompts;
pub mod providers;
pub mod rate_limiter;
pub mod registry;
pub mod sanitize;

pub use errors::{OrchestratorError, ProviderError, ProviderErrorKind, RateLimitExceeded, SiteGenError};
pub use models::{GenerationRequest, GenerationResult};
pub use orchestrator::Orchestrator;
pub use prompts::ProjectType;
pub use rate_limiter::RateLimiter;
pub use registry::{ProviderDescriptor, ProviderRegistry};
