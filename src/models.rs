// src/models.rs
use serde::{Deserialize, Serialize};

use crate::prompts::ProjectType;

/// One generation call, owned by a single orchestration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub requester_key: String,
    pub requirements: String,
    pub project_type: ProjectType,
}

impl GenerationRequest {
    /// `project_type` is parsed leniently: unknown names mean `fullstack`.
    pub fn new(requester_key: impl Into<String>, requirements: impl Into<String>, project_type: &str) -> Self {
        Self {
            requester_key: requester_key.into(),
            requirements: requirements.into(),
            project_type: ProjectType::parse_lenient(project_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    pub html: String,
    pub provider_used: String,
    pub elapsed_millis: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequestBody {
    pub description: Option<String>,
    pub project_name: Option<String>,
    pub project_type: Option<String>,
}

#[derive(Serialize, Clone, Debug)]
pub struct GeneratedProject {
    pub id: String,
    pub name: String,
    pub html: String,
    pub generated_at: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct GenerationMetrics {
    pub generation_time: u64,
    pub content_length: usize,
}

#[derive(Serialize, Clone, Debug)]
pub struct GenerateResponse {
    pub success: bool,
    pub project: GeneratedProject,
    pub metrics: GenerationMetrics,
}

#[derive(Serialize, Clone, Debug)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
        }
    }
}
