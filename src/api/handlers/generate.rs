// src/api/handlers/generate.rs
use actix_web::{HttpRequest, HttpResponse, Result, web};
use std::time::Duration;
use uuid::Uuid;

use crate::api::AppState;
use crate::errors::OrchestratorError;
use crate::models::{
    ApiError, GenerateRequestBody, GenerateResponse, GeneratedProject, GenerationMetrics, GenerationRequest,
};
use crate::sanitize::sanitize;

/// Header set by the upstream authentication layer with the signed-in user's id.
pub const USER_ID_HEADER: &str = "X-User-Id";

const MIN_DESCRIPTION_CHARS: usize = 10;

/// Points charged against the calling peer for every request to the endpoint.
const PEER_COST: u32 = 1;

/// Per-connection key. Charged on every request regardless of `X-User-Id`,
/// so rotating the header from one address does not reset the budget.
fn peer_key(req: &HttpRequest) -> String {
    match req.peer_addr() {
        Some(addr) => format!("api_ip:{}", addr.ip()),
        None => "api_ip:unknown".to_string(),
    }
}

fn too_many_requests(message: String, retry_after: Option<Duration>) -> HttpResponse {
    let mut resp = HttpResponse::TooManyRequests();
    if let Some(wait) = retry_after {
        resp.insert_header(("Retry-After", wait.as_secs().max(1).to_string()));
    }
    resp.json(ApiError::new(message, "RATE_LIMITED"))
}

/// Rate-limit key for a request: the authenticated user if known, else the peer address.
fn requester_key(req: &HttpRequest) -> String {
    let user = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match (user, req.peer_addr()) {
        (Some(id), _) => format!("ai_user:{}", id),
        (None, Some(addr)) => format!("ai_ip:{}", addr.ip()),
        (None, None) => "ai_anonymous".to_string(),
    }
}

pub async fn generate(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<GenerateRequestBody>,
) -> Result<HttpResponse> {
    let peer = peer_key(&req);
    if let Err(limited) = state.orchestrator.rate_limiter().admit(&peer, PEER_COST) {
        log::warn!("🚫 {} ({})", limited, peer);
        let message = OrchestratorError::from(limited).to_string();
        return Ok(too_many_requests(message, limited.retry_after));
    }

    let body = body.into_inner();
    let description = body.description.unwrap_or_default();
    let project_name = body.project_name.unwrap_or_default();

    if description.trim().is_empty() || project_name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiError::new(
            "Description and project name are required",
            "INVALID_INPUT",
        )));
    }

    if sanitize(&description).chars().count() < MIN_DESCRIPTION_CHARS {
        return Ok(HttpResponse::BadRequest().json(ApiError::new(
            format!("Description must be at least {} characters", MIN_DESCRIPTION_CHARS),
            "INVALID_INPUT",
        )));
    }

    // The orchestrator sanitizes requirements itself; pass the raw text so it is escaped once.
    let request = GenerationRequest::new(
        requester_key(&req),
        description,
        body.project_type.as_deref().unwrap_or("fullstack"),
    );

    match state.orchestrator.generate(&request).await {
        Ok(result) => {
            log::info!(
                "Generated {} bytes of {} HTML via {} in {}ms",
                result.html.len(),
                request.project_type,
                result.provider_used,
                result.elapsed_millis
            );

            let content_length = result.html.len();
            Ok(HttpResponse::Ok().json(GenerateResponse {
                success: true,
                project: GeneratedProject {
                    id: Uuid::new_v4().to_string(),
                    name: sanitize(&project_name),
                    html: result.html,
                    generated_at: chrono::Utc::now().to_rfc3339(),
                },
                metrics: GenerationMetrics {
                    generation_time: result.elapsed_millis,
                    content_length,
                },
            }))
        }
        Err(e) => match &e {
            OrchestratorError::RateLimitExceeded { retry_after } => Ok(too_many_requests(e.to_string(), *retry_after)),
            OrchestratorError::AllProvidersUnavailable => {
                log::error!("Generation failed for {}: {}", request.requester_key, e);
                Ok(HttpResponse::ServiceUnavailable().json(ApiError::new(e.to_string(), "GENERATION_FAILED")))
            }
        },
    }
}
