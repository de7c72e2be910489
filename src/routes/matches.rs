use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{MatchError, Matcher, QualificationRegistry};
use crate::models::{
    BlendWeights, ErrorResponse, HealthResponse, MatchCandidatesRequest, MatchCandidatesResponse,
    MatchOptions, QualificationLevelResponse, RegisterQualificationRequest,
    RegisterQualificationResponse,
};
use crate::services::HttpRankingClient;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Arc<Matcher<HttpRankingClient>>,
    pub registry: Arc<QualificationRegistry>,
    pub max_limit: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/qualifications", web::post().to(register_qualification))
        .route("/qualifications/level", web::get().to(qualification_level));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Match a candidate pool against a requirement
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "requirement": { ... },
///   "candidates": [ ... ],
///   "limit": 50,
///   "aiWeight": 0.7,
///   "ruleWeight": 0.3
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<MatchCandidatesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let req = req.into_inner();
    let defaults = state.matcher.defaults();

    // Cap limit to keep one request from dragging the whole pool through
    // the ranking service.
    let limit = (req.limit as usize).min(state.max_limit);
    let options = MatchOptions {
        limit,
        weights: BlendWeights {
            ai: req.ai_weight.unwrap_or(defaults.weights.ai),
            rule: req.rule_weight.unwrap_or(defaults.weights.rule),
        },
    };

    tracing::info!(
        "Matching {} candidates against requirement {} (limit: {})",
        req.candidates.len(),
        req.requirement.requirement_id,
        limit
    );

    match state
        .matcher
        .match_candidates(&req.requirement, req.candidates, &options)
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(MatchCandidatesResponse {
            matches: outcome.matches,
            total_candidates: outcome.total_candidates,
            eligible_candidates: outcome.eligible_candidates,
            degraded: outcome.degraded,
        }),
        Err(MatchError::InvalidInput(message)) => {
            tracing::info!("Rejected match request: {}", message);
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid input".to_string(),
                message,
                status_code: 400,
            })
        }
    }
}

/// Register a qualification string under an existing tier
///
/// POST /api/v1/qualifications
///
/// Request body:
/// ```json
/// { "name": "B.Tech", "tier": 3 }
/// ```
async fn register_qualification(
    state: web::Data<AppState>,
    req: web::Json<RegisterQualificationRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.registry.register(&req.name, req.tier) {
        Ok(()) => {
            tracing::info!("Registered qualification '{}' at tier {}", req.name, req.tier);
            HttpResponse::Ok().json(RegisterQualificationResponse {
                success: true,
                name: req.name.clone(),
                tier: req.tier,
            })
        }
        Err(e) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid qualification".to_string(),
            message: e.to_string(),
            status_code: 400,
        }),
    }
}

/// Look up the tier of a qualification string
///
/// GET /api/v1/qualifications/level?name=B.Ed
async fn qualification_level(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let name = match query.get("name") {
        Some(name) => name,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing name parameter".to_string(),
                message: "name query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    HttpResponse::Ok().json(QualificationLevelResponse {
        name: name.clone(),
        tier: state.registry.level_of(name),
    })
}
