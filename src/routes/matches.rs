use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{AddressMatcher, MatchOptions};
use crate::models::{ErrorResponse, HealthResponse, MatchAddressRequest, MatchAddressResponse};

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub options: MatchOptions,
    pub parallel: bool,
    pub max_candidates: usize,
    pub max_field_len: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/addresses/match", web::post().to(match_address));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Match an address against candidates
///
/// POST /api/v1/addresses/match
///
/// Request body:
/// ```json
/// {
///   "input": { "streetLine": "garden close", "city": "barbican kingston", "parish": "standrew" },
///   "candidates": [
///     { "streetLine": "Garden Close", "city": "Barbican, Kingston", "parish": "Saint Andrew" }
///   ],
///   "cutoff": 0.8,
///   "order": "score_descending"
/// }
/// ```
async fn match_address(
    state: web::Data<AppState>,
    req: web::Json<MatchAddressRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::warn!("Validation failed for match request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    if req.candidates.len() > state.max_candidates {
        tracing::warn!(
            "Rejecting match request with {} candidates (max {})",
            req.candidates.len(),
            state.max_candidates
        );
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Too many candidates".to_string(),
            message: format!("At most {} candidates are accepted per request", state.max_candidates),
            status_code: 400,
        });
    }

    let longest = req
        .candidates
        .iter()
        .map(|c| c.longest_field())
        .chain(std::iter::once(req.input.longest_field()))
        .max()
        .unwrap_or(0);

    if longest > state.max_field_len {
        tracing::warn!(
            "Rejecting match request with a {}-char field (max {})",
            longest,
            state.max_field_len
        );
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Field too long".to_string(),
            message: format!("Address fields are limited to {} characters", state.max_field_len),
            status_code: 400,
        });
    }

    let request = req.into_inner();
    let defaults = state.options;
    let options = MatchOptions {
        weights: request.weights.unwrap_or(defaults.weights),
        cutoff: request.cutoff.unwrap_or(defaults.cutoff),
        scorer: request.scorer.unwrap_or(defaults.scorer),
        order: request.order.unwrap_or(defaults.order),
        limit: request.limit.or(defaults.limit),
    };

    if !options.weights.is_normalized() {
        tracing::warn!(
            "Field weights sum to {} rather than 1.0; passing through unchanged",
            options.weights.sum()
        );
    }

    tracing::debug!("Input street line: '{}'", request.input.street_line);
    tracing::info!(
        "Matching against {} candidates (cutoff: {}, scorer: {:?}, order: {:?})",
        request.candidates.len(),
        options.cutoff,
        options.scorer,
        options.order
    );

    let matcher = AddressMatcher::new(options);
    let outcome = if state.parallel {
        matcher.find_matches_parallel(&request.input, &request.candidates)
    } else {
        matcher.find_matches(&request.input, &request.candidates)
    };

    let response = MatchAddressResponse {
        total_results: outcome.matches.len(),
        total_candidates: outcome.total_candidates,
        matches: outcome.matches,
    };

    tracing::info!(
        "Returning {} matches (from {} candidates)",
        response.total_results,
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}
