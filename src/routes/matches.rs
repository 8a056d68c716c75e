use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{derive_weights, Matcher};
use crate::models::{ErrorResponse, HealthResponse, PreferenceInput, RankRequest, RankResponse};
use crate::services::{Catalog, RankingCache};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub cache: RankingCache,
    pub matcher: Matcher,
    pub default_limit: Option<u16>,
    pub max_limit: u16,
}

impl AppState {
    /// State with the built-in catalog, default thresholds and no cache
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            cache: RankingCache::disabled(),
            matcher: Matcher::default(),
            default_limit: None,
            max_limit: 100,
        }
    }
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/neighborhoods", web::get().to(list_neighborhoods))
        .route("/neighborhoods/{id}", web::get().to(get_neighborhood))
        .route("/matches/rank", web::post().to(rank_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        neighborhoods: state.catalog.len(),
    })
}

/// List the catalog in insertion order
///
/// GET /api/v1/neighborhoods
async fn list_neighborhoods(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.catalog.neighborhoods())
}

/// Detailed profile of one neighborhood
///
/// GET /api/v1/neighborhoods/{id}
async fn get_neighborhood(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.catalog.get(&id) {
        Some(neighborhood) => HttpResponse::Ok().json(neighborhood),
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "Neighborhood not found".to_string(),
            message: format!("No neighborhood with id {}", id),
            status_code: 404,
        }),
    }
}

/// Rank the catalog against a user's preferences
///
/// POST /api/v1/matches/rank
///
/// Request body:
/// ```json
/// {
///   "preferences": {
///     "walkability": [9],
///     "safety": [9],
///     "budget": [1500],
///     "nightlife": [9],
///     "familyFriendly": [5],
///     "publicTransit": [8]
///   },
///   "limit": 3
/// }
/// ```
async fn rank_matches(
    state: web::Data<AppState>,
    req: web::Json<RankRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let preferences = match PreferenceInput::try_from(&req.preferences) {
        Ok(preferences) => preferences,
        Err(e) => {
            tracing::warn!("Rejected preferences: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid preferences".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    let limit = req
        .limit
        .or(state.default_limit)
        .map(|limit| limit.min(state.max_limit).max(1) as usize);

    let ranking = match state.cache.get(&preferences).await {
        Some(cached) => cached,
        None => {
            let result = match state.matcher.rank(&preferences, state.catalog.neighborhoods()) {
                Ok(result) => result,
                Err(e) => {
                    return HttpResponse::BadRequest().json(ErrorResponse {
                        error: "Invalid preferences".to_string(),
                        message: e.to_string(),
                        status_code: 400,
                    });
                }
            };
            let ranking = Arc::new(result.matches);
            state.cache.insert(&preferences, ranking.clone()).await;
            ranking
        }
    };

    let matches: Vec<_> = ranking
        .iter()
        .take(limit.unwrap_or(ranking.len()))
        .cloned()
        .collect();

    tracing::info!(
        "Returning {} matches (from {} candidates)",
        matches.len(),
        state.catalog.len()
    );

    HttpResponse::Ok().json(RankResponse {
        matches,
        weights: derive_weights(&preferences),
        total_candidates: state.catalog.len(),
    })
}
