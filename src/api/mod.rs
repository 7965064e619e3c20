//! REST API endpoints.
//!
//! Axum-based HTTP API over the analytics tables and the highlight voting
//! of a club.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::EngineError;
use crate::models::Period;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::InvalidState(_) => (StatusCode::CONFLICT, "INVALID_STATE"),
            ApiError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Validation(msg) => ApiError::BadRequest(msg),
            EngineError::NotFound(msg) => ApiError::NotFound(msg),
            EngineError::Conflict(msg) => ApiError::Conflict(msg),
            EngineError::State(msg) => ApiError::InvalidState(msg),
            EngineError::Upstream(err) => {
                tracing::error!("Store failure: {}", err);
                ApiError::Upstream(err.to_string())
            }
        }
    }
}

/// `?year=&month=` query parameters shared by the stats endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodParams {
    pub year: Option<String>,
    pub month: Option<String>,
}

impl PeriodParams {
    /// Missing parameters mean "all".
    pub fn period(&self) -> Result<Period, ApiError> {
        Period::parse(
            self.year.as_deref().unwrap_or("all"),
            self.month.as_deref().unwrap_or("all"),
        )
        .map_err(|e| ApiError::BadRequest(e.to_string()))
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    if origin == "*" {
        return cors.allow_origin(Any);
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => cors.allow_origin(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid CORS origin {:?}, allowing any", origin);
            cors.allow_origin(Any)
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Assemble the HTTP router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origin);

    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/clubs/:club_id/stats/teams",
            get(routes::stats::team_stats),
        )
        .route(
            "/api/clubs/:club_id/stats/players",
            get(routes::stats::player_stats),
        )
        .route(
            "/api/clubs/:club_id/stats/participation",
            get(routes::stats::participation),
        )
        .route(
            "/api/games/:game_id/highlights",
            get(routes::highlights::summary).delete(routes::highlights::delete),
        )
        .route(
            "/api/games/:game_id/highlights/open",
            post(routes::highlights::open),
        )
        .route(
            "/api/games/:game_id/highlights/votes",
            post(routes::highlights::vote),
        )
        .route(
            "/api/games/:game_id/highlights/finalize",
            post(routes::highlights::finalize),
        )
        .route(
            "/api/games/:game_id/highlights/reopen",
            post(routes::highlights::reopen),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
