//! System endpoints: health check and validation rule catalog.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::ValidationRuleInfo;
use crate::app_state::AppState;
use crate::validation::{DuplicateSlotMode, ValidationRule};

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// Rule catalog with the limits the validator is running with.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationRulesResponse {
    /// Longest allowed showtime, in hours.
    pub max_showtime_hours: i64,
    /// How duplicate showtime slots are detected.
    pub duplicate_slot_mode: DuplicateSlotMode,
    /// Offset applied to timestamps entered without one, e.g. `+07:00`.
    pub local_utc_offset: String,
    /// Every rule in evaluation order.
    pub rules: Vec<ValidationRuleInfo>,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /config/validation-rules` — List validation rules.
#[utoipa::path(
    get,
    path = "/config/validation-rules",
    tag = "System",
    summary = "List validation rules",
    description = "Returns every scheduling rule with its category and reported fields, plus the configured duration bound, duplicate-slot mode, and local offset.",
    responses(
        (status = 200, description = "Validation rule catalog", body = ValidationRulesResponse),
    )
)]
pub async fn validation_rules_handler(State(state): State<AppState>) -> impl IntoResponse {
    let options = state.event_service.validator().options();
    let rules = ValidationRule::ALL
        .into_iter()
        .map(ValidationRuleInfo::from)
        .collect();
    (
        StatusCode::OK,
        Json(ValidationRulesResponse {
            max_showtime_hours: options.max_showtime_duration.num_hours(),
            duplicate_slot_mode: options.duplicate_slot_mode,
            local_utc_offset: options.local_offset.to_string(),
            rules,
        }),
    )
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/validation-rules", get(validation_rules_handler))
}
