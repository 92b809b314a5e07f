//! Draft validation endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{ValidateEventRequest, ValidationReport};
use crate::app_state::AppState;

/// `POST /events/validate` — Validate a draft event without storing it.
///
/// Always answers `200`; a draft with findings is reported through
/// `valid: false` rather than an error status.
#[utoipa::path(
    post,
    path = "/api/v1/events/validate",
    tag = "Validation",
    summary = "Validate a draft event",
    description = "Runs every scheduling rule against the draft and returns the findings in evaluation order. Messages are user-facing Vietnamese text with 1-based showtime and ticket ordinals; indices are zero-based.",
    request_body = ValidateEventRequest,
    responses(
        (status = 200, description = "Validation report", body = ValidationReport),
    )
)]
pub async fn validate_event(
    State(state): State<AppState>,
    Json(req): Json<ValidateEventRequest>,
) -> impl IntoResponse {
    let errors = state.event_service.validate(&req.name, &req.showtimes);
    if !errors.is_empty() {
        tracing::debug!(error_count = errors.len(), "draft has validation findings");
    }
    Json(ValidationReport::from(errors))
}

/// Validation routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/events/validate", post(validate_event))
}
