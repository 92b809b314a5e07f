//! Event CRUD handlers: create, list, get, update, delete.
//!
//! Create and update run the full draft validation; a draft with any
//! finding is refused with `422` and the findings in `error.details`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    CreateEventRequest, EventDetailResponse, EventListResponse, EventSummaryDto, PaginationParams,
    UpdateEventRequest,
};
use crate::app_state::AppState;
use crate::domain::EventId;
use crate::error::{ErrorResponse, GatewayError};
use crate::persistence::StoredScheduleEvent;

/// `POST /events` — Create a new event.
///
/// # Errors
///
/// Returns [`GatewayError::ValidationFailed`] when the draft has findings
/// and [`GatewayError::SlugTaken`] when the requested slug is in use.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "Events",
    summary = "Create an event",
    description = "Validates the draft event and stores it. Showtimes and tickets receive backend ids; temporary client ids are discarded.",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = EventDetailResponse),
        (status = 400, description = "Invalid slug or row ids", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse),
        (status = 422, description = "Draft failed validation", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let entry = state.event_service.create_event(req.into()).await?;
    Ok((StatusCode::CREATED, Json(EventDetailResponse::from(entry))))
}

/// `GET /events` — List events with pagination.
///
/// # Errors
///
/// Returns [`GatewayError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    summary = "List events",
    description = "Returns a paginated list of events, oldest first.",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated event list", body = EventListResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let summaries = state.event_service.list_events().await;
    let (page, pagination) = params.paginate(summaries);
    let data = page.into_iter().map(EventSummaryDto::from).collect();
    Ok(Json(EventListResponse { data, pagination }))
}

/// `GET /events/:id` — Get event details.
///
/// # Errors
///
/// Returns [`GatewayError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Get event details",
    description = "Returns the event with all showtimes and tickets.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "Event details", body = EventDetailResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    let entry = state
        .event_service
        .get_event(EventId::from_uuid(id))
        .await?;
    Ok(Json(EventDetailResponse::from(entry)))
}

/// `PUT /events/:id` — Replace an event's details and schedule.
///
/// # Errors
///
/// Returns [`GatewayError::EventNotFound`] if the event does not exist,
/// [`GatewayError::ValidationFailed`] when the draft has findings, and
/// [`GatewayError::InvalidRequest`] when a persisted row id does not
/// belong to the event.
#[utoipa::path(
    put,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Update an event",
    description = "Validates the draft and replaces the stored schedule. Rows carrying a numeric id keep it; rows with a temporary id are created.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated", body = EventDetailResponse),
        (status = 400, description = "Invalid slug or row ids", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse),
        (status = 422, description = "Draft failed validation", body = ErrorResponse),
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let entry = state
        .event_service
        .update_event(EventId::from_uuid(id), req.into())
        .await?;
    Ok(Json(EventDetailResponse::from(entry)))
}

/// `DELETE /events/:id` — Remove an event.
///
/// # Errors
///
/// Returns [`GatewayError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Delete an event",
    description = "Removes an event and emits an `event_removed` event.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    state
        .event_service
        .remove_event(EventId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /events/:id/history` — Audit history of an event.
///
/// # Errors
///
/// Returns [`GatewayError::PersistenceDisabled`] when the audit log is not
/// configured and [`GatewayError::PersistenceError`] on database failure.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/history",
    tag = "Events",
    summary = "Get event history",
    description = "Returns every recorded change of the event, oldest first. Removed events keep their history.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "Recorded changes", body = Vec<StoredScheduleEvent>),
        (status = 503, description = "Audit log disabled", body = ErrorResponse),
    )
)]
pub async fn get_event_history(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    let audit_log = state
        .audit_log
        .as_ref()
        .ok_or(GatewayError::PersistenceDisabled)?;
    let history = audit_log.load_events_for(id).await?;
    Ok(Json(history))
}

/// Event management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event).get(list_events))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/events/{id}/history", get(get_event_history))
}
