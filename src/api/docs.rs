//! OpenAPI document assembled from the handler annotations.

use utoipa::OpenApi;

use crate::api::dto::{
    CreateEventRequest, EventDetailResponse, EventListResponse, EventSummaryDto, PaginationMeta,
    UpdateEventRequest, ValidateEventRequest, ValidationReport, ValidationRuleInfo,
};
use crate::api::handlers;
use crate::domain::{DraftId, DraftShowtime, DraftTicket, EventId, Showtime, Ticket};
use crate::error::{ErrorBody, ErrorResponse};
use crate::persistence::StoredScheduleEvent;
use crate::validation::{
    DuplicateSlotMode, RuleCategory, ValidationError, ValidationField, ValidationRule,
};

/// OpenAPI description of the REST surface.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "event-schedule-gateway",
        description = "Scheduling validation and event management API."
    ),
    paths(
        handlers::system::health_handler,
        handlers::system::validation_rules_handler,
        handlers::validation::validate_event,
        handlers::events::create_event,
        handlers::events::list_events,
        handlers::events::get_event,
        handlers::events::update_event,
        handlers::events::delete_event,
        handlers::events::get_event_history,
    ),
    components(schemas(
        ErrorResponse,
        ErrorBody,
        EventId,
        DraftId,
        DraftShowtime,
        DraftTicket,
        Showtime,
        Ticket,
        CreateEventRequest,
        UpdateEventRequest,
        EventDetailResponse,
        EventSummaryDto,
        EventListResponse,
        PaginationMeta,
        ValidateEventRequest,
        ValidationReport,
        ValidationRuleInfo,
        ValidationError,
        ValidationField,
        ValidationRule,
        RuleCategory,
        DuplicateSlotMode,
        StoredScheduleEvent,
        handlers::system::HealthResponse,
        handlers::system::ValidationRulesResponse,
    )),
    tags(
        (name = "System", description = "Health and configuration"),
        (name = "Validation", description = "Draft event validation"),
        (name = "Events", description = "Event management"),
    )
)]
pub struct ApiDoc;
