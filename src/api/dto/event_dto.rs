//! Event DTOs for create, update, get, and list operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use crate::domain::{DraftShowtime, EventDraft, EventEntry, EventId, EventSummary, Showtime};

/// Request body for `POST /events`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    /// Event name.
    #[serde(default)]
    pub name: String,
    /// URL slug. Derived from the name when omitted.
    #[serde(default)]
    pub slug: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Banner image URL.
    #[serde(default)]
    pub banner_url: Option<String>,
    /// Showtimes with their tickets.
    #[serde(default)]
    pub showtimes: Vec<DraftShowtime>,
}

/// Request body for `PUT /events/:id`.
///
/// Replaces the event's details and schedule. Rows carrying a numeric id
/// update the existing showtime or ticket; rows with a temporary or no id
/// are created.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateEventRequest {
    /// Event name.
    #[serde(default)]
    pub name: String,
    /// New URL slug. The current slug is kept when omitted.
    #[serde(default)]
    pub slug: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Banner image URL.
    #[serde(default)]
    pub banner_url: Option<String>,
    /// Full showtime list after the update.
    #[serde(default)]
    pub showtimes: Vec<DraftShowtime>,
}

impl From<CreateEventRequest> for EventDraft {
    fn from(req: CreateEventRequest) -> Self {
        Self {
            name: req.name,
            slug: req.slug,
            description: req.description,
            banner_url: req.banner_url,
            showtimes: req.showtimes,
        }
    }
}

impl From<UpdateEventRequest> for EventDraft {
    fn from(req: UpdateEventRequest) -> Self {
        Self {
            name: req.name,
            slug: req.slug,
            description: req.description,
            banner_url: req.banner_url,
            showtimes: req.showtimes,
        }
    }
}

/// Full event detail returned by create, update, and get.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventDetailResponse {
    /// Event identifier.
    pub event_id: EventId,
    /// Event name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Banner image URL.
    pub banner_url: Option<String>,
    /// Showtimes with backend-issued ids.
    pub showtimes: Vec<Showtime>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<EventEntry> for EventDetailResponse {
    fn from(entry: EventEntry) -> Self {
        Self {
            event_id: entry.event_id,
            name: entry.name,
            slug: entry.slug,
            description: entry.description,
            banner_url: entry.banner_url,
            showtimes: entry.showtimes,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

/// Event summary for list responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventSummaryDto {
    /// Event identifier.
    pub event_id: EventId,
    /// Event name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Number of showtimes.
    pub showtime_count: usize,
    /// Earliest showtime start.
    pub first_showtime_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<EventSummary> for EventSummaryDto {
    fn from(s: EventSummary) -> Self {
        Self {
            event_id: s.event_id,
            name: s.name,
            slug: s.slug,
            showtime_count: s.showtime_count,
            first_showtime_at: s.first_showtime_at,
            created_at: s.created_at,
        }
    }
}

/// Paginated list response for `GET /events`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventListResponse {
    /// Event summaries.
    pub data: Vec<EventSummaryDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_form_shape() {
        let json = r#"{
            "name": "Concert",
            "showtimes": [
                {
                    "id": "tmp-1",
                    "start_time": "2026-03-01T19:00",
                    "end_time": "2026-03-01T21:00",
                    "tickets": [ { "id": "tmp-2", "name": "VIP", "price": 500000, "quantity": 50 } ]
                }
            ]
        }"#;
        let Ok(req) = serde_json::from_str::<CreateEventRequest>(json) else {
            panic!("request should parse");
        };
        assert_eq!(req.name, "Concert");
        assert!(req.slug.is_none());
        let tickets: Vec<_> = req.showtimes.iter().flat_map(|s| &s.tickets).collect();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets.first().map(|t| t.quantity), Some(50));
    }

    #[test]
    fn empty_body_parses_for_validation_to_report() {
        let Ok(req) = serde_json::from_str::<UpdateEventRequest>("{}") else {
            panic!("empty request should parse");
        };
        assert!(req.name.is_empty());
        assert!(req.showtimes.is_empty());
    }
}
