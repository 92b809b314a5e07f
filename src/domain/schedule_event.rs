//! Domain events reflecting changes to accepted events.
//!
//! Every registry mutation emits a [`ScheduleEvent`] through the
//! [`super::EventBus`]. Events are broadcast to WebSocket subscribers and
//! optionally appended to the PostgreSQL audit log.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::EventId;

/// Domain event emitted after every registry mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum ScheduleEvent {
    /// Emitted when a new event passes validation and is stored.
    EventCreated {
        /// Event identifier.
        event_id: EventId,
        /// Event name.
        name: String,
        /// URL slug.
        slug: String,
        /// Number of showtimes.
        showtime_count: usize,
        /// Number of ticket types across all showtimes.
        ticket_count: usize,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when an event's details or schedule are replaced.
    EventUpdated {
        /// Event identifier.
        event_id: EventId,
        /// Event name after the update.
        name: String,
        /// Number of showtimes after the update.
        showtime_count: usize,
        /// Number of ticket types after the update.
        ticket_count: usize,
        /// Update timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when an event is removed.
    EventRemoved {
        /// Event identifier.
        event_id: EventId,
        /// Removal timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl ScheduleEvent {
    /// Returns the event ID associated with this domain event.
    #[must_use]
    pub const fn event_id(&self) -> EventId {
        match self {
            Self::EventCreated { event_id, .. }
            | Self::EventUpdated { event_id, .. }
            | Self::EventRemoved { event_id, .. } => *event_id,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::EventCreated { .. } => "event_created",
            Self::EventUpdated { .. } => "event_updated",
            Self::EventRemoved { .. } => "event_removed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_event_serializes_with_tag() {
        let event = ScheduleEvent::EventCreated {
            event_id: EventId::new(),
            name: "Concert".to_string(),
            slug: "concert".to_string(),
            showtime_count: 2,
            ticket_count: 3,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap_or_default();
        assert!(json.contains("\"event_type\":\"event_created\""));
        assert!(json.contains("\"showtime_count\":2"));
        assert_eq!(event.event_type_str(), "event_created");
    }

    #[test]
    fn event_id_accessor() {
        let id = EventId::new();
        let event = ScheduleEvent::EventRemoved {
            event_id: id,
            timestamp: Utc::now(),
        };
        assert_eq!(event.event_id(), id);
        assert_eq!(event.event_type_str(), "event_removed");
    }
}
