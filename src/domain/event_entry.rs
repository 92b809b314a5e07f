//! Accepted events with their showtimes and ticket types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::EventId;

/// A ticket type attached to a stored showtime.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Ticket {
    /// Backend-issued id.
    pub id: i64,
    /// Ticket type name, trimmed.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Number of tickets on sale.
    pub quantity: i64,
    /// Sale opening instant, if restricted.
    pub sale_start: Option<DateTime<Utc>>,
    /// Sale closing instant, if restricted.
    pub sale_end: Option<DateTime<Utc>>,
}

/// A stored showtime.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Showtime {
    /// Backend-issued id.
    pub id: i64,
    /// Start instant.
    pub start_time: DateTime<Utc>,
    /// End instant.
    pub end_time: DateTime<Utc>,
    /// Ticket types in display order.
    pub tickets: Vec<Ticket>,
}

impl Showtime {
    /// Looks up a ticket by id.
    #[must_use]
    pub fn ticket(&self, id: i64) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }
}

/// An event that passed validation and is held by the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct EventEntry {
    /// Unique event identifier (immutable after creation).
    pub event_id: EventId,
    /// Display name, trimmed.
    pub name: String,
    /// URL slug, unique across the registry.
    pub slug: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Banner image URL.
    pub banner_url: Option<String>,
    /// Showtimes in display order.
    pub showtimes: Vec<Showtime>,
    /// Creation timestamp (immutable after creation).
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update.
    pub updated_at: DateTime<Utc>,
}

impl EventEntry {
    /// Looks up a showtime by id.
    #[must_use]
    pub fn showtime(&self, id: i64) -> Option<&Showtime> {
        self.showtimes.iter().find(|s| s.id == id)
    }

    /// Total number of ticket types across all showtimes.
    #[must_use]
    pub fn ticket_count(&self) -> usize {
        self.showtimes.iter().map(|s| s.tickets.len()).sum()
    }
}

/// Lightweight view of an event for list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    /// Event identifier.
    pub event_id: EventId,
    /// Display name.
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

impl From<&EventEntry> for EventSummary {
    fn from(entry: &EventEntry) -> Self {
        Self {
            event_id: entry.event_id,
            name: entry.name.clone(),
            slug: entry.slug.clone(),
            showtime_count: entry.showtimes.len(),
            first_showtime_at: entry.showtimes.iter().map(|s| s.start_time).min(),
            created_at: entry.created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn entry() -> EventEntry {
        let now = Utc::now();
        let showtime = |id: i64, offset_hours: i64, tickets: Vec<Ticket>| Showtime {
            id,
            start_time: now + TimeDelta::hours(offset_hours),
            end_time: now + TimeDelta::hours(offset_hours + 2),
            tickets,
        };
        let ticket = |id: i64| Ticket {
            id,
            name: format!("T{id}"),
            price: 0.0,
            quantity: 1,
            sale_start: None,
            sale_end: None,
        };
        EventEntry {
            event_id: EventId::new(),
            name: "Concert".to_string(),
            slug: "concert".to_string(),
            description: None,
            banner_url: None,
            showtimes: vec![
                showtime(1, 48, vec![ticket(3)]),
                showtime(2, 24, vec![ticket(4), ticket(5)]),
            ],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn summary_picks_earliest_showtime() {
        let entry = entry();
        let summary = EventSummary::from(&entry);
        assert_eq!(summary.showtime_count, 2);
        assert_eq!(
            summary.first_showtime_at,
            entry.showtime(2).map(|s| s.start_time)
        );
    }

    #[test]
    fn lookups_by_id() {
        let entry = entry();
        assert_eq!(entry.ticket_count(), 3);
        let Some(showtime) = entry.showtime(2) else {
            panic!("showtime 2 exists");
        };
        assert!(showtime.ticket(5).is_some());
        assert!(showtime.ticket(3).is_none());
        assert!(entry.showtime(9).is_none());
    }
}
