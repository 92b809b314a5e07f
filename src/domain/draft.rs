//! Draft showtimes and tickets as held by an event form.
//!
//! Drafts are never trusted: every field is optional or loosely typed so a
//! half-filled form deserializes cleanly and the validator can report what
//! is missing instead of the request being rejected at the JSON layer.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Identity of a draft row.
///
/// A JSON number is a backend-issued id; a JSON string is a temporary id
/// generated by the client for a row that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum DraftId {
    /// Id of an existing, persisted row.
    Persisted(i64),
    /// Client-generated id of an unsaved row.
    Temporary(String),
}

impl DraftId {
    /// Returns the backend id if the row is already persisted.
    #[must_use]
    pub const fn persisted(&self) -> Option<i64> {
        match self {
            Self::Persisted(id) => Some(*id),
            Self::Temporary(_) => None,
        }
    }
}

/// A showtime row being edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DraftShowtime {
    /// Row identity.
    #[serde(default)]
    pub id: Option<DraftId>,
    /// Start timestamp as entered.
    #[serde(default)]
    pub start_time: Option<String>,
    /// End timestamp as entered.
    #[serde(default)]
    pub end_time: Option<String>,
    /// Ticket types sold for this showtime, in display order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tickets: Vec<DraftTicket>,
}

impl DraftShowtime {
    /// Creates a showtime with both bounds set and no tickets.
    #[must_use]
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            id: None,
            start_time: Some(start_time.into()),
            end_time: Some(end_time.into()),
            tickets: Vec::new(),
        }
    }

    /// Sets the row identity.
    #[must_use]
    pub fn with_id(mut self, id: DraftId) -> Self {
        self.id = Some(id);
        self
    }

    /// Appends a ticket.
    #[must_use]
    pub fn with_ticket(mut self, ticket: DraftTicket) -> Self {
        self.tickets.push(ticket);
        self
    }
}

/// A ticket row being edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DraftTicket {
    /// Row identity, scoped to the parent showtime.
    #[serde(default)]
    pub id: Option<DraftId>,
    /// Ticket type name.
    #[serde(default)]
    pub name: String,
    /// Unit price.
    #[serde(default)]
    pub price: f64,
    /// Number of tickets on sale.
    #[serde(default)]
    pub quantity: i64,
    /// Sale opening timestamp, if restricted.
    #[serde(default)]
    pub start_time: Option<String>,
    /// Sale closing timestamp, if restricted.
    #[serde(default)]
    pub end_time: Option<String>,
}

impl DraftTicket {
    /// Creates a ticket with an unrestricted sale window.
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            quantity,
            start_time: None,
            end_time: None,
        }
    }

    /// Sets the row identity.
    #[must_use]
    pub fn with_id(mut self, id: DraftId) -> Self {
        self.id = Some(id);
        self
    }

    /// Restricts the sale window.
    #[must_use]
    pub fn with_sale_window(mut self, start_time: Option<&str>, end_time: Option<&str>) -> Self {
        self.start_time = start_time.map(str::to_string);
        self.end_time = end_time.map(str::to_string);
        self
    }
}

/// A whole event as submitted for creation or update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDraft {
    /// Event name.
    pub name: String,
    /// Requested URL slug; `None` keeps or derives one.
    pub slug: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Banner image URL.
    pub banner_url: Option<String>,
    /// Showtimes with their tickets.
    pub showtimes: Vec<DraftShowtime>,
}

/// Treats an explicit JSON `null` list like an absent one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
