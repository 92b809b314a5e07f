//! Database models for the audit log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Column tuple selected from `schedule_events`.
pub type AuditRow = (i64, Uuid, String, serde_json::Value, DateTime<Utc>);

/// A stored row from the `schedule_events` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StoredScheduleEvent {
    /// Auto-increment row ID.
    pub id: i64,
    /// Event the change applies to.
    pub event_id: Uuid,
    /// Event type discriminator (e.g. `"event_created"`).
    pub event_type: String,
    /// JSONB payload with the full domain event.
    #[schema(value_type = Object)]
    pub payload: serde_json::Value,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<AuditRow> for StoredScheduleEvent {
    fn from((id, event_id, event_type, payload, created_at): AuditRow) -> Self {
        Self {
            id,
            event_id,
            event_type,
            payload,
            created_at,
        }
    }
}
