//! WebSocket message types: envelope, commands, and events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DraftShowtime;

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for requests; server-generated for events.
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Builds a server-originated message stamped with the current time.
    #[must_use]
    pub fn new(id: impl Into<String>, msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Builds an error message answering request `id`.
    #[must_use]
    pub fn error(id: impl Into<String>, code: u16, message: &str) -> Self {
        Self::new(
            id,
            WsMessageType::Error,
            serde_json::json!({ "code": code, "message": message }),
        )
    }
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client broadcast event.
    Event,
    /// Server → Client error.
    Error,
}

/// Commands that a client can send over WebSocket, carried in the
/// envelope payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Subscribe to changes of specific events.
    Subscribe {
        /// Event IDs to subscribe to. Use `["*"]` for all events.
        event_ids: Vec<String>,
    },
    /// Unsubscribe from changes of specific events.
    Unsubscribe {
        /// Event IDs to unsubscribe from.
        event_ids: Vec<String>,
    },
    /// Validate a draft event without storing it.
    Validate {
        /// Event name as entered.
        #[serde(default)]
        name: String,
        /// Showtimes as entered.
        #[serde(default)]
        showtimes: Vec<DraftShowtime>,
    },
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parses_subscribe_command() {
        let json = r#"{ "command": "subscribe", "event_ids": ["*"] }"#;
        let Ok(WsCommand::Subscribe { event_ids }) = serde_json::from_str::<WsCommand>(json) else {
            panic!("expected subscribe");
        };
        assert_eq!(event_ids, vec!["*".to_string()]);
    }

    #[test]
    fn parses_validate_command_with_partial_draft() {
        let json = r#"{ "command": "validate", "showtimes": [{ "start_time": "2026-03-01T19:00" }] }"#;
        let Ok(WsCommand::Validate { name, showtimes }) = serde_json::from_str::<WsCommand>(json)
        else {
            panic!("expected validate");
        };
        assert!(name.is_empty());
        assert_eq!(showtimes.len(), 1);
    }

    #[test]
    fn unknown_command_is_rejected() {
        let json = r#"{ "command": "reserve_seat" }"#;
        assert!(serde_json::from_str::<WsCommand>(json).is_err());
    }

    #[test]
    fn envelope_uses_type_key() {
        let msg = WsMessage::error("req-1", 400, "malformed JSON");
        let Ok(value) = serde_json::to_value(&msg) else {
            panic!("envelope should serialize");
        };
        assert_eq!(value["type"], "error");
        assert_eq!(value["payload"]["code"], 400);
    }
}
