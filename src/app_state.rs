//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::persistence::PostgresAuditLog;
use crate::service::EventService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Event service for all business logic.
    pub event_service: Arc<EventService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
    /// Audit log, when persistence is enabled.
    pub audit_log: Option<PostgresAuditLog>,
}
