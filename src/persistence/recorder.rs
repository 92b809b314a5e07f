//! Background task that copies domain events into the audit log.

use anyhow::Context;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use super::postgres::PostgresAuditLog;
use crate::domain::{EventBus, ScheduleEvent};

/// Spawns the recorder. It runs until the event bus closes.
///
/// Write failures are logged and the event is skipped; the registry stays
/// authoritative.
#[must_use]
pub fn spawn_recorder(audit_log: PostgresAuditLog, event_bus: &EventBus) -> JoinHandle<()> {
    let mut event_rx = event_bus.subscribe();
    tokio::spawn(async move {
        loop {
            match event_rx.recv().await {
                Ok(event) => {
                    if let Err(e) = record(&audit_log, &event).await {
                        tracing::error!(error = %format!("{e:#}"), "audit log write failed");
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(lagged = n, "audit recorder lagged behind event bus");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        tracing::debug!("audit recorder stopped");
    })
}

async fn record(audit_log: &PostgresAuditLog, event: &ScheduleEvent) -> anyhow::Result<()> {
    let (event_id, event_type, payload) = audit_payload(event)?;
    let row_id = audit_log
        .append(event_id, event_type, &payload)
        .await
        .with_context(|| format!("appending {event_type} for event {event_id}"))?;
    tracing::debug!(row_id, %event_id, event_type, "audit row written");
    Ok(())
}

/// Splits a domain event into the columns of an audit row.
///
/// # Errors
///
/// Returns an error if the event cannot be serialized.
pub fn audit_payload(
    event: &ScheduleEvent,
) -> anyhow::Result<(uuid::Uuid, &'static str, serde_json::Value)> {
    let payload = serde_json::to_value(event)
        .with_context(|| format!("serializing {}", event.event_type_str()))?;
    Ok((event.event_id().into(), event.event_type_str(), payload))
}
