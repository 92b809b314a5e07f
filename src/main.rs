//! event-schedule-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use event_schedule_gateway::api;
use event_schedule_gateway::app_state::AppState;
use event_schedule_gateway::config::GatewayConfig;
use event_schedule_gateway::domain::{EventBus, EventRegistry};
use event_schedule_gateway::persistence::PostgresAuditLog;
use event_schedule_gateway::persistence::recorder::spawn_recorder;
use event_schedule_gateway::service::EventService;
use event_schedule_gateway::validation::{EventValidator, SystemClock};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(
        addr = %config.listen_addr,
        max_showtime_hours = config.max_showtime_hours,
        duplicate_slot_mode = %config.duplicate_slot_mode,
        local_utc_offset = %config.local_utc_offset,
        "starting event-schedule-gateway"
    );

    // Build domain layer
    let registry = Arc::new(EventRegistry::new());
    let event_bus = EventBus::new(config.event_bus_capacity);

    // Optional audit log
    let audit_log = if config.persistence_enabled {
        let audit_log = PostgresAuditLog::connect(&config).await?;
        audit_log.run_migrations().await?;
        if config.cleanup_after_days > 0 {
            let removed = audit_log.delete_older_than(config.cleanup_after_days).await?;
            tracing::info!(removed, days = config.cleanup_after_days, "audit log cleaned up");
        }
        drop(spawn_recorder(audit_log.clone(), &event_bus));
        tracing::info!("audit log enabled");
        Some(audit_log)
    } else {
        None
    };

    // Build service layer
    let validator = EventValidator::new(config.validator_options());
    let event_service = Arc::new(EventService::new(
        registry,
        event_bus.clone(),
        validator,
        Arc::new(SystemClock),
    ));

    // Build application state
    let app_state = AppState {
        event_service,
        event_bus,
        audit_log,
    };

    let app = api::build_app(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
