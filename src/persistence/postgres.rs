//! PostgreSQL implementation of the audit log.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::models::{AuditRow, StoredScheduleEvent};
use crate::config::GatewayConfig;
use crate::error::GatewayError;

/// PostgreSQL-backed audit log using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresAuditLog {
    pool: PgPool,
}

impl PostgresAuditLog {
    /// Creates an audit log over an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized by the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::PersistenceError`] if the database is
    /// unreachable within the configured timeout.
    pub async fn connect(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Applies the bundled schema migrations.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::PersistenceError`] if a migration fails.
    pub async fn run_migrations(&self) -> Result<(), GatewayError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))
    }

    /// Appends an event to the audit log and returns its row id.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::PersistenceError`] on database failure.
    pub async fn append(
        &self,
        event_id: Uuid,
        event_type: &str,
        payload: &serde_json::Value,
    ) -> Result<i64, GatewayError> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO schedule_events (event_id, event_type, payload) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(event_id)
        .bind(event_type)
        .bind(payload)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))
    }

    /// Loads the history of one event, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::PersistenceError`] on database failure.
    pub async fn load_events_for(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<StoredScheduleEvent>, GatewayError> {
        let rows = sqlx::query_as::<_, AuditRow>(
            "SELECT id, event_id, event_type, payload, created_at FROM schedule_events \
             WHERE event_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(rows.into_iter().map(StoredScheduleEvent::from).collect())
    }

    /// Deletes audit rows older than the given number of days and returns
    /// how many were removed.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::PersistenceError`] on database failure.
    pub async fn delete_older_than(&self, days: u64) -> Result<u64, GatewayError> {
        let cutoff = retention_cutoff(Utc::now(), days);

        let result = sqlx::query("DELETE FROM schedule_events WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

/// Oldest timestamp kept by a retention of `days` counted back from `now`.
/// Saturates at the earliest representable time.
fn retention_cutoff(now: DateTime<Utc>, days: u64) -> DateTime<Utc> {
    i64::try_from(days)
        .ok()
        .and_then(TimeDelta::try_days)
        .and_then(|age| now.checked_sub_signed(age))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_counts_back_whole_days() {
        let now = DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(40);
        assert_eq!(
            retention_cutoff(now, 30),
            DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(10)
        );
    }

    #[test]
    fn huge_retention_saturates() {
        assert_eq!(
            retention_cutoff(Utc::now(), u64::MAX),
            DateTime::<Utc>::MIN_UTC
        );
    }
}
