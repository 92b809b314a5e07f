//! Persistence layer: PostgreSQL audit log of registry changes.
//!
//! The registry itself lives in memory. When persistence is enabled, the
//! [`recorder`] task appends every [`crate::domain::ScheduleEvent`] to the
//! `schedule_events` table through [`PostgresAuditLog`].

pub mod models;
pub mod postgres;
pub mod recorder;

pub use models::StoredScheduleEvent;
pub use postgres::PostgresAuditLog;
