//! # event-schedule-gateway
//!
//! Scheduling validation for events with showtimes and ticket types, and a
//! REST and WebSocket gateway that manages events gated by it.
//!
//! The [`validation`] module is a pure library: given an event name and
//! its draft showtimes it returns every rule violation, in a fixed order,
//! with user-facing Vietnamese messages. The rest of the crate wraps it in
//! a service that only stores drafts with no findings.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── EventService (service/) ── EventValidator (validation/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── EventRegistry (domain/)
//!     │
//!     └── PostgreSQL audit log (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod validation;
pub mod ws;
