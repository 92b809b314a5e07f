//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams registry changes to subscribed
//! clients and answers `validate` commands so an editor can check a draft
//! on every keystroke without a REST round trip.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
