//! Service layer: business logic orchestration.
//!
//! [`EventService`] gates event drafts through the validator, keeps the
//! [`super::domain::EventRegistry`] consistent, and emits events through
//! the [`super::domain::EventBus`].

pub mod event_service;

pub use event_service::EventService;
