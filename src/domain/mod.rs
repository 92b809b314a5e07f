//! Domain layer: drafts, accepted events, registry, and event system.
//!
//! Drafts model what an event form holds before submission. Accepted
//! events live in the [`EventRegistry`], and every change to the registry
//! is announced on the [`EventBus`] as a [`ScheduleEvent`].

pub mod draft;
pub mod event_bus;
pub mod event_entry;
pub mod event_id;
pub mod event_registry;
pub mod schedule_event;

pub use draft::{DraftId, DraftShowtime, DraftTicket, EventDraft};
pub use event_bus::EventBus;
pub use event_entry::{EventEntry, EventSummary, Showtime, Ticket};
pub use event_id::EventId;
pub use event_registry::EventRegistry;
pub use schedule_event::ScheduleEvent;
