//! Concurrent event storage with per-event locking.
//!
//! [`EventRegistry`] keeps accepted events in a `HashMap` where each entry
//! sits behind its own [`tokio::sync::RwLock`], plus a slug index that
//! enforces slug uniqueness. Showtime and ticket ids come from a single
//! registry-wide sequence.
//!
//! Lock order: the outer map lock is never held while waiting on an entry
//! lock. Readers clone the entry `Arc`s and release the map first.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;

use super::EventId;
use super::event_entry::{EventEntry, EventSummary};
use crate::error::GatewayError;

#[derive(Debug, Default)]
struct Index {
    events: HashMap<EventId, Arc<RwLock<EventEntry>>>,
    slugs: HashMap<String, EventId>,
}

/// Central store for all accepted events.
#[derive(Debug)]
pub struct EventRegistry {
    index: RwLock<Index>,
    next_id: AtomicI64,
}

impl EventRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            index: RwLock::new(Index::default()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Issues the next showtime or ticket id.
    pub fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Inserts a new event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::SlugTaken`] if another event already uses
    /// the slug, or [`GatewayError::InvalidRequest`] if the id is already
    /// present (should never happen with UUID v4).
    pub async fn insert(&self, entry: EventEntry) -> Result<EventId, GatewayError> {
        let event_id = entry.event_id;
        let mut index = self.index.write().await;
        if index.events.contains_key(&event_id) {
            return Err(GatewayError::InvalidRequest(format!(
                "event {event_id} already exists"
            )));
        }
        if index.slugs.contains_key(&entry.slug) {
            return Err(GatewayError::SlugTaken(entry.slug));
        }
        index.slugs.insert(entry.slug.clone(), event_id);
        index.events.insert(event_id, Arc::new(RwLock::new(entry)));
        Ok(event_id)
    }

    /// Inserts a new event under the first free slug among `entry.slug`,
    /// `entry.slug-2`, `entry.slug-3`, … and returns the slug it received.
    ///
    /// The slug is picked and claimed under one index lock, so concurrent
    /// inserts from the same base never collide.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if the id is already present.
    pub async fn insert_with_free_slug(
        &self,
        mut entry: EventEntry,
    ) -> Result<(EventId, String), GatewayError> {
        let event_id = entry.event_id;
        let mut index = self.index.write().await;
        if index.events.contains_key(&event_id) {
            return Err(GatewayError::InvalidRequest(format!(
                "event {event_id} already exists"
            )));
        }
        let base = std::mem::take(&mut entry.slug);
        let mut slug = base.clone();
        let mut suffix = 2_u32;
        while index.slugs.contains_key(&slug) {
            slug = format!("{base}-{suffix}");
            suffix = suffix.saturating_add(1);
        }
        entry.slug.clone_from(&slug);
        index.slugs.insert(slug.clone(), event_id);
        index.events.insert(event_id, Arc::new(RwLock::new(entry)));
        Ok((event_id, slug))
    }

    /// Returns the event entry behind its per-event lock.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] if no event has the given ID.
    pub async fn get(&self, event_id: EventId) -> Result<Arc<RwLock<EventEntry>>, GatewayError> {
        let index = self.index.read().await;
        index
            .events
            .get(&event_id)
            .map(Arc::clone)
            .ok_or(GatewayError::EventNotFound(*event_id.as_uuid()))
    }

    /// Returns `true` if the slug is free or already held by `owner`.
    pub async fn slug_available(&self, slug: &str, owner: Option<EventId>) -> bool {
        let index = self.index.read().await;
        match index.slugs.get(slug) {
            None => true,
            Some(holder) => Some(*holder) == owner,
        }
    }

    /// Moves an event from `old_slug` to `new_slug` in the slug index.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::SlugTaken`] if a different event holds
    /// `new_slug`, or [`GatewayError::EventNotFound`] if the event is gone.
    pub async fn rename_slug(
        &self,
        event_id: EventId,
        old_slug: &str,
        new_slug: &str,
    ) -> Result<(), GatewayError> {
        let mut index = self.index.write().await;
        if !index.events.contains_key(&event_id) {
            return Err(GatewayError::EventNotFound(*event_id.as_uuid()));
        }
        match index.slugs.get(new_slug) {
            Some(holder) if *holder != event_id => {
                return Err(GatewayError::SlugTaken(new_slug.to_string()));
            }
            _ => {}
        }
        if index.slugs.get(old_slug) == Some(&event_id) {
            index.slugs.remove(old_slug);
        }
        index.slugs.insert(new_slug.to_string(), event_id);
        Ok(())
    }

    /// Removes an event, returning a copy of its final state.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] if no event has the given ID.
    pub async fn remove(&self, event_id: EventId) -> Result<EventEntry, GatewayError> {
        let entry_lock = {
            let mut index = self.index.write().await;
            let entry_lock = index
                .events
                .remove(&event_id)
                .ok_or(GatewayError::EventNotFound(*event_id.as_uuid()))?;
            index.slugs.retain(|_, holder| *holder != event_id);
            entry_lock
        };
        let entry = entry_lock.read().await.clone();
        Ok(entry)
    }

    /// Returns summaries of all events, oldest first.
    pub async fn list(&self) -> Vec<EventSummary> {
        let locks: Vec<Arc<RwLock<EventEntry>>> = {
            let index = self.index.read().await;
            index.events.values().map(Arc::clone).collect()
        };

        let mut summaries = Vec::with_capacity(locks.len());
        for entry_lock in locks {
            let entry = entry_lock.read().await;
            summaries.push(EventSummary::from(&*entry));
        }
        summaries.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.event_id.as_uuid().cmp(b.event_id.as_uuid()))
        });
        summaries
    }

    /// Returns the number of events in the registry.
    pub async fn len(&self) -> usize {
        self.index.read().await.events.len()
    }

    /// Returns `true` if the registry holds no events.
    pub async fn is_empty(&self) -> bool {
        self.index.read().await.events.is_empty()
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}
