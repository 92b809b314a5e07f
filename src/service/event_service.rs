//! Event service: gates drafts through the validator, stores accepted
//! events, and emits domain events.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::{
    DraftId, DraftShowtime, DraftTicket, EventBus, EventDraft, EventEntry, EventId,
    EventRegistry, EventSummary, ScheduleEvent, Showtime, Ticket,
};
use crate::error::GatewayError;
use crate::validation::{Clock, EventValidator, ValidationError};

/// Longest slug accepted or derived.
const MAX_SLUG_LEN: usize = 100;

/// Vietnamese letters folded to their ASCII base when deriving slugs.
const SLUG_FOLDS: &[(&str, char)] = &[
    ("àáảãạăằắẳẵặâầấẩẫậ", 'a'),
    ("èéẻẽẹêềếểễệ", 'e'),
    ("ìíỉĩị", 'i'),
    ("òóỏõọôồốổỗộơờớởỡợ", 'o'),
    ("ùúủũụưừứửữự", 'u'),
    ("ỳýỷỹỵ", 'y'),
    ("đ", 'd'),
];

/// Orchestration layer for all event operations.
///
/// Every mutation follows the pattern: validate draft → resolve slug →
/// assign ids → update registry → emit event → return the stored state.
#[derive(Debug, Clone)]
pub struct EventService {
    registry: Arc<EventRegistry>,
    event_bus: EventBus,
    validator: EventValidator,
    clock: Arc<dyn Clock>,
}

impl EventService {
    /// Creates a new `EventService`.
    #[must_use]
    pub fn new(
        registry: Arc<EventRegistry>,
        event_bus: EventBus,
        validator: EventValidator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            event_bus,
            validator,
            clock,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the inner [`EventRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<EventRegistry> {
        &self.registry
    }

    /// Returns the validator used to gate submissions.
    #[must_use]
    pub fn validator(&self) -> &EventValidator {
        &self.validator
    }

    /// Validates a draft event against the service clock.
    #[must_use]
    pub fn validate(&self, name: &str, showtimes: &[DraftShowtime]) -> Vec<ValidationError> {
        self.validator.validate(name, showtimes, self.clock.as_ref())
    }

    /// Validates and stores a new event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ValidationFailed`] when the draft has
    /// findings, [`GatewayError::InvalidRequest`] for a malformed slug or
    /// persisted ids on a new event, and [`GatewayError::SlugTaken`] when
    /// the requested slug is in use.
    pub async fn create_event(&self, draft: EventDraft) -> Result<EventEntry, GatewayError> {
        self.ensure_valid(&draft)?;

        let requested = requested_slug(&draft)?;
        let showtimes = self.assign_showtimes(None, &draft.showtimes)?;

        let now = self.clock.now();
        let mut entry = EventEntry {
            event_id: EventId::new(),
            name: draft.name.trim().to_string(),
            slug: String::new(),
            description: draft.description,
            banner_url: draft.banner_url,
            showtimes,
            created_at: now,
            updated_at: now,
        };
        let event_id = match requested {
            Some(slug) => {
                entry.slug = slug;
                self.registry.insert(entry.clone()).await?
            }
            None => {
                entry.slug = slugify(&entry.name);
                let (event_id, slug) = self.registry.insert_with_free_slug(entry.clone()).await?;
                entry.slug = slug;
                event_id
            }
        };

        let _ = self.event_bus.publish(ScheduleEvent::EventCreated {
            event_id,
            name: entry.name.clone(),
            slug: entry.slug.clone(),
            showtime_count: entry.showtimes.len(),
            ticket_count: entry.ticket_count(),
            timestamp: now,
        });

        tracing::info!(%event_id, slug = %entry.slug, showtimes = entry.showtimes.len(), "event created");
        Ok(entry)
    }

    /// Validates and applies a full replacement of an event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] if the event does not exist,
    /// [`GatewayError::ValidationFailed`] when the draft has findings,
    /// [`GatewayError::InvalidRequest`] for a malformed slug or ids that do
    /// not belong to the event, and [`GatewayError::SlugTaken`] when the new
    /// slug is in use.
    pub async fn update_event(
        &self,
        event_id: EventId,
        draft: EventDraft,
    ) -> Result<EventEntry, GatewayError> {
        let entry_lock = self.registry.get(event_id).await?;
        self.ensure_valid(&draft)?;
        self.update_entry(event_id, &entry_lock, draft).await
    }

    async fn update_entry(
        &self,
        event_id: EventId,
        entry_lock: &RwLock<EventEntry>,
        draft: EventDraft,
    ) -> Result<EventEntry, GatewayError> {
        let mut entry = entry_lock.write().await;
        let slug = requested_slug(&draft)?.unwrap_or_else(|| entry.slug.clone());
        let showtimes = self.assign_showtimes(Some(&entry), &draft.showtimes)?;

        // Runs even for an unchanged slug: the index lock is where a
        // concurrent removal becomes visible.
        self.registry
            .rename_slug(event_id, &entry.slug, &slug)
            .await?;

        entry.name = draft.name.trim().to_string();
        entry.slug = slug;
        entry.description = draft.description;
        entry.banner_url = draft.banner_url;
        entry.showtimes = showtimes;
        entry.updated_at = self.clock.now();
        let updated = entry.clone();

        // Published under the entry lock so a racing removal is announced after it.
        let _ = self.event_bus.publish(ScheduleEvent::EventUpdated {
            event_id,
            name: updated.name.clone(),
            showtime_count: updated.showtimes.len(),
            ticket_count: updated.ticket_count(),
            timestamp: updated.updated_at,
        });
        drop(entry);

        tracing::info!(%event_id, showtimes = updated.showtimes.len(), "event updated");
        Ok(updated)
    }

    /// Returns a copy of a stored event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] if the event does not exist.
    pub async fn get_event(&self, event_id: EventId) -> Result<EventEntry, GatewayError> {
        let entry_lock = self.registry.get(event_id).await?;
        let entry = entry_lock.read().await.clone();
        Ok(entry)
    }

    /// Returns summaries of all stored events, oldest first.
    pub async fn list_events(&self) -> Vec<EventSummary> {
        self.registry.list().await
    }

    /// Removes a stored event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] if the event does not exist.
    pub async fn remove_event(&self, event_id: EventId) -> Result<(), GatewayError> {
        let _entry = self.registry.remove(event_id).await?;

        let _ = self.event_bus.publish(ScheduleEvent::EventRemoved {
            event_id,
            timestamp: self.clock.now(),
        });

        tracing::info!(%event_id, "event removed");
        Ok(())
    }

    fn ensure_valid(&self, draft: &EventDraft) -> Result<(), GatewayError> {
        let errors = self.validate(&draft.name, &draft.showtimes);
        if errors.is_empty() {
            return Ok(());
        }
        tracing::debug!(error_count = errors.len(), "event draft rejected");
        Err(GatewayError::ValidationFailed(errors))
    }

    /// Turns validated draft showtimes into stored ones, keeping the ids of
    /// rows that already exist in `existing` and issuing ids for new rows.
    fn assign_showtimes(
        &self,
        existing: Option<&EventEntry>,
        drafts: &[DraftShowtime],
    ) -> Result<Vec<Showtime>, GatewayError> {
        let mut seen = HashSet::new();
        let mut showtimes = Vec::with_capacity(drafts.len());

        for (index, draft) in drafts.iter().enumerate() {
            let previous = match draft.id.as_ref().and_then(DraftId::persisted) {
                Some(id) => {
                    let found = existing.and_then(|e| e.showtime(id)).ok_or_else(|| {
                        GatewayError::InvalidRequest(format!(
                            "showtime {id} does not belong to this event"
                        ))
                    })?;
                    if !seen.insert(id) {
                        return Err(GatewayError::InvalidRequest(format!(
                            "showtime {id} appears more than once"
                        )));
                    }
                    Some(found)
                }
                None => None,
            };

            showtimes.push(Showtime {
                id: previous.map_or_else(|| self.registry.next_id(), |s| s.id),
                start_time: self.required_time(draft.start_time.as_deref(), index)?,
                end_time: self.required_time(draft.end_time.as_deref(), index)?,
                tickets: self.assign_tickets(previous, &draft.tickets)?,
            });
        }

        Ok(showtimes)
    }

    fn assign_tickets(
        &self,
        showtime: Option<&Showtime>,
        drafts: &[DraftTicket],
    ) -> Result<Vec<Ticket>, GatewayError> {
        let mut seen = HashSet::new();
        let mut tickets = Vec::with_capacity(drafts.len());

        for draft in drafts {
            let id = match draft.id.as_ref().and_then(DraftId::persisted) {
                Some(id) => {
                    if showtime.and_then(|s| s.ticket(id)).is_none() {
                        return Err(GatewayError::InvalidRequest(format!(
                            "ticket {id} does not belong to its showtime"
                        )));
                    }
                    if !seen.insert(id) {
                        return Err(GatewayError::InvalidRequest(format!(
                            "ticket {id} appears more than once"
                        )));
                    }
                    id
                }
                None => self.registry.next_id(),
            };

            tickets.push(Ticket {
                id,
                name: draft.name.trim().to_string(),
                price: draft.price,
                quantity: draft.quantity,
                sale_start: self.optional_time(draft.start_time.as_deref()),
                sale_end: self.optional_time(draft.end_time.as_deref()),
            });
        }

        Ok(tickets)
    }

    fn required_time(&self, raw: Option<&str>, index: usize) -> Result<DateTime<Utc>, GatewayError> {
        raw.and_then(|r| self.validator.parse_time(r)).ok_or_else(|| {
            GatewayError::Internal(format!(
                "showtime {} has no usable time after validation",
                index + 1
            ))
        })
    }

    fn optional_time(&self, raw: Option<&str>) -> Option<DateTime<Utc>> {
        raw.filter(|r| !r.trim().is_empty())
            .and_then(|r| self.validator.parse_time(r))
    }
}

/// Returns the explicitly requested slug, if any, after checking its shape.
fn requested_slug(draft: &EventDraft) -> Result<Option<String>, GatewayError> {
    let Some(raw) = draft.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if is_valid_slug(raw) {
        Ok(Some(raw.to_string()))
    } else {
        Err(GatewayError::InvalidRequest(format!(
            "invalid slug {raw:?}: use lowercase letters, digits and single dashes"
        )))
    }
}

/// Lowercase ASCII letters and digits separated by single dashes.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_SLUG_LEN
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Derives a slug from an event name, folding Vietnamese diacritics.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if let Some(folded) = fold_to_ascii(c) {
            slug.push(folded);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.truncate(MAX_SLUG_LEN);
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "event".to_string()
    } else {
        slug.to_string()
    }
}

fn fold_to_ascii(c: char) -> Option<char> {
    if c.is_ascii_alphanumeric() {
        return Some(c.to_ascii_lowercase());
    }
    let lower = c.to_lowercase().next()?;
    SLUG_FOLDS
        .iter()
        .find(|(letters, _)| letters.contains(lower))
        .map(|(_, base)| *base)
}
