//! Per-connection subscription manager.
//!
//! Tracks which event IDs a WebSocket client is subscribed to and
//! provides server-side filtering of the event bus.

use std::collections::HashSet;

use crate::domain::EventId;

/// Manages the set of event subscriptions for a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed event IDs. If `subscribe_all` is true, this set is ignored.
    event_ids: HashSet<EventId>,
    /// Whether the client subscribes to all events (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds event IDs to the subscription set. `wildcard` enables `"*"`.
    pub fn subscribe(&mut self, ids: &[EventId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        self.event_ids.extend(ids.iter().copied());
    }

    /// Removes event IDs from the subscription set. `wildcard` clears `"*"`.
    pub fn unsubscribe(&mut self, ids: &[EventId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = false;
        }
        for id in ids {
            self.event_ids.remove(id);
        }
    }

    /// Returns `true` if the given event ID matches the subscription filter.
    #[must_use]
    pub fn matches(&self, event_id: EventId) -> bool {
        self.subscribe_all || self.event_ids.contains(&event_id)
    }

    /// Returns the number of explicitly subscribed event IDs.
    #[must_use]
    pub fn count(&self) -> usize {
        self.event_ids.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub const fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

/// Splits raw subscription targets into event ids and the wildcard flag.
///
/// Targets that are neither `"*"` nor a UUID are dropped; the command
/// response lists only the ids that were understood.
#[must_use]
pub fn parse_event_ids(raw: &[String]) -> (Vec<EventId>, bool) {
    let mut ids = Vec::new();
    let mut wildcard = false;
    for target in raw.iter().map(|s| s.trim()) {
        if target == "*" {
            wildcard = true;
        } else if let Ok(uuid) = target.parse::<uuid::Uuid>() {
            let id = EventId::from_uuid(uuid);
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    (ids, wildcard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(EventId::new()));
    }

    #[test]
    fn subscribe_specific_event() {
        let mut mgr = SubscriptionManager::new();
        let id = EventId::new();
        mgr.subscribe(&[id], false);
        assert!(mgr.matches(id));
        assert!(!mgr.matches(EventId::new()));
    }

    #[test]
    fn wildcard_matches_everything_until_cleared() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[], true);
        assert!(mgr.matches(EventId::new()));
        mgr.unsubscribe(&[], true);
        assert!(!mgr.matches(EventId::new()));
    }

    #[test]
    fn unsubscribe_removes_event() {
        let mut mgr = SubscriptionManager::new();
        let id = EventId::new();
        mgr.subscribe(&[id, EventId::new()], false);
        assert_eq!(mgr.count(), 2);
        mgr.unsubscribe(&[id], false);
        assert!(!mgr.matches(id));
        assert_eq!(mgr.count(), 1);
    }

    #[test]
    fn parse_keeps_known_targets_once() {
        let id = EventId::new();
        let raw = vec![
            format!(" {id} "),
            id.to_string(),
            "*".to_string(),
            "hoa-nhac-mua-thu".to_string(),
        ];
        let (ids, wildcard) = parse_event_ids(&raw);
        assert_eq!(ids, vec![id]);
        assert!(wildcard);
    }

    #[test]
    fn parse_without_wildcard() {
        let (ids, wildcard) = parse_event_ids(&["not-a-uuid".to_string()]);
        assert!(ids.is_empty());
        assert!(!wildcard);
    }
}
