//! Subscription registry for live query results.
//!
//! # Responsibility
//! - Track live bindings between a consumer and a query string.
//! - Hand out stable subscription ids for later removal.
//!
//! # Invariants
//! - Ids are unique for the registry lifetime and never reused.
//! - Queries are stored normalized (trimmed, lowercased); the empty query
//!   denotes the full "all notes" result set.

use crate::model::note::Note;
use std::collections::BTreeMap;

/// Callback invoked with a freshly computed result set after a mutation.
///
/// Called synchronously while the cache is locked, so every affected
/// subscriber observes the same post-commit state.
pub type ResultCallback = Box<dyn Fn(&[Note]) + Send>;

/// Stable handle for one live subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

pub(crate) struct Subscription {
    query: String,
    callback: ResultCallback,
}

impl Subscription {
    /// Normalized query this subscription was registered with.
    pub(crate) fn query(&self) -> &str {
        &self.query
    }

    /// Pushes a result set to the subscriber.
    pub(crate) fn notify(&self, results: &[Note]) {
        (self.callback)(results);
    }
}

/// Registry of live subscriptions keyed by id.
///
/// Iteration order is id order, which is registration order; tests rely on
/// deterministic notification order.
#[derive(Default)]
pub(crate) struct SubscriptionRegistry {
    next_id: u64,
    entries: BTreeMap<SubscriptionId, Subscription>,
}

impl SubscriptionRegistry {
    pub(crate) fn register(&mut self, query: String, callback: ResultCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, Subscription { query, callback });
        id
    }

    /// Removes a subscription. Returns whether it was present.
    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Subscription> {
        self.entries.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::SubscriptionRegistry;

    #[test]
    fn ids_are_never_reused_after_removal() {
        let mut registry = SubscriptionRegistry::default();
        let first = registry.register(String::new(), Box::new(|_| {}));
        assert!(registry.remove(first));

        let second = registry.register(String::new(), Box::new(|_| {}));
        assert_ne!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_unknown_id_reports_absence() {
        let mut registry = SubscriptionRegistry::default();
        let id = registry.register("milk".to_string(), Box::new(|_| {}));
        assert!(registry.remove(id));
        assert!(!registry.remove(id));
    }
}
