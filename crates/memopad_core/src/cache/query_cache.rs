//! Write-through query cache over a [`NoteStore`].
//!
//! # Responsibility
//! - Mirror store contents for fast repeated reads.
//! - Evaluate substring queries against the mirror.
//! - Apply mutations to the store first, then the mirror, then republish to
//!   affected subscriptions.
//!
//! # Invariants
//! - One mutation's store write and mirror update complete as a unit before
//!   the next mutation begins (single mutex owns mirror and registry).
//! - Reads never observe a half-applied mutation; returned result sets are
//!   snapshots, so abandoning one has no side effects.
//! - On store failure the mirror is untouched; the error propagates as-is.

use crate::cache::subscription::{ResultCallback, SubscriptionId, SubscriptionRegistry};
use crate::model::note::{Note, NoteId};
use crate::search::substring::{matches_normalized, normalize_query};
use crate::store::note_store::{NoteStore, StoreResult};
use log::debug;
use parking_lot::Mutex;

/// Query/cache abstraction serving the five note operations.
///
/// Constructed explicitly at app start and passed down to consumers; there
/// is no global instance.
pub struct QueryCache<S: NoteStore> {
    inner: Mutex<CacheInner<S>>,
}

struct CacheInner<S> {
    store: S,
    /// `None` until the first read or subscription warms it.
    mirror: Option<Vec<Note>>,
    subscriptions: SubscriptionRegistry,
}

impl<S: NoteStore> QueryCache<S> {
    pub fn new(store: S) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                store,
                mirror: None,
                subscriptions: SubscriptionRegistry::default(),
            }),
        }
    }

    /// Returns the current full result set, warming the mirror on first use.
    pub fn fetch_all(&self) -> StoreResult<Vec<Note>> {
        let mut inner = self.inner.lock();
        let mirror = inner.ensure_mirror()?;
        Ok(mirror.clone())
    }

    /// Returns the subsequence of the mirror matching `query`.
    ///
    /// A blank query is equivalent to [`Self::fetch_all`]. Matching is
    /// case-insensitive substring over title and content, order-preserving.
    pub fn search(&self, query: &str) -> StoreResult<Vec<Note>> {
        let normalized = normalize_query(query);
        let mut inner = self.inner.lock();
        let mirror = inner.ensure_mirror()?;
        Ok(filter_mirror(mirror, &normalized))
    }

    /// Persists a new note, appends it to the mirror and republishes to every
    /// subscription the note matches.
    pub fn add(&self, title: &str, content: &str) -> StoreResult<Note> {
        let mut inner = self.inner.lock();
        inner.add(title, content)
    }

    /// Replaces a note in the store and in place in the mirror, then
    /// republishes to every subscription whose result set changed.
    pub fn update(&self, id: NoteId, title: &str, content: &str) -> StoreResult<Note> {
        let mut inner = self.inner.lock();
        inner.update(id, title, content)
    }

    /// Deletes a note (idempotent) and republishes to every subscription
    /// that contained it.
    pub fn delete(&self, id: NoteId) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        inner.delete(id)
    }

    /// Registers a live subscription for `query` and synchronously delivers
    /// the current result set as the first notification.
    pub fn subscribe(&self, query: &str, callback: ResultCallback) -> StoreResult<SubscriptionId> {
        let normalized = normalize_query(query);
        let mut inner = self.inner.lock();
        let mirror = inner.ensure_mirror()?;
        let initial = filter_mirror(mirror, &normalized);
        callback(&initial);
        let id = inner.subscriptions.register(normalized, callback);
        debug!(
            "event=subscribe module=cache status=ok subscription={id:?} live={}",
            inner.subscriptions.len()
        );
        Ok(id)
    }

    /// Removes a live subscription. Returns whether it was present.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.lock();
        let removed = inner.subscriptions.remove(id);
        debug!(
            "event=unsubscribe module=cache removed={removed} live={}",
            inner.subscriptions.len()
        );
        removed
    }

    /// Number of currently registered subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.inner.lock().subscriptions.len()
    }
}

impl<S: NoteStore> CacheInner<S> {
    fn ensure_mirror(&mut self) -> StoreResult<&Vec<Note>> {
        if self.mirror.is_none() {
            let notes = self.store.get_all()?;
            debug!(
                "event=mirror_fill module=cache status=ok notes={}",
                notes.len()
            );
            self.mirror = Some(notes);
        }
        Ok(self.mirror.get_or_insert_with(Vec::new))
    }

    fn add(&mut self, title: &str, content: &str) -> StoreResult<Note> {
        let note = self.store.add(title, content)?;
        let mut appended = false;
        if let Some(mirror) = self.mirror.as_mut() {
            // Store order is insertion order, so the mirror appends at the end.
            mirror.push(note.clone());
            appended = true;
        }
        if appended {
            self.publish_where(|query| matches_normalized(&note, query));
        }
        Ok(note)
    }

    fn update(&mut self, id: NoteId, title: &str, content: &str) -> StoreResult<Note> {
        let updated = self.store.update(id, title, content)?;
        let mut previous = None;
        if let Some(mirror) = self.mirror.as_mut() {
            if let Some(slot) = mirror.iter_mut().find(|note| note.id == id) {
                previous = Some(std::mem::replace(slot, updated.clone()));
            }
        }
        if let Some(previous) = previous {
            // A note may start or stop matching a query, and a still-matching
            // note carries new field values either way.
            self.publish_where(|query| {
                matches_normalized(&previous, query) || matches_normalized(&updated, query)
            });
        }
        Ok(updated)
    }

    fn delete(&mut self, id: NoteId) -> StoreResult<()> {
        self.store.delete(id)?;
        let mut removed = None;
        if let Some(mirror) = self.mirror.as_mut() {
            if let Some(position) = mirror.iter().position(|note| note.id == id) {
                removed = Some(mirror.remove(position));
            }
        }
        if let Some(removed) = removed {
            self.publish_where(|query| matches_normalized(&removed, query));
        }
        Ok(())
    }

    /// Notifies every subscription whose normalized query satisfies
    /// `affected`, pushing a freshly filtered mirror snapshot to each.
    ///
    /// Runs under the cache lock, so all affected subscribers see the same
    /// post-commit state for this mutation.
    fn publish_where(&self, affected: impl Fn(&str) -> bool) {
        let Some(mirror) = self.mirror.as_ref() else {
            return;
        };

        let mut notified = 0usize;
        for subscription in self.subscriptions.iter() {
            if !affected(subscription.query()) {
                continue;
            }
            let results = filter_mirror(mirror, subscription.query());
            subscription.notify(&results);
            notified += 1;
        }

        if notified > 0 {
            debug!("event=publish module=cache status=ok subscribers={notified}");
        }
    }
}

fn filter_mirror(mirror: &[Note], normalized_query: &str) -> Vec<Note> {
    mirror
        .iter()
        .filter(|note| matches_normalized(note, normalized_query))
        .cloned()
        .collect()
}
