//! Note use-case service.
//!
//! # Responsibility
//! - Expose the five UI-facing operations: fetch-all, search, add, update,
//!   delete, plus subscribe/unsubscribe for live views.
//! - Normalize user input (trim surrounding whitespace) before persistence.
//!
//! # Invariants
//! - A failed add/update leaves the caller's input intact and retriable.
//! - Delete never reports "not found"; silent idempotency is preferred over
//!   surfacing a race with a concurrent delete.

use crate::cache::query_cache::QueryCache;
use crate::cache::subscription::{ResultCallback, SubscriptionId};
use crate::model::note::{Note, NoteId};
use crate::store::note_store::{NoteStore, StoreResult};

/// Service facade over the query cache.
///
/// Constructed once at app start with the store implementation and passed
/// down to every consumer; its lifetime bounds the cache and subscription
/// registry lifetimes.
pub struct NoteService<S: NoteStore> {
    cache: QueryCache<S>,
}

impl<S: NoteStore> NoteService<S> {
    /// Builds the service and its cache around a store implementation.
    pub fn new(store: S) -> Self {
        Self {
            cache: QueryCache::new(store),
        }
    }

    /// Returns all notes in stable insertion order.
    pub fn fetch_all(&self) -> StoreResult<Vec<Note>> {
        self.cache.fetch_all()
    }

    /// Returns notes whose title or content contains `query`,
    /// case-insensitively. A blank query returns everything.
    pub fn search(&self, query: &str) -> StoreResult<Vec<Note>> {
        self.cache.search(query)
    }

    /// Creates a note from trimmed title and content.
    pub fn add(&self, title: &str, content: &str) -> StoreResult<Note> {
        self.cache.add(title.trim(), content.trim())
    }

    /// Replaces title and content of an existing note.
    pub fn update(&self, id: NoteId, title: &str, content: &str) -> StoreResult<Note> {
        self.cache.update(id, title.trim(), content.trim())
    }

    /// Deletes a note; succeeds even when it was already gone.
    pub fn delete(&self, id: NoteId) -> StoreResult<()> {
        self.cache.delete(id)
    }

    /// Registers a live view for `query`; the callback receives the current
    /// result set immediately and an updated one after each affecting
    /// mutation.
    pub fn subscribe(&self, query: &str, callback: ResultCallback) -> StoreResult<SubscriptionId> {
        self.cache.subscribe(query, callback)
    }

    /// Detaches a live view. Returns whether the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.cache.unsubscribe(id)
    }
}
