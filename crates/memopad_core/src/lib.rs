//! Core note data layer for Memopad.
//! This crate is the single source of truth for note persistence and the
//! query/cache consistency invariants the UI relies on.

pub mod cache;
pub mod db;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod store;

pub use cache::query_cache::QueryCache;
pub use cache::subscription::{ResultCallback, SubscriptionId};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId};
pub use search::substring::{filter_notes, matches};
pub use service::note_service::NoteService;
pub use store::note_store::{NoteStore, SqliteNoteStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
