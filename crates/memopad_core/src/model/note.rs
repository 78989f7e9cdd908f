//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record `{id, title, content}`.
//!
//! # Invariants
//! - `id` is store-assigned, stable and never reused for another note.
//! - Ordering is not carried on the record; the store preserves insertion
//!   order and every consumer relies on that order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier assigned by the store at creation time.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// Canonical persisted note record.
///
/// Both `title` and `content` may be empty. Whitespace trimming is the
/// caller's responsibility (the service layer trims before persistence).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable id used for update/delete targeting and list keying.
    pub id: NoteId,
    /// Short heading shown in list views.
    pub title: String,
    /// Free-form body text.
    pub content: String,
}

impl Note {
    /// Creates a note with a freshly generated id.
    ///
    /// Only the store should mint ids for persisted notes; this constructor
    /// exists so the store has a single place to do it.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, content)
    }

    /// Creates a note with a caller-provided id.
    ///
    /// Used by read paths that rebuild records from persisted rows.
    pub fn with_id(id: NoteId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
        }
    }
}
