//! Domain model for the note data layer.
//!
//! # Responsibility
//! - Define the canonical note record persisted by the store.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Notes never exist outside the store except as derived cache copies.

pub mod note;
