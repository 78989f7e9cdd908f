//! Query cache layer: in-memory mirror, substring queries, subscriptions.
//!
//! # Responsibility
//! - Serve reads from a mirror of store contents.
//! - Apply mutations write-through (store first, mirror second).
//! - Republish result sets to live subscribers after each commit.
//!
//! # Invariants
//! - The mirror is derived state; it may be dropped and rebuilt from the
//!   store at any time without information loss.
//! - A failed store mutation never touches the mirror.

pub mod query_cache;
pub mod subscription;
