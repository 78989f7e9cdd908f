//! Store layer: durable note persistence contracts and SQLite implementation.
//!
//! # Responsibility
//! - Define the source-of-truth CRUD contract for notes.
//! - Isolate SQL details from the cache and service layers.
//!
//! # Invariants
//! - The store is the only owner of persisted note records.
//! - Store APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod note_store;
