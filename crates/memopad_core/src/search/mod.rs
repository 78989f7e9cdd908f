//! Substring search entry points.
//!
//! # Responsibility
//! - Expose the pure matching predicate the cache evaluates against its
//!   mirror.
//! - Keep result shaping (order preservation) inside core.

pub mod substring;
