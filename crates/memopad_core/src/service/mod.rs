//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate cache calls into the UI-facing note operations.
//! - Keep UI layers decoupled from storage and cache details.

pub mod note_service;
