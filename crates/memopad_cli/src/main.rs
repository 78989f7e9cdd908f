//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `memopad_core` wiring: open a
//!   store, run the add/list/search/delete flow, print deterministic output.

use memopad_core::db::{open_db, open_db_in_memory};
use memopad_core::{NoteService, SqliteNoteStore, StoreError};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("memopad smoke failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), StoreError> {
    println!("memopad_core version={}", memopad_core::core_version());

    if let Ok(log_dir) = std::env::var("MEMOPAD_LOG_DIR") {
        if let Err(err) = memopad_core::init_logging(memopad_core::default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let conn = match std::env::var("MEMOPAD_DB_PATH") {
        Ok(path) if !path.trim().is_empty() => {
            open_db(path.trim()).map_err(StoreError::Unavailable)?
        }
        _ => open_db_in_memory().map_err(StoreError::Unavailable)?,
    };
    let service = NoteService::new(SqliteNoteStore::try_new(conn)?);

    let groceries = service.add("Groceries", "milk, eggs")?;
    service.add("Travel", "pack hiking boots")?;

    for note in service.fetch_all()? {
        println!("note id={} title={}", note.id, note.title);
    }
    for hit in service.search("egg")? {
        println!("hit id={} title={}", hit.id, hit.title);
    }

    service.delete(groceries.id)?;
    println!("notes after delete={}", service.fetch_all()?.len());

    Ok(())
}
