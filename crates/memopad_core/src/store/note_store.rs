//! Note store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide durable CRUD persistence over the canonical `notes` table.
//! - Assign stable ids at creation time.
//!
//! # Invariants
//! - `get_all` iterates in insertion order (SQLite rowid order).
//! - Mutations are single-statement atomic: a failed write leaves no partial
//!   record and an unchanged prior record.
//! - `delete` is idempotent; deleting an unknown id succeeds.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::note::{Note, NoteId};
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const NOTE_SELECT_SQL: &str = "SELECT id, title, content FROM notes";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error for note persistence operations.
#[derive(Debug)]
pub enum StoreError {
    /// The persistence medium cannot be opened or read.
    Unavailable(DbError),
    /// A single mutation failed; the prior record is unchanged and the
    /// caller may retry with the same input.
    WriteFailed(DbError),
    /// Update targeted an id the store does not know.
    NotFound(NoteId),
    /// A persisted row failed decoding.
    InvalidData(String),
    /// The connection has not been migrated to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// A required table is missing from the connected database.
    MissingRequiredTable(&'static str),
    /// A required column is missing from a known table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(err) => write!(f, "note storage unavailable: {err}"),
            Self::WriteFailed(err) => write!(f, "note write failed: {err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(err) | Self::WriteFailed(err) => Some(err),
            _ => None,
        }
    }
}

/// Source-of-truth contract for note persistence.
///
/// Each successful mutating call has durably committed before returning, so
/// a subsequent `get_all` (including after a process restart for file-backed
/// stores) reflects it.
pub trait NoteStore {
    /// Returns every note in stable insertion order.
    fn get_all(&self) -> StoreResult<Vec<Note>>;
    /// Persists a new note and returns it with its freshly assigned id.
    fn add(&self, title: &str, content: &str) -> StoreResult<Note>;
    /// Replaces title and content of an existing note; `id` is immutable.
    fn update(&self, id: NoteId, title: &str, content: &str) -> StoreResult<Note>;
    /// Removes a note. Succeeds even when `id` does not exist.
    fn delete(&self, id: NoteId) -> StoreResult<()>;
}

/// SQLite-backed note store owning a migrated connection.
pub struct SqliteNoteStore {
    conn: Connection,
}

impl SqliteNoteStore {
    /// Constructs a store from a migrated connection.
    ///
    /// Rejects connections whose schema has not been brought to the latest
    /// migration version, so callers cannot accidentally write into an
    /// unmigrated database.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        ensure_connection_ready(&conn)?;
        Ok(Self { conn })
    }
}

impl NoteStore for SqliteNoteStore {
    fn get_all(&self) -> StoreResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY rowid ASC;"))
            .map_err(unavailable)?;
        let mut rows = stmt.query([]).map_err(unavailable)?;
        let mut notes = Vec::new();

        while let Some(row) = rows.next().map_err(unavailable)? {
            let id_text: String = row.get("id").map_err(unavailable)?;
            notes.push(Note {
                id: parse_note_id(&id_text)?,
                title: row.get("title").map_err(unavailable)?,
                content: row.get("content").map_err(unavailable)?,
            });
        }

        Ok(notes)
    }

    fn add(&self, title: &str, content: &str) -> StoreResult<Note> {
        let note = Note::new(title, content);
        self.conn
            .execute(
                "INSERT INTO notes (id, title, content) VALUES (?1, ?2, ?3);",
                params![note.id.to_string(), note.title, note.content],
            )
            .map_err(write_failed)?;
        Ok(note)
    }

    fn update(&self, id: NoteId, title: &str, content: &str) -> StoreResult<Note> {
        let changed = self
            .conn
            .execute(
                "UPDATE notes SET title = ?2, content = ?3 WHERE id = ?1;",
                params![id.to_string(), title, content],
            )
            .map_err(write_failed)?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(Note::with_id(id, title, content))
    }

    fn delete(&self, id: NoteId) -> StoreResult<()> {
        // Idempotent by contract: a zero row count is still success.
        self.conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id.to_string()])
            .map_err(write_failed)?;
        Ok(())
    }
}

fn unavailable(err: rusqlite::Error) -> StoreError {
    StoreError::Unavailable(DbError::Sqlite(err))
}

fn write_failed(err: rusqlite::Error) -> StoreError {
    StoreError::WriteFailed(DbError::Sqlite(err))
}

fn parse_note_id(value: &str) -> StoreResult<NoteId> {
    Uuid::parse_str(value)
        .map_err(|_| StoreError::InvalidData(format!("invalid id value `{value}` in notes.id")))
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .map_err(unavailable)?;

    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "notes")? {
        return Err(StoreError::MissingRequiredTable("notes"));
    }

    for column in ["id", "title", "content"] {
        if !table_has_column(conn, "notes", column)? {
            return Err(StoreError::MissingRequiredColumn {
                table: "notes",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )
        .map_err(unavailable)?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table});"))
        .map_err(unavailable)?;
    let mut rows = stmt.query([]).map_err(unavailable)?;
    while let Some(row) = rows.next().map_err(unavailable)? {
        let current: String = row.get(1).map_err(unavailable)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
