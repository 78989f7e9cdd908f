use memopad_core::db::migrations::latest_version;
use memopad_core::db::{open_db, open_db_in_memory};
use memopad_core::{NoteStore, SqliteNoteStore, StoreError};
use rusqlite::Connection;
use uuid::Uuid;

fn memory_store() -> SqliteNoteStore {
    let conn = open_db_in_memory().unwrap();
    SqliteNoteStore::try_new(conn).unwrap()
}

#[test]
fn add_then_get_all_roundtrip() {
    let store = memory_store();

    let note = store.add("Groceries", "milk, eggs").unwrap();

    let all = store.get_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, note.id);
    assert_eq!(all[0].title, "Groceries");
    assert_eq!(all[0].content, "milk, eggs");
}

#[test]
fn get_all_on_empty_store_returns_empty_sequence() {
    let store = memory_store();
    assert!(store.get_all().unwrap().is_empty());
}

#[test]
fn get_all_preserves_insertion_order() {
    let store = memory_store();

    let first = store.add("first", "").unwrap();
    let second = store.add("second", "").unwrap();
    let third = store.add("third", "").unwrap();

    let ids: Vec<_> = store.get_all().unwrap().into_iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);
}

#[test]
fn add_assigns_distinct_ids() {
    let store = memory_store();

    let a = store.add("a", "").unwrap();
    let b = store.add("b", "").unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn update_replaces_fields_in_place() {
    let store = memory_store();

    let note = store.add("X", "Y").unwrap();
    let updated = store.update(note.id, "X2", "Y2").unwrap();
    assert_eq!(updated.id, note.id);

    let all = store.get_all().unwrap();
    assert_eq!(all.len(), 1, "update must not create a second entry");
    assert_eq!(all[0].title, "X2");
    assert_eq!(all[0].content, "Y2");
}

#[test]
fn update_unknown_id_returns_not_found() {
    let store = memory_store();

    let missing = Uuid::new_v4();
    let err = store.update(missing, "t", "c").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == missing));
}

#[test]
fn delete_is_idempotent() {
    let store = memory_store();

    let note = store.add("gone soon", "").unwrap();
    store.delete(note.id).unwrap();
    store.delete(note.id).unwrap();

    assert!(store.get_all().unwrap().is_empty());
}

#[test]
fn delete_unknown_id_is_a_no_op() {
    let store = memory_store();
    store.add("keep", "").unwrap();

    store.delete(Uuid::new_v4()).unwrap();
    assert_eq!(store.get_all().unwrap().len(), 1);
}

#[test]
fn committed_writes_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("notes.sqlite3");

    let note = {
        let conn = open_db(&db_path).unwrap();
        let store = SqliteNoteStore::try_new(conn).unwrap();
        store.add("durable", "still here").unwrap()
    };

    let conn = open_db(&db_path).unwrap();
    let store = SqliteNoteStore::try_new(conn).unwrap();
    let all = store.get_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, note.id);
    assert_eq!(all[0].content, "still here");
}

#[test]
fn store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteNoteStore::try_new(conn) {
        Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn store_rejects_connection_without_notes_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteNoteStore::try_new(conn),
        Err(StoreError::MissingRequiredTable("notes"))
    ));
}

#[test]
fn store_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE notes (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL DEFAULT ''
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteNoteStore::try_new(conn),
        Err(StoreError::MissingRequiredColumn {
            table: "notes",
            column: "content"
        })
    ));
}
