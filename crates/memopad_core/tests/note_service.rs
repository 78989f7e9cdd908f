use memopad_core::db::open_db_in_memory;
use memopad_core::{NoteService, SqliteNoteStore, StoreError};
use std::sync::Arc;
use std::thread;
use uuid::Uuid;

fn memory_service() -> NoteService<SqliteNoteStore> {
    let conn = open_db_in_memory().unwrap();
    NoteService::new(SqliteNoteStore::try_new(conn).unwrap())
}

#[test]
fn add_trims_surrounding_whitespace_before_persistence() {
    let service = memory_service();

    let note = service.add("  Groceries \n", "\t milk, eggs  ").unwrap();
    assert_eq!(note.title, "Groceries");
    assert_eq!(note.content, "milk, eggs");

    let all = service.fetch_all().unwrap();
    assert_eq!(all[0].title, "Groceries");
    assert_eq!(all[0].content, "milk, eggs");
}

#[test]
fn update_trims_surrounding_whitespace_before_persistence() {
    let service = memory_service();

    let note = service.add("draft", "body").unwrap();
    let updated = service.update(note.id, " Final ", " body two ").unwrap();
    assert_eq!(updated.title, "Final");
    assert_eq!(updated.content, "body two");
}

#[test]
fn empty_title_and_content_are_allowed() {
    let service = memory_service();

    let note = service.add("", "").unwrap();
    assert!(note.title.is_empty());
    assert!(note.content.is_empty());
    assert_eq!(service.fetch_all().unwrap().len(), 1);
}

#[test]
fn add_then_fetch_and_search_scenario() {
    let service = memory_service();

    let note = service.add("Groceries", "milk, eggs").unwrap();

    let all = service.fetch_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, note.id);
    assert_eq!(all[0].title, "Groceries");
    assert_eq!(all[0].content, "milk, eggs");

    let hits = service.search("egg").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, note.id);

    assert!(service.search("bread").unwrap().is_empty());
}

#[test]
fn update_replaces_rather_than_duplicates() {
    let service = memory_service();

    let note = service.add("X", "Y").unwrap();
    service.update(note.id, "X2", "Y2").unwrap();

    let all = service.fetch_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, note.id);
    assert_eq!(all[0].title, "X2");
    assert_eq!(all[0].content, "Y2");
}

#[test]
fn double_delete_both_succeed_and_store_ends_empty() {
    let service = memory_service();

    let note = service.add("temp", "").unwrap();
    service.delete(note.id).unwrap();
    service.delete(note.id).unwrap();

    assert!(service.fetch_all().unwrap().is_empty());
}

#[test]
fn update_unknown_id_surfaces_not_found() {
    let service = memory_service();

    let err = service.update(Uuid::new_v4(), "t", "c").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn subscription_passthrough_reaches_the_cache() {
    let service = memory_service();
    service.add("seed", "note").unwrap();

    let seen = Arc::new(std::sync::Mutex::new(0usize));
    let seen_in_callback = Arc::clone(&seen);
    let id = service
        .subscribe(
            "",
            Box::new(move |notes| *seen_in_callback.lock().unwrap() = notes.len()),
        )
        .unwrap();

    service.add("second", "note").unwrap();
    assert_eq!(*seen.lock().unwrap(), 2);

    assert!(service.unsubscribe(id));
}

#[test]
fn concurrent_adds_serialize_without_loss() {
    let service = Arc::new(memory_service());

    let mut handles = Vec::new();
    for worker in 0..8 {
        let service = Arc::clone(&service);
        handles.push(thread::spawn(move || {
            for i in 0..5 {
                service
                    .add(&format!("note-{worker}-{i}"), "body")
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(service.fetch_all().unwrap().len(), 40);
}
