use quicknotes_core::{
    IdStrategy, KeyValueStore, MemoryStore, Note, NoteId, NoteRepository, NoteStorage,
    SlotNoteRepository, DEFAULT_STORAGE_KEY,
};
use std::cell::Cell;

fn repo() -> SlotNoteRepository<MemoryStore> {
    SlotNoteRepository::new(NoteStorage::new(MemoryStore::new()))
}

fn texts(notes: &[Note]) -> Vec<&str> {
    notes.iter().map(|note| note.text.as_str()).collect()
}

#[test]
fn add_trims_input_and_persists_note() {
    let mut repo = repo();
    let notes = repo.add_note("   Buy milk  \n").unwrap();

    assert_eq!(texts(&notes), vec!["Buy milk"]);
    assert!(!notes[0].id.as_str().is_empty());
    assert!(notes[0].created_at > 0);
    assert_eq!(repo.list_notes(), notes);
}

#[test]
fn whitespace_only_add_is_a_noop_and_skips_save() {
    let mut repo = repo();
    repo.add_note("keep").unwrap();
    let before = repo.list_notes();

    assert!(repo.add_note(" \t\r\n ").is_none());
    assert!(repo.add_note("").is_none());
    assert_eq!(repo.list_notes(), before);

    let mut empty = repo_with_unavailable_store();
    assert!(empty.add_note("   ").is_none());
}

fn repo_with_unavailable_store() -> SlotNoteRepository<MemoryStore> {
    let mut store = MemoryStore::new();
    store.set_unavailable(true);
    SlotNoteRepository::new(NoteStorage::new(store))
}

#[test]
fn newer_notes_are_prepended() {
    let mut repo = repo();
    repo.add_note("A").unwrap();
    let notes = repo.add_note("B").unwrap();

    assert_eq!(texts(&notes), vec!["B", "A"]);
    assert_eq!(texts(&repo.list_notes()), vec!["B", "A"]);
}

#[test]
fn created_at_comes_from_injected_clock() {
    let tick = Cell::new(1_000_i64);
    let clock = || {
        let now = tick.get();
        tick.set(now + 1_000);
        now
    };
    let mut repo = SlotNoteRepository::with_clock(NoteStorage::new(MemoryStore::new()), clock);

    repo.add_note("first").unwrap();
    let notes = repo.add_note("second").unwrap();
    let stamps: Vec<i64> = notes.iter().map(|note| note.created_at).collect();
    assert_eq!(stamps, vec![2_000, 1_000]);
}

#[test]
fn delete_removes_only_matching_note() {
    let mut repo = repo();
    repo.add_note("A").unwrap();
    let notes = repo.add_note("B").unwrap();
    let b_id = notes[0].id.clone();

    let remaining = repo.delete_note(&b_id);
    assert_eq!(texts(&remaining), vec!["A"]);
    assert_eq!(repo.list_notes(), remaining);
}

#[test]
fn deleting_unknown_id_leaves_list_unchanged() {
    let mut repo = repo();
    repo.add_note("A").unwrap();
    repo.add_note("B").unwrap();
    let before = repo.list_notes();

    let after = repo.delete_note(&NoteId::new("does-not-exist"));
    assert_eq!(after, before);
    assert_eq!(repo.list_notes(), before);
}

#[test]
fn operations_reload_from_storage_every_time() {
    let mut repo = repo();
    repo.add_note("mine").unwrap();

    let external = vec![Note::with_parts(NoteId::new("ext"), "from elsewhere", 5)];
    let payload = serde_json::to_string(&external).unwrap();
    repo.storage_mut()
        .store_mut()
        .set(DEFAULT_STORAGE_KEY, &payload)
        .unwrap();

    let notes = repo.add_note("after").unwrap();
    assert_eq!(texts(&notes), vec!["after", "from elsewhere"]);
}

#[test]
fn failed_save_still_returns_in_memory_result() {
    let storage = NoteStorage::new(MemoryStore::with_quota(64));
    let mut repo = SlotNoteRepository::new(storage);

    let notes = repo.add_note(&"long text ".repeat(20)).unwrap();
    assert_eq!(notes.len(), 1);
    assert!(repo.list_notes().is_empty());
}

#[test]
fn timestamp_strategy_ids_stay_unique() {
    let storage = NoteStorage::new(MemoryStore::new()).with_id_strategy(IdStrategy::Timestamp);
    let mut repo = SlotNoteRepository::with_clock(storage, || 1_700_000_000_000_i64);

    for i in 0..50 {
        repo.add_note(&format!("note {i}")).unwrap();
    }
    let mut ids: Vec<NoteId> = repo.list_notes().into_iter().map(|note| note.id).collect();
    assert!(ids.iter().all(|id| id.as_str().starts_with("1700000000000-")));
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}
