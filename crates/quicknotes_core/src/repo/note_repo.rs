//! Note repository contract and slot-backed implementation.
//!
//! # Responsibility
//! - Create notes from raw input and prepend them to the persisted list.
//! - Delete notes by id.
//!
//! # Invariants
//! - Mutations are load -> mutate -> save against the storage slot.
//! - New notes are prepended (newest first).
//! - Blank input and unknown ids are silent no-ops.

use crate::model::note::{normalize_note_text, now_epoch_ms, IdStrategy, Note, NoteId};
use crate::storage::{KeyValueStore, NoteStorage};
use log::{debug, info};

/// Time source for `created_at` stamps.
pub trait Clock {
    /// Current time in epoch milliseconds.
    fn now_ms(&self) -> i64;
}

/// Wall-clock `Clock`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        now_epoch_ms()
    }
}

impl<F: Fn() -> i64> Clock for F {
    fn now_ms(&self) -> i64 {
        self()
    }
}

/// Repository interface for note use-cases.
pub trait NoteRepository {
    /// Returns the persisted list, newest first.
    fn list_notes(&mut self) -> Vec<Note>;
    /// Adds a note from raw input.
    ///
    /// Returns `None` without touching storage when the trimmed input is
    /// empty, otherwise the full list after the note was prepended.
    fn add_note(&mut self, raw_text: &str) -> Option<Vec<Note>>;
    /// Removes the note with `id` and returns the full resulting list.
    fn delete_note(&mut self, id: &NoteId) -> Vec<Note>;
}

/// `NoteRepository` backed by a single storage slot.
pub struct SlotNoteRepository<S: KeyValueStore, C: Clock = SystemClock> {
    storage: NoteStorage<S>,
    clock: C,
}

impl<S: KeyValueStore> SlotNoteRepository<S> {
    pub fn new(storage: NoteStorage<S>) -> Self {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> SlotNoteRepository<S, C> {
    pub fn with_clock(storage: NoteStorage<S>, clock: C) -> Self {
        Self { storage, clock }
    }

    pub fn storage(&self) -> &NoteStorage<S> {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut NoteStorage<S> {
        &mut self.storage
    }

    pub fn into_storage(self) -> NoteStorage<S> {
        self.storage
    }

    fn new_note(&self, raw_text: &str, existing: &[Note]) -> Option<Note> {
        let strategy: IdStrategy = self.storage.id_strategy();
        let mut note = Note::from_input(raw_text, strategy, self.clock.now_ms())?;
        while existing.iter().any(|current| current.id == note.id) {
            note.id = NoteId::generate(strategy, note.created_at);
        }
        Some(note)
    }
}

impl<S: KeyValueStore, C: Clock> NoteRepository for SlotNoteRepository<S, C> {
    fn list_notes(&mut self) -> Vec<Note> {
        self.storage.load()
    }

    fn add_note(&mut self, raw_text: &str) -> Option<Vec<Note>> {
        if normalize_note_text(raw_text).is_none() {
            debug!("event=note_add module=repo status=ignored reason=blank_input");
            return None;
        }

        let mut notes = self.storage.load();
        let note = self.new_note(raw_text, &notes)?;
        info!(
            "event=note_add module=repo status=ok text_bytes={} count={}",
            note.text.len(),
            notes.len() + 1
        );
        notes.insert(0, note);
        self.storage.save(&notes);
        Some(notes)
    }

    fn delete_note(&mut self, id: &NoteId) -> Vec<Note> {
        let mut notes = self.storage.load();
        let before = notes.len();
        notes.retain(|note| &note.id != id);
        let removed = before - notes.len();
        info!(
            "event=note_delete module=repo status={} removed={} count={}",
            if removed == 0 { "noop" } else { "ok" },
            removed,
            notes.len()
        );
        self.storage.save(&notes);
        notes
    }
}
