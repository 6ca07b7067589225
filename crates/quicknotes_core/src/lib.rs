//! Core logic for QuickNotes.
//! This crate is the single source of truth for note lifecycle invariants.

pub mod config;
pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod storage;

pub use config::{ConfigError, NotesConfig};
pub use controller::{InputField, KeyChord, NotesController, Outcome, UiEvent};
pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogSink, LoggingError,
};
pub use model::note::{IdStrategy, Note, NoteId};
pub use render::{
    card_views, render_notes, Action, CardView, DateFormat, DateStyle, Element, Node,
    NodeContainer, RenderTarget, Renderer, EMPTY_NOTES_MESSAGE, NOTE_DATE_CLASS, NOTE_TEXT_CLASS,
};
pub use repo::note_repo::{Clock, NoteRepository, SlotNoteRepository, SystemClock};
pub use storage::{
    KeyValueStore, LoadError, MemoryStore, NoteStorage, SaveError, SqliteStore, StoreError,
    DEFAULT_STORAGE_KEY,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Opens the configured SQLite slot store and wraps it in a repository.
pub fn open_repository(
    config: &NotesConfig,
) -> Result<SlotNoteRepository<SqliteStore>, StoreError> {
    let store = SqliteStore::open(&config.db_path)?;
    let storage =
        NoteStorage::with_key(store, config.storage_key.clone()).with_id_strategy(config.id_strategy);
    Ok(SlotNoteRepository::new(storage))
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
