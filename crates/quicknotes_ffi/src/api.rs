//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose add/delete/load note use-cases as sync calls.
//! - Return flat card view models; the host draws its own widgets.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Storage failures degrade to an empty or stale grid, never to an error.
//! - Every call reopens the slot store, so the store stays the single source
//!   of truth.

use log::{error, info};
use quicknotes_core::{
    card_views, core_version as core_version_inner, init_logging as init_logging_inner,
    open_repository, Note, NoteId, NoteRepository, NotesConfig, SlotNoteRepository, SqliteStore,
    EMPTY_NOTES_MESSAGE,
};
use std::path::PathBuf;
use std::sync::OnceLock;

static NOTES_CONFIG: OnceLock<NotesConfig> = OnceLock::new();

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Pins the storage file and date locale used by all later note calls.
///
/// # FFI contract
/// - Must run before the first note call to take effect.
/// - Repeating the same settings is accepted; different settings are rejected.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_notes(db_path: String, locale: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path cannot be empty".to_string();
    }

    let mut requested = base_config();
    requested.db_path = PathBuf::from(trimmed);
    if !locale.trim().is_empty() {
        requested.locale = locale.trim().to_string();
    }

    let active = NOTES_CONFIG.get_or_init(|| requested.clone());
    if active.db_path != requested.db_path || active.locale != requested.locale {
        return format!(
            "notes already configured at `{}` ({}); refusing to switch",
            active.db_path.display(),
            active.locale
        );
    }
    String::new()
}

/// One rendered note card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCardItem {
    /// Note id to pass back to `notes_delete`.
    pub id: String,
    /// Plain text; the host must not interpret it as markup.
    pub text: String,
    /// Locale-formatted creation date.
    pub date_label: String,
}

/// Grid state returned by every note call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesView {
    /// Cards newest first; empty when `empty_message` is set.
    pub cards: Vec<NoteCardItem>,
    /// Placeholder text to show instead of cards.
    pub empty_message: Option<String>,
    /// Id of the note created by this call, if any.
    pub added_id: Option<String>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Loads the grid for initial display.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_load() -> NotesView {
    with_repository("notes_load", |repo| (repo.list_notes(), "Loaded.".to_string()))
}

/// Adds a note from raw input; blank input leaves everything unchanged.
///
/// # FFI contract
/// - On success `added_id` is set and the host should clear and refocus its input.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_add(text: String) -> NotesView {
    let mut added_id = None;
    let mut view = with_repository("notes_add", |repo| match repo.add_note(&text) {
        Some(notes) => {
            added_id = notes.first().map(|note| note.id.to_string());
            (notes, "Note added.".to_string())
        }
        None => (repo.list_notes(), "Nothing to add.".to_string()),
    });
    view.added_id = added_id;
    view
}

/// Deletes a note by id; unknown ids are a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_delete(id: String) -> NotesView {
    let note_id = NoteId::new(id);
    with_repository("notes_delete", |repo| {
        (repo.delete_note(&note_id), "Note deleted.".to_string())
    })
}

fn base_config() -> NotesConfig {
    match NotesConfig::load(None) {
        Ok(config) => config,
        Err(err) => {
            error!(
                "event=config_load module=ffi status=error fallback=defaults error={}",
                err
            );
            NotesConfig::default()
        }
    }
}

fn active_config() -> &'static NotesConfig {
    NOTES_CONFIG.get_or_init(base_config)
}

fn with_repository(
    call: &str,
    f: impl FnOnce(&mut SlotNoteRepository<SqliteStore>) -> (Vec<Note>, String),
) -> NotesView {
    let config = active_config();
    let (notes, message) = match open_repository(config) {
        Ok(mut repo) => {
            let (notes, message) = f(&mut repo);
            info!("event={} module=ffi status=ok cards={}", call, notes.len());
            (notes, message)
        }
        Err(err) => {
            error!(
                "event={} module=ffi status=error error_code=store_open_failed error={}",
                call, err
            );
            (Vec::new(), format!("{call} failed: {err}"))
        }
    };
    to_view(&notes, config, message)
}

fn to_view(notes: &[Note], config: &NotesConfig, message: String) -> NotesView {
    let cards = card_views(notes, &config.date_format())
        .into_iter()
        .map(|card| NoteCardItem {
            id: card.id.to_string(),
            text: card.text,
            date_label: card.date_label,
        })
        .collect::<Vec<_>>();
    let empty_message = cards.is_empty().then(|| EMPTY_NOTES_MESSAGE.to_string());
    NotesView {
        cards,
        empty_message,
        added_id: None,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        configure_notes, core_version, init_logging, notes_add, notes_delete, notes_load,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    fn configure_test_storage() {
        let path = std::env::temp_dir().join(format!(
            "quicknotes-ffi-test-{}.sqlite3",
            std::process::id()
        ));
        let error = configure_notes(path.to_string_lossy().into_owned(), "en-US".to_string());
        assert!(error.is_empty(), "{error}");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn configure_rejects_empty_path_and_conflicting_switch() {
        configure_test_storage();
        configure_test_storage();
        assert!(!configure_notes("  ".to_string(), String::new()).is_empty());
        let conflict = configure_notes("/tmp/other-quicknotes.sqlite3".to_string(), String::new());
        assert!(conflict.contains("refusing to switch"));
    }

    #[test]
    fn add_then_delete_roundtrip() {
        configure_test_storage();
        let token = unique_token("ffi-add");

        let added = notes_add(format!("  {token}  "));
        let added_id = added.added_id.clone().unwrap();
        let card = added.cards.iter().find(|card| card.id == added_id).unwrap();
        assert_eq!(card.text, token);
        assert!(!card.date_label.is_empty());
        assert!(notes_load().cards.iter().any(|card| card.id == added_id));

        let after = notes_delete(added_id.clone());
        assert!(after.cards.iter().all(|card| card.id != added_id));
    }

    #[test]
    fn blank_add_reports_nothing_to_add() {
        configure_test_storage();
        let view = notes_add("   \n".to_string());
        assert!(view.added_id.is_none());
        assert_eq!(view.message, "Nothing to add.");
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
