//! Note persistence adapter.
//!
//! # Responsibility
//! - Serialize the whole note list into one storage slot and back.
//! - Absorb read/write failures so UI flows never see storage errors.
//!
//! # Invariants
//! - `load` returns an empty list for a missing, unreadable or malformed slot.
//! - Entries without a string `text` are dropped; the rest keep their order.
//! - Entries without a string `id` get one generated id, written back once so
//!   later loads see the same id.
//! - A failed `save` leaves the previously persisted value in place.

use super::{KeyValueStore, StoreError};
use crate::model::note::{now_epoch_ms, IdStrategy, Note, NoteId};
use log::{debug, error, info, warn};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key used when no other key is configured.
///
/// The version suffix changes whenever the persisted layout does.
pub const DEFAULT_STORAGE_KEY: &str = "quicknotes.notes.v1";

/// Why a slot could not be turned into a note list.
#[derive(Debug)]
pub enum LoadError {
    Store(StoreError),
    Malformed(serde_json::Error),
    NotAList,
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Malformed(err) => write!(f, "malformed notes payload: {err}"),
            Self::NotAList => write!(f, "notes payload is not a JSON array"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Malformed(err) => Some(err),
            Self::NotAList => None,
        }
    }
}

impl From<StoreError> for LoadError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value)
    }
}

/// Why a note list could not be written to its slot.
#[derive(Debug)]
pub enum SaveError {
    Encode(serde_json::Error),
    Store(StoreError),
}

impl Display for SaveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SaveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for SaveError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Reads and writes the full note list under a single slot key.
pub struct NoteStorage<S: KeyValueStore> {
    store: S,
    key: String,
    id_strategy: IdStrategy,
}

impl<S: KeyValueStore> NoteStorage<S> {
    /// Uses `DEFAULT_STORAGE_KEY`.
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            id_strategy: IdStrategy::default(),
        }
    }

    /// Strategy used to repair entries persisted without an id.
    pub fn with_id_strategy(mut self, id_strategy: IdStrategy) -> Self {
        self.id_strategy = id_strategy;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn id_strategy(&self) -> IdStrategy {
        self.id_strategy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Loads the note list, falling back to an empty list on any failure.
    ///
    /// # Side effects
    /// - Emits a `notes_load` error event when the slot cannot be decoded.
    /// - Persists repaired ids, see `try_load`.
    pub fn load(&mut self) -> Vec<Note> {
        match self.try_load() {
            Ok(notes) => notes,
            Err(err) => {
                error!(
                    "event=notes_load module=storage status=error key={} error={}",
                    self.key, err
                );
                Vec::new()
            }
        }
    }

    /// Loads the note list, reporting why the slot could not be decoded.
    ///
    /// An absent or empty slot is not an error. When any entry had to be given
    /// an id, the repaired list is saved back so the id survives the next load.
    /// A failed write-back is logged and the decoded list is still returned.
    pub fn try_load(&mut self) -> Result<Vec<Note>, LoadError> {
        let raw = match self.store.get(&self.key)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                debug!(
                    "event=notes_load module=storage status=empty key={}",
                    self.key
                );
                return Ok(Vec::new());
            }
        };

        let Value::Array(entries) = serde_json::from_str::<Value>(&raw)? else {
            return Err(LoadError::NotAList);
        };

        let total = entries.len();
        let mut repaired = 0usize;
        let notes: Vec<Note> = entries
            .into_iter()
            .filter_map(|entry| self.decode_entry(entry, &mut repaired))
            .collect();
        if notes.len() != total {
            warn!(
                "event=notes_load module=storage status=partial key={} dropped={} kept={}",
                self.key,
                total - notes.len(),
                notes.len()
            );
        }
        if repaired > 0 {
            self.persist_repairs(&notes, repaired);
        }
        debug!(
            "event=notes_load module=storage status=ok key={} count={}",
            self.key,
            notes.len()
        );
        Ok(notes)
    }

    /// Saves the full list; returns whether the slot now holds `notes`.
    ///
    /// # Side effects
    /// - Emits a `notes_save` error event on failure; prior state is kept.
    pub fn save(&mut self, notes: &[Note]) -> bool {
        match self.try_save(notes) {
            Ok(()) => true,
            Err(err) => {
                error!(
                    "event=notes_save module=storage status=error key={} count={} error={}",
                    self.key,
                    notes.len(),
                    err
                );
                false
            }
        }
    }

    /// Saves the full list, reporting encode or backend failures.
    pub fn try_save(&mut self, notes: &[Note]) -> Result<(), SaveError> {
        let payload = serde_json::to_string(notes).map_err(SaveError::Encode)?;
        self.store.set(&self.key, &payload)?;
        debug!(
            "event=notes_save module=storage status=ok key={} count={} bytes={}",
            self.key,
            notes.len(),
            payload.len()
        );
        Ok(())
    }

    fn persist_repairs(&mut self, notes: &[Note], repaired: usize) {
        match self.try_save(notes) {
            Ok(()) => info!(
                "event=notes_repair module=storage status=ok key={} repaired={}",
                self.key, repaired
            ),
            Err(err) => error!(
                "event=notes_repair module=storage status=error key={} repaired={} error={}",
                self.key, repaired, err
            ),
        }
    }

    fn decode_entry(&self, entry: Value, repaired: &mut usize) -> Option<Note> {
        let Value::Object(mut fields) = entry else {
            return None;
        };
        let Some(Value::String(text)) = fields.remove("text") else {
            return None;
        };
        let created_at = decode_created_at(&fields);
        let id = match fields.remove("id") {
            Some(Value::String(id)) => NoteId::new(id),
            _ => {
                warn!(
                    "event=notes_load module=storage status=repaired key={} field=id",
                    self.key
                );
                *repaired += 1;
                NoteId::generate(self.id_strategy, now_epoch_ms())
            }
        };
        Some(Note::with_parts(id, text, created_at))
    }
}

fn decode_created_at(fields: &Map<String, Value>) -> i64 {
    match fields.get("createdAt") {
        Some(Value::Number(number)) => number.as_i64().unwrap_or_else(|| {
            number
                .as_f64()
                .filter(|value| value.is_finite())
                .map_or(0, |value| value as i64)
        }),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteStorage, DEFAULT_STORAGE_KEY};
    use crate::storage::MemoryStore;

    fn storage_with(raw: &str) -> NoteStorage<MemoryStore> {
        let mut store = MemoryStore::new();
        store.insert_raw(DEFAULT_STORAGE_KEY, raw);
        NoteStorage::new(store)
    }

    #[test]
    fn entry_without_id_gets_fresh_id() {
        let mut storage = storage_with(r#"[{"text":"orphan","createdAt":5}]"#);
        let notes = storage.load();
        assert_eq!(notes.len(), 1);
        assert!(!notes[0].id.as_str().is_empty());
        assert_eq!(notes[0].created_at, 5);
    }

    #[test]
    fn repaired_id_is_written_back_and_stable() {
        let mut storage = storage_with(
            r#"[{"text":"orphan","createdAt":5},{"id":"k","text":"kept","createdAt":3}]"#,
        );
        let first = storage.load();
        let second = storage.load();
        assert_eq!(first, second);

        let raw = storage.store().raw(DEFAULT_STORAGE_KEY).expect("slot");
        assert!(raw.contains(first[0].id.as_str()));
        assert!(raw.contains(r#""id":"k""#));
    }

    #[test]
    fn repair_write_failure_still_returns_notes() {
        let mut store = MemoryStore::with_quota(8);
        store.insert_raw(DEFAULT_STORAGE_KEY, r#"[{"text":"orphan","createdAt":5}]"#);
        let mut storage = NoteStorage::new(store);

        let notes = storage.load();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].text, "orphan");
        assert_eq!(
            storage.store().raw(DEFAULT_STORAGE_KEY),
            Some(r#"[{"text":"orphan","createdAt":5}]"#)
        );
    }

    #[test]
    fn missing_or_fractional_created_at_is_coerced() {
        let mut storage = storage_with(
            r#"[{"id":"a","text":"x"},{"id":"b","text":"y","createdAt":12.9},{"id":"c","text":"z","createdAt":"soon"}]"#,
        );
        let stamps: Vec<i64> = storage.load().iter().map(|n| n.created_at).collect();
        assert_eq!(stamps, vec![0, 12, 0]);
    }

    #[test]
    fn empty_slot_value_is_treated_as_absent() {
        let mut storage = storage_with("");
        assert!(storage.try_load().unwrap().is_empty());
    }
}
