//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical `Note` record and its JSON wire shape.
//! - Generate opaque note identifiers.
//! - Normalize raw user input into note text.
//!
//! # Invariants
//! - `id`, `text` and `created_at` never change after construction.
//! - `Note::from_input` never yields a note with blank text.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const FALLBACK_SUFFIX_LEN: usize = 6;
const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque note identifier.
///
/// Only used for lookup and deletion; never displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Wraps an existing identifier string (import paths, UI callbacks).
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh identifier using the given strategy.
    pub fn generate(strategy: IdStrategy, now_ms: i64) -> Self {
        match strategy {
            IdStrategy::Uuid => Self(Uuid::new_v4().to_string()),
            IdStrategy::Timestamp => Self(format!("{now_ms}-{}", random_base36_suffix())),
        }
    }

    /// Borrows the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// How new note identifiers are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Random UUID v4.
    #[default]
    Uuid,
    /// `<epoch_ms>-<6 base36 chars>`; unique within one local list only.
    Timestamp,
}

/// A user-authored text entry.
///
/// Serialized with `createdAt` to keep the persisted layout stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable id used for deletion.
    pub id: NoteId,
    /// Trimmed, non-empty note body.
    pub text: String,
    /// Creation time in epoch milliseconds.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Note {
    /// Builds a note from raw input, or `None` when the trimmed input is empty.
    ///
    /// # Invariants
    /// - The stored text is the trimmed input.
    /// - A fresh id is generated for every call.
    pub fn from_input(raw_text: &str, strategy: IdStrategy, now_ms: i64) -> Option<Self> {
        let text = normalize_note_text(raw_text)?;
        Some(Self {
            id: NoteId::generate(strategy, now_ms),
            text,
            created_at: now_ms,
        })
    }

    /// Creates a note from already-known parts.
    ///
    /// Used by load/import paths where identity exists already. Does not
    /// re-validate `text`.
    pub fn with_parts(id: NoteId, text: impl Into<String>, created_at: i64) -> Self {
        Self {
            id,
            text: text.into(),
            created_at,
        }
    }
}

/// Trims raw input; returns `None` for empty or whitespace-only text.
pub fn normalize_note_text(raw_text: &str) -> Option<String> {
    let trimmed = raw_text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Current wall-clock time in epoch milliseconds.
///
/// Clocks set before the epoch report `0`.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

fn random_base36_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..FALLBACK_SUFFIX_LEN)
        .map(|_| char::from(BASE36_DIGITS[rng.gen_range(0..BASE36_DIGITS.len())]))
        .collect()
}
