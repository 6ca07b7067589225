//! Domain model for quick notes.
//!
//! # Responsibility
//! - Define the single `Note` entity persisted in the storage slot.
//! - Own identifier generation and input normalization rules.
//!
//! # Invariants
//! - Every stored note is identified by a `NoteId` unique within its list.
//! - Stored note text is trimmed and never empty.

pub mod note;
