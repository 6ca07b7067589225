//! Repository layer over the note storage slot.
//!
//! # Responsibility
//! - Expose add/delete/list use-cases for notes.
//! - Keep slot serialization details inside `storage`.
//!
//! # Invariants
//! - Every operation starts from freshly loaded slot state.
//! - No note list is cached between operations.

pub mod note_repo;
