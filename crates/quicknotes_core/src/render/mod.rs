//! Rendering of the note list into a UI node tree.
//!
//! # Responsibility
//! - Turn a note list into cards (or an empty-state placeholder).
//! - Format creation timestamps for display.
//! - Push rendered nodes into a replaceable `RenderTarget`.
//!
//! # Invariants
//! - Rendering is a full replace; the same list always yields the same tree.
//! - Note text is carried as text nodes and never parsed as markup.

mod date;
mod node;
mod view;

pub use date::{DateFormat, DateStyle, INVALID_DATE_LABEL};
pub use node::{Action, Element, Node};
pub use view::{
    card_views, render_notes, CardView, NodeContainer, RenderTarget, Renderer, CARD_CLASS,
    DELETE_BUTTON_CLASS, EMPTY_NOTES_MESSAGE, NOTE_DATE_CLASS, NOTE_TEXT_CLASS,
};
