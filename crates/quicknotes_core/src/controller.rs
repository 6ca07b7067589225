//! Event wiring between the input field, the repository and the renderer.
//!
//! # Responsibility
//! - Map add/delete triggers to repository operations.
//! - Re-render from the list each operation returns.
//! - Own the input field state (value + focus).
//!
//! # Invariants
//! - Every successful operation is followed by exactly one full render.
//! - A blank add leaves input, storage and rendered tree untouched.

use crate::model::note::NoteId;
use crate::render::{Action, RenderTarget, Renderer};
use crate::repo::note_repo::NoteRepository;
use log::debug;

/// A key press with modifier state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            meta: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Ctrl+Enter or Cmd(meta)+Enter, key name case-insensitive.
    pub fn is_submit(&self) -> bool {
        (self.ctrl || self.meta) && self.key.eq_ignore_ascii_case("enter")
    }
}

/// Input events delivered by the host UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The text input's value changed.
    InputChanged(String),
    InputFocused,
    InputBlurred,
    /// The "Add" button was activated.
    AddClicked,
    /// A key was pressed while the text input had focus (if it does).
    KeyDown(KeyChord),
    /// The delete control of a card was activated.
    DeleteClicked(NoteId),
}

impl From<Action> for UiEvent {
    fn from(value: Action) -> Self {
        match value {
            Action::DeleteNote(id) => Self::DeleteClicked(id),
        }
    }
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Initial render.
    Mounted { cards: usize },
    /// A note was created and the grid re-rendered.
    Added { id: NoteId, cards: usize },
    /// A delete ran (possibly matching nothing) and the grid re-rendered.
    Deleted { cards: usize },
    /// Only input state changed, or nothing at all.
    Ignored,
}

/// Text input state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    value: String,
    focused: bool,
}

impl InputField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

/// Wires UI events to a `NoteRepository` and a `Renderer`.
pub struct NotesController<R: NoteRepository, T: RenderTarget> {
    repo: R,
    renderer: Renderer<T>,
    input: InputField,
}

impl<R: NoteRepository, T: RenderTarget> NotesController<R, T> {
    pub fn new(repo: R, renderer: Renderer<T>) -> Self {
        Self {
            repo,
            renderer,
            input: InputField::default(),
        }
    }

    /// Loads once and renders the starting state.
    pub fn mount(&mut self) -> Outcome {
        let notes = self.repo.list_notes();
        self.renderer.render(&notes);
        debug!(
            "event=controller_mount module=controller status=ok cards={}",
            notes.len()
        );
        Outcome::Mounted { cards: notes.len() }
    }

    pub fn handle(&mut self, event: UiEvent) -> Outcome {
        match event {
            UiEvent::InputChanged(value) => {
                self.input.value = value;
                Outcome::Ignored
            }
            UiEvent::InputFocused => {
                self.input.focused = true;
                Outcome::Ignored
            }
            UiEvent::InputBlurred => {
                self.input.focused = false;
                Outcome::Ignored
            }
            UiEvent::AddClicked => self.submit(),
            UiEvent::KeyDown(chord) if self.input.focused && chord.is_submit() => self.submit(),
            UiEvent::KeyDown(_) => Outcome::Ignored,
            UiEvent::DeleteClicked(id) => self.delete(&id),
        }
    }

    /// Convenience for hosts: set the input value, then press "Add".
    pub fn add_text(&mut self, text: impl Into<String>) -> Outcome {
        self.handle(UiEvent::InputChanged(text.into()));
        self.handle(UiEvent::AddClicked)
    }

    pub fn input(&self) -> &InputField {
        &self.input
    }

    pub fn renderer(&self) -> &Renderer<T> {
        &self.renderer
    }

    pub fn target(&self) -> &T {
        self.renderer.target()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repo
    }

    fn submit(&mut self) -> Outcome {
        let Some(notes) = self.repo.add_note(&self.input.value) else {
            return Outcome::Ignored;
        };
        let Some(id) = notes.first().map(|note| note.id.clone()) else {
            return Outcome::Ignored;
        };
        self.input.value.clear();
        self.renderer.render(&notes);
        self.input.focused = true;
        Outcome::Added {
            id,
            cards: notes.len(),
        }
    }

    fn delete(&mut self, id: &NoteId) -> Outcome {
        let notes = self.repo.delete_note(id);
        self.renderer.render(&notes);
        Outcome::Deleted { cards: notes.len() }
    }
}
