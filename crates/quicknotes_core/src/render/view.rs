//! Note list -> card tree rendering and render targets.

use super::date::DateFormat;
use super::node::{Action, Element, Node};
use crate::model::note::{Note, NoteId};
use log::debug;

/// Placeholder shown when there are no notes.
pub const EMPTY_NOTES_MESSAGE: &str = "No notes yet. Add your first note above!";
pub const CARD_CLASS: &str = "note-card";
pub const NOTE_TEXT_CLASS: &str = "note-text";
pub const NOTE_DATE_CLASS: &str = "note-date";
pub const DELETE_BUTTON_CLASS: &str = "delete-btn";
const ACTIONS_CLASS: &str = "note-actions";

/// Flat per-card view model for hosts drawing their own widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: NoteId,
    pub text: String,
    pub date_label: String,
}

/// Builds one `CardView` per note, preserving order.
pub fn card_views(notes: &[Note], date_format: &DateFormat) -> Vec<CardView> {
    notes
        .iter()
        .map(|note| CardView {
            id: note.id.clone(),
            text: note.text.clone(),
            date_label: date_format.format(note.created_at),
        })
        .collect()
}

/// Renders the note list into top-level nodes.
///
/// Empty input yields a single placeholder paragraph; otherwise one
/// `article.note-card` per note in the given order.
pub fn render_notes(notes: &[Note], date_format: &DateFormat) -> Vec<Node> {
    if notes.is_empty() {
        return vec![Element::new("p")
            .class(NOTE_DATE_CLASS)
            .text(EMPTY_NOTES_MESSAGE)
            .into()];
    }

    card_views(notes, date_format)
        .into_iter()
        .map(|card| Node::from(card_node(card)))
        .collect()
}

fn card_node(card: CardView) -> Element {
    let delete_button = Element::new("button")
        .class(DELETE_BUTTON_CLASS)
        .attr("type", "button")
        .text("Delete")
        .on_click(Action::DeleteNote(card.id.clone()));

    Element::new("article")
        .class(CARD_CLASS)
        .attr("data-id", card.id.as_str())
        .child(Element::new("div").class(NOTE_TEXT_CLASS).text(card.text))
        .child(
            Element::new("div")
                .class(ACTIONS_CLASS)
                .child(Element::new("span").class(NOTE_DATE_CLASS).text(card.date_label))
                .child(delete_button),
        )
}

/// Container that receives rendered nodes.
pub trait RenderTarget {
    /// Removes all previously rendered content.
    fn clear(&mut self);
    /// Appends one top-level node.
    fn append(&mut self, node: Node);
}

/// Renders note lists into a target, replacing its content each time.
pub struct Renderer<T: RenderTarget> {
    target: T,
    date_format: DateFormat,
}

impl<T: RenderTarget> Renderer<T> {
    pub fn new(target: T, date_format: DateFormat) -> Self {
        Self {
            target,
            date_format,
        }
    }

    /// Clears the target and renders `notes` into it.
    pub fn render(&mut self, notes: &[Note]) {
        self.target.clear();
        for node in render_notes(notes, &self.date_format) {
            self.target.append(node);
        }
        debug!("event=render module=render status=ok cards={}", notes.len());
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.date_format
    }
}

/// In-memory `RenderTarget` with lookup helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeContainer {
    children: Vec<Node>,
}

impl NodeContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Rendered note cards in display order.
    pub fn cards(&self) -> Vec<&Element> {
        self.children
            .iter()
            .filter_map(Node::as_element)
            .filter(|element| element.class == Some(CARD_CLASS))
            .collect()
    }

    /// Texts of the rendered cards in display order.
    pub fn card_texts(&self) -> Vec<String> {
        self.cards()
            .into_iter()
            .filter_map(|card| card.find_by_class(NOTE_TEXT_CLASS))
            .map(Element::text_content)
            .collect()
    }

    /// Date labels of the rendered cards in display order.
    pub fn card_dates(&self) -> Vec<String> {
        self.cards()
            .into_iter()
            .filter_map(|card| card.find_by_class(NOTE_DATE_CLASS))
            .map(Element::text_content)
            .collect()
    }

    /// Empty-state message, when the placeholder is shown.
    pub fn placeholder(&self) -> Option<String> {
        match self.children.as_slice() {
            [Node::Element(element)] if element.tag == "p" => Some(element.text_content()),
            _ => None,
        }
    }

    /// Click action of the delete control on the card for `id`.
    pub fn delete_action_for(&self, id: &NoteId) -> Option<&Action> {
        self.cards()
            .into_iter()
            .find(|card| card.attribute("data-id") == Some(id.as_str()))
            .and_then(|card| card.find_by_class(DELETE_BUTTON_CLASS))
            .and_then(|button| button.on_click.as_ref())
    }

    pub fn to_html(&self) -> String {
        self.children.iter().map(Node::to_html).collect()
    }
}

impl RenderTarget for NodeContainer {
    fn clear(&mut self) {
        self.children.clear();
    }

    fn append(&mut self, node: Node) {
        self.children.push(node);
    }
}

impl<T: RenderTarget + ?Sized> RenderTarget for &mut T {
    fn clear(&mut self) {
        (**self).clear();
    }

    fn append(&mut self, node: Node) {
        (**self).append(node);
    }
}
