//! Minimal UI node tree.
//!
//! Hosts map `Element`s to real widgets; `to_html` is provided for hosts
//! that consume markup directly.

use crate::model::note::NoteId;
use std::fmt::Write;

/// Interaction attached to an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Delete the note with this id.
    DeleteNote(NoteId),
}

/// A node in the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Plain text; escaped on serialization.
    Text(String),
}

/// An element with a tag, attributes, children and an optional click action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub class: Option<&'static str>,
    pub attributes: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
    pub on_click: Option<Action>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            class: None,
            attributes: Vec::new(),
            children: Vec::new(),
            on_click: None,
        }
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn on_click(mut self, action: Action) -> Self {
        self.on_click = Some(action);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// First descendant (depth-first, self included) carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        if self.class == Some(class) {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            Node::Element(element) => element.find_by_class(class),
            Node::Text(_) => None,
        })
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Self::Element(value)
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Serializes the subtree as HTML with text and attributes escaped.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_html(self, &mut out);
        out
    }

    /// Indented one-line-per-node outline, for terminals and debugging.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        write_outline(self, 0, &mut out);
        out
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => collect_text(&element.children, out),
        }
    }
}

fn write_html(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&escape_html(text)),
        Node::Element(element) => {
            out.push('<');
            out.push_str(element.tag);
            if let Some(class) = element.class {
                let _ = write!(out, " class=\"{}\"", escape_html(class));
            }
            for (name, value) in &element.attributes {
                let _ = write!(out, " {name}=\"{}\"", escape_html(value));
            }
            out.push('>');
            for child in &element.children {
                write_html(child, out);
            }
            let _ = write!(out, "</{}>", element.tag);
        }
    }
}

fn write_outline(node: &Node, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Text(text) => {
            let _ = writeln!(out, "{indent}{text:?}");
        }
        Node::Element(element) => {
            out.push_str(&indent);
            out.push_str(element.tag);
            if let Some(class) = element.class {
                out.push('.');
                out.push_str(class);
            }
            for (name, value) in &element.attributes {
                let _ = write!(out, " [{name}={value}]");
            }
            if let Some(Action::DeleteNote(id)) = &element.on_click {
                let _ = write!(out, " (click: delete {id})");
            }
            out.push('\n');
            for child in &element.children {
                write_outline(child, depth + 1, out);
            }
        }
    }
}

/// Escapes the five HTML-significant characters.
pub(crate) fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
