use quicknotes_core::{
    card_views, render_notes, Action, DateFormat, DateStyle, Node, NodeContainer, Note, NoteId,
    Renderer, EMPTY_NOTES_MESSAGE,
};

fn utc() -> DateFormat {
    DateFormat::utc(DateStyle::MonthDayYear12h)
}

fn notes() -> Vec<Note> {
    vec![
        Note::with_parts(NoteId::new("n2"), "B", 1_700_000_060_000),
        Note::with_parts(NoteId::new("n1"), "A", 1_700_000_000_000),
    ]
}

#[test]
fn empty_list_renders_single_placeholder() {
    let nodes = render_notes(&[], &utc());
    assert_eq!(nodes.len(), 1);
    assert_eq!(
        nodes[0].to_html(),
        format!("<p class=\"note-date\">{EMPTY_NOTES_MESSAGE}</p>")
    );
}

#[test]
fn renders_one_card_per_note_in_order() {
    let mut renderer = Renderer::new(NodeContainer::new(), utc());
    renderer.render(&notes());

    let target = renderer.target();
    assert_eq!(target.cards().len(), 2);
    assert_eq!(target.card_texts(), vec!["B", "A"]);
    assert_eq!(
        target.card_dates(),
        vec!["11/14/2023, 10:14:20 PM", "11/14/2023, 10:13:20 PM"]
    );
    assert!(target.placeholder().is_none());
}

#[test]
fn card_markup_matches_expected_structure() {
    let nodes = render_notes(&notes()[1..], &utc());
    assert_eq!(
        nodes[0].to_html(),
        concat!(
            "<article class=\"note-card\" data-id=\"n1\">",
            "<div class=\"note-text\">A</div>",
            "<div class=\"note-actions\">",
            "<span class=\"note-date\">11/14/2023, 10:13:20 PM</span>",
            "<button class=\"delete-btn\" type=\"button\">Delete</button>",
            "</div>",
            "</article>"
        )
    );
}

#[test]
fn note_text_is_never_interpreted_as_markup() {
    let hostile = vec![Note::with_parts(
        NoteId::new("x"),
        "<img src=x onerror=alert(1)>",
        0,
    )];
    let nodes = render_notes(&hostile, &utc());

    let card = nodes[0].as_element().unwrap();
    let text = card.find_by_class("note-text").unwrap();
    assert_eq!(
        text.children,
        vec![Node::Text("<img src=x onerror=alert(1)>".to_string())]
    );
    assert!(nodes[0]
        .to_html()
        .contains("&lt;img src=x onerror=alert(1)&gt;"));
}

#[test]
fn delete_control_carries_note_id_action() {
    let mut renderer = Renderer::new(NodeContainer::new(), utc());
    renderer.render(&notes());

    assert_eq!(
        renderer.target().delete_action_for(&NoteId::new("n1")),
        Some(&Action::DeleteNote(NoteId::new("n1")))
    );
    assert!(renderer
        .target()
        .delete_action_for(&NoteId::new("zzz"))
        .is_none());
}

#[test]
fn rendering_twice_replaces_instead_of_appending() {
    let mut renderer = Renderer::new(NodeContainer::new(), utc());
    renderer.render(&notes());
    let first = renderer.target().clone();
    renderer.render(&notes());

    assert_eq!(renderer.target(), &first);
    assert_eq!(renderer.target().cards().len(), 2);

    renderer.render(&[]);
    assert_eq!(
        renderer.target().placeholder().as_deref(),
        Some(EMPTY_NOTES_MESSAGE)
    );
    assert!(renderer.target().cards().is_empty());
}

#[test]
fn card_views_expose_flat_labels() {
    let views = card_views(&notes(), &utc());
    assert_eq!(views.len(), 2);
    assert_eq!(views[1].id, NoteId::new("n1"));
    assert_eq!(views[1].text, "A");
    assert_eq!(views[1].date_label, "11/14/2023, 10:13:20 PM");
}
