use super::*;

#[test]
fn ids_are_unique() {
    assert_ne!(Document::empty().id(), Document::empty().id());
}

#[test]
fn has_content_tracks_text_bearing_nodes() {
    let mut doc = Document::new(vec![Node::paragraph("")]);
    assert!(!doc.has_content());

    doc.apply(&Transaction::SetText {
        index: 0,
        before: String::new(),
        after: "x".to_string(),
    })
    .unwrap();
    assert!(doc.has_content());
}

#[test]
fn inverse_restores_previous_state() {
    let mut doc = Document::new(vec![Node::paragraph("a")]);
    let tx = Transaction::InsertNode {
        index: 1,
        node: Node::heading(2, "b"),
    };
    doc.apply(&tx).unwrap();
    assert_eq!(doc.len(), 2);

    doc.apply(&tx.inverse()).unwrap();
    assert_eq!(doc.nodes(), &[Node::paragraph("a")]);
}

#[test]
fn out_of_range_is_rejected() {
    let mut doc = Document::empty();
    let err = doc
        .apply(&Transaction::RemoveNode {
            index: 0,
            node: Node::paragraph(""),
        })
        .unwrap_err();
    assert_eq!(err, DocumentError::OutOfRange { index: 0, len: 0 });
}

#[test]
fn read_only_document_refuses_transactions() {
    let mut doc = Document::new(vec![Node::paragraph("a")]);
    doc.set_read_only(true);
    let err = doc
        .apply(&Transaction::SetText {
            index: 0,
            before: "a".to_string(),
            after: "b".to_string(),
        })
        .unwrap_err();
    assert_eq!(err, DocumentError::ReadOnly);
    assert_eq!(doc.nodes()[0].text, "a");
}

#[test]
fn html_escapes_and_wraps_marks() {
    let doc = Document::new(vec![
        Node::heading(1, "Title"),
        Node::paragraph("a < b").with_mark("bold"),
    ]);
    assert_eq!(doc.html(), "<h1>Title</h1><p><b>a &lt; b</b></p>");
}

#[test]
fn node_kind_tag_round_trip() {
    assert_eq!(NodeKind::from_tag("H3"), Some(NodeKind::Heading(3)));
    assert_eq!(NodeKind::from_tag("h7"), None);
    assert_eq!(NodeKind::from_tag("pre"), Some(NodeKind::Preformatted));
}

#[test]
fn char_to_byte_handles_multibyte() {
    assert_eq!(char_to_byte("héllo", 2), 3);
    assert_eq!(char_to_byte("abc", 10), 3);
}
