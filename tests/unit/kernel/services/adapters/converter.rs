use super::*;

#[test]
fn parses_block_html() {
    let doc = HtmlConverter::new()
        .document_from_html("<h1>Title</h1><p class=\"x\">Hello <b>world</b> &amp; more</p>");
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.nodes()[0].kind, NodeKind::Heading(1));
    assert_eq!(doc.nodes()[1].text, "Hello world & more");
    assert!(doc.nodes()[1].marks.contains("bold"));
}

#[test]
fn bare_text_becomes_paragraph() {
    let doc = HtmlConverter::new().document_from_html("  just text ");
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.nodes()[0].text, "just text");
}

#[test]
fn empty_html_is_empty_document() {
    let doc = HtmlConverter::new().document_from_html("");
    assert!(doc.is_empty());
    assert!(!doc.has_content());
}

#[test]
fn source_lines_are_preformatted() {
    let doc = HtmlConverter::new().document_from_source("fn main() {\n}\n");
    assert_eq!(doc.len(), 2);
    assert!(doc.nodes().iter().all(|n| n.kind == NodeKind::Preformatted));
}

#[test]
fn html_round_trips_through_document() {
    let converter = HtmlConverter::new();
    let doc = converter.document_from_html("<p>a &lt; b</p>");
    assert_eq!(converter.html_from_document(&doc), "<p>a &lt; b</p>");
}
