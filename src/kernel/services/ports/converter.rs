use crate::models::Document;

/// DOM ↔ model conversion, owned by the host.
pub trait Converter {
    /// Visual mode: block-level HTML.
    fn document_from_html(&self, html: &str) -> Document;

    /// Source mode: plain text, one node per line.
    fn document_from_source(&self, source: &str) -> Document;

    fn html_from_document(&self, document: &Document) -> String {
        document.html()
    }
}
