use std::sync::OnceLock;

use regex::Regex;

use crate::kernel::services::ports::Converter;
use crate::models::{Document, Node, NodeKind};

fn block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<(p|h[1-6]|pre|div)(?:\s[^>]*)?>(.*?)</(?:p|h[1-6]|pre|div)>")
            .expect("block pattern compiles")
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern compiles"))
}

/// Block-level HTML and plain-text conversion without a DOM.
///
/// Only flat block markup is understood; inline `<b>`/`<strong>` and
/// `<i>`/`<em>` become whole-node marks.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlConverter;

impl HtmlConverter {
    pub fn new() -> Self {
        Self
    }
}

impl Converter for HtmlConverter {
    fn document_from_html(&self, html: &str) -> Document {
        let mut nodes = Vec::new();
        for caps in block_re().captures_iter(html) {
            let tag = &caps[1];
            let inner = &caps[2];
            let kind = NodeKind::from_tag(tag).unwrap_or(NodeKind::Paragraph);
            let text = unescape_html(&tag_re().replace_all(inner, ""));
            let mut node = Node::new(kind, text);
            if inner.contains("<b>") || inner.contains("<strong>") {
                node = node.with_mark("bold");
            }
            if inner.contains("<i>") || inner.contains("<em>") {
                node = node.with_mark("italic");
            }
            nodes.push(node);
        }

        if nodes.is_empty() && !html.trim().is_empty() {
            let text = unescape_html(tag_re().replace_all(html, "").trim());
            nodes.push(Node::paragraph(text));
        }
        Document::new(nodes)
    }

    fn document_from_source(&self, source: &str) -> Document {
        if source.is_empty() {
            return Document::empty();
        }
        Document::new(source.lines().map(Node::preformatted).collect())
    }
}

fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/converter.rs"]
mod tests;
