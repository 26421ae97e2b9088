//! Structured document content: an ordered list of block nodes.
//!
//! Mutation goes exclusively through `Transaction`s so that every change has
//! an inverse and can be recorded in the undo stack.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(u64);

impl DocumentId {
    fn next() -> Self {
        Self(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Paragraph,
    Heading(u8),
    Preformatted,
}

impl NodeKind {
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Paragraph => "p",
            NodeKind::Heading(1) => "h1",
            NodeKind::Heading(2) => "h2",
            NodeKind::Heading(3) => "h3",
            NodeKind::Heading(4) => "h4",
            NodeKind::Heading(5) => "h5",
            NodeKind::Heading(_) => "h6",
            NodeKind::Preformatted => "pre",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.to_ascii_lowercase();
        match tag.as_str() {
            "p" | "div" => Some(NodeKind::Paragraph),
            "pre" => Some(NodeKind::Preformatted),
            _ => {
                let level = tag.strip_prefix('h')?.parse::<u8>().ok()?;
                (1..=6).contains(&level).then_some(NodeKind::Heading(level))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub text: String,
    pub marks: BTreeSet<CompactString>,
}

impl Node {
    pub fn new(kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            marks: BTreeSet::new(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Paragraph, text)
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::new(NodeKind::Heading(level.clamp(1, 6)), text)
    }

    pub fn preformatted(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Preformatted, text)
    }

    pub fn with_mark(mut self, mark: &str) -> Self {
        self.marks.insert(mark.into());
        self
    }

    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn has_content(&self) -> bool {
        !self.text.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    InsertNode {
        index: usize,
        node: Node,
    },
    RemoveNode {
        index: usize,
        node: Node,
    },
    SetText {
        index: usize,
        before: String,
        after: String,
    },
    SetKind {
        index: usize,
        before: NodeKind,
        after: NodeKind,
    },
    SetMarks {
        index: usize,
        before: BTreeSet<CompactString>,
        after: BTreeSet<CompactString>,
    },
}

impl Transaction {
    pub fn inverse(&self) -> Self {
        match self.clone() {
            Transaction::InsertNode { index, node } => Transaction::RemoveNode { index, node },
            Transaction::RemoveNode { index, node } => Transaction::InsertNode { index, node },
            Transaction::SetText {
                index,
                before,
                after,
            } => Transaction::SetText {
                index,
                before: after,
                after: before,
            },
            Transaction::SetKind {
                index,
                before,
                after,
            } => Transaction::SetKind {
                index,
                before: after,
                after: before,
            },
            Transaction::SetMarks {
                index,
                before,
                after,
            } => Transaction::SetMarks {
                index,
                before: after,
                after: before,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("document is read-only")]
    ReadOnly,
    #[error("node index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    nodes: Vec<Node>,
    read_only: bool,
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            id: DocumentId::next(),
            nodes,
            read_only: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True when at least one node carries text.
    pub fn has_content(&self) -> bool {
        self.nodes.iter().any(Node::has_content)
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn apply(&mut self, tx: &Transaction) -> Result<(), DocumentError> {
        if self.read_only {
            return Err(DocumentError::ReadOnly);
        }
        let len = self.nodes.len();
        let out_of_range = |index: usize| DocumentError::OutOfRange { index, len };

        match tx {
            Transaction::InsertNode { index, node } => {
                if *index > len {
                    return Err(out_of_range(*index));
                }
                self.nodes.insert(*index, node.clone());
            }
            Transaction::RemoveNode { index, .. } => {
                if *index >= len {
                    return Err(out_of_range(*index));
                }
                self.nodes.remove(*index);
            }
            Transaction::SetText { index, after, .. } => {
                let node = self.nodes.get_mut(*index).ok_or(out_of_range(*index))?;
                node.text.clone_from(after);
            }
            Transaction::SetKind { index, after, .. } => {
                let node = self.nodes.get_mut(*index).ok_or(out_of_range(*index))?;
                node.kind = *after;
            }
            Transaction::SetMarks { index, after, .. } => {
                let node = self.nodes.get_mut(*index).ok_or(out_of_range(*index))?;
                node.marks.clone_from(after);
            }
        }
        Ok(())
    }

    pub fn html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            let tag = node.kind.tag();
            out.push('<');
            out.push_str(tag);
            out.push('>');
            let mut closers = Vec::new();
            for mark in &node.marks {
                let (open, close) = mark_tags(mark);
                out.push_str(&open);
                closers.push(close);
            }
            out.push_str(&escape_html(&node.text));
            for close in closers.iter().rev() {
                out.push_str(close);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        out
    }

    pub fn text(&self) -> String {
        self.nodes
            .iter()
            .map(|n| n.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

fn mark_tags(mark: &str) -> (String, String) {
    match mark {
        "bold" => ("<b>".to_string(), "</b>".to_string()),
        "italic" => ("<i>".to_string(), "</i>".to_string()),
        other => (
            format!("<span class=\"mark-{other}\">"),
            "</span>".to_string(),
        ),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Byte index of the `offset`-th char, clamped to the end of `text`.
pub fn char_to_byte(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

#[cfg(test)]
#[path = "../../tests/unit/models/document.rs"]
mod tests;
