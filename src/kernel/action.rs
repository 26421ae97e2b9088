//! Actions: named groups of surface operations, resolved through a table.
//!
//! `ActionFactory` maps an action name to its capability descriptor (the set
//! of supported method names plus a constructor). Dispatch validates the
//! method against the descriptor before anything is built.

use compact_str::CompactString;
use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::Value;

use crate::kernel::services::ports::WindowData;
use crate::kernel::surface::{Surface, SurfaceEvent};
use crate::models::document::char_to_byte;
use crate::models::{NodeKind, Position, Selection, SurfaceModel, Transaction};

/// `None` means the method returned nothing and counts as success.
pub type ActionResult = Option<bool>;

pub trait Action {
    fn invoke(&mut self, surface: &mut Surface, method: &str, args: &[Value]) -> ActionResult;
}

pub type ActionConstructor = fn(source: &str) -> Box<dyn Action>;

pub struct ActionDescriptor {
    methods: FxHashSet<CompactString>,
    constructor: ActionConstructor,
}

impl ActionDescriptor {
    pub fn supports(&self, method: &str) -> bool {
        self.methods.contains(method)
    }
}

#[derive(Default)]
pub struct ActionFactory {
    actions: FxHashMap<CompactString, ActionDescriptor>,
}

impl ActionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut factory = Self::new();
        factory.register("history", &["undo", "redo"], HistoryAction::create);
        factory.register(
            "content",
            &["insert", "remove", "selectAll", "break"],
            ContentAction::create,
        );
        factory.register("annotation", &["toggle", "clear"], AnnotationAction::create);
        factory.register("format", &["convert"], FormatAction::create);
        factory.register("window", &["open", "close", "toggle"], WindowAction::create);
        factory
    }

    pub fn register(&mut self, name: &str, methods: &[&str], constructor: ActionConstructor) {
        self.actions.insert(
            name.into(),
            ActionDescriptor {
                methods: methods.iter().map(|m| CompactString::from(*m)).collect(),
                constructor,
            },
        );
    }

    pub fn lookup(&self, name: &str) -> Option<&ActionDescriptor> {
        self.actions.get(name)
    }

    pub fn does_action_support_method(&self, name: &str, method: &str) -> bool {
        self.lookup(name).is_some_and(|d| d.supports(method))
    }

    pub fn create(&self, name: &str, source: &str) -> Option<Box<dyn Action>> {
        self.lookup(name).map(|d| (d.constructor)(source))
    }
}

fn arg_str(args: &[Value], index: usize) -> Option<&str> {
    args.get(index).and_then(Value::as_str)
}

fn arg_u64(args: &[Value], index: usize) -> Option<u64> {
    args.get(index).and_then(Value::as_u64)
}

struct HistoryAction {
    source: CompactString,
}

impl HistoryAction {
    fn create(source: &str) -> Box<dyn Action> {
        Box::new(Self {
            source: source.into(),
        })
    }
}

impl Action for HistoryAction {
    fn invoke(&mut self, surface: &mut Surface, method: &str, _args: &[Value]) -> ActionResult {
        let model = surface.model().clone();
        let mut model = model.borrow_mut();
        let done = match method {
            "undo" => model.undo(),
            "redo" => model.redo(),
            _ => return Some(false),
        };
        tracing::debug!(method, done, source = %self.source, "history action");
        Some(done)
    }
}

/// Transactions replacing the current selection with `text`, plus the caret after it.
pub fn replace_selection(model: &SurfaceModel, text: &str) -> Option<(Vec<Transaction>, Selection)> {
    let doc = model.document();
    if doc.is_empty() {
        let node = crate::models::Node::paragraph(text);
        let caret = Selection::caret(0, node.len_chars());
        return Some((vec![Transaction::InsertNode { index: 0, node }], caret));
    }

    let (start, end) = match model.selection() {
        Selection::Null => return None,
        Selection::Linear { .. } => model.selection().bounds()?,
        Selection::Node { node } => {
            let len = doc.node(node)?.len_chars();
            (Position::new(node, 0), Position::new(node, len))
        }
    };

    let start_node = doc.node(start.node)?;
    let end_node = doc.node(end.node)?;
    let prefix = &start_node.text[..char_to_byte(&start_node.text, start.offset)];
    let suffix = &end_node.text[char_to_byte(&end_node.text, end.offset)..];
    let after = format!("{prefix}{text}{suffix}");

    let mut transactions = Vec::new();
    for index in (start.node + 1..=end.node).rev() {
        transactions.push(Transaction::RemoveNode {
            index,
            node: doc.node(index)?.clone(),
        });
    }
    if after != start_node.text {
        transactions.push(Transaction::SetText {
            index: start.node,
            before: start_node.text.clone(),
            after,
        });
    }

    let caret = Selection::caret(start.node, start.offset + text.chars().count());
    Some((transactions, caret))
}

struct ContentAction {
    source: CompactString,
}

impl ContentAction {
    fn create(source: &str) -> Box<dyn Action> {
        Box::new(Self {
            source: source.into(),
        })
    }

    fn insert(&self, surface: &mut Surface, text: &str) -> bool {
        let model = surface.model().clone();
        let mut model = model.borrow_mut();
        let Some((transactions, caret)) = replace_selection(&model, text) else {
            return false;
        };
        model.change(transactions, Some(caret)).is_ok()
    }

    fn split(&self, surface: &mut Surface) -> bool {
        if !surface.is_multiline() {
            surface.emit(SurfaceEvent::Submit);
            return true;
        }

        let model = surface.model().clone();
        let mut model = model.borrow_mut();
        let Some((mut transactions, caret)) = replace_selection(&model, "") else {
            return false;
        };
        let Some(Position { node, offset }) = caret.focus() else {
            return false;
        };

        // Split against the text as it will be once the selection is removed.
        let current = match transactions.last() {
            Some(Transaction::SetText { after, .. }) => after.clone(),
            _ => match model.document().node(node) {
                Some(n) => n.text.clone(),
                None => String::new(),
            },
        };
        let kind = model
            .document()
            .node(node)
            .map(|n| n.kind)
            .unwrap_or(NodeKind::Paragraph);
        let split_at = char_to_byte(&current, offset);
        let (head, tail) = current.split_at(split_at);

        if let Some(Transaction::SetText { .. }) = transactions.last() {
            transactions.pop();
        }
        let before = model
            .document()
            .node(node)
            .map(|n| n.text.clone())
            .unwrap_or_default();
        if head != before {
            transactions.push(Transaction::SetText {
                index: node,
                before,
                after: head.to_string(),
            });
        }
        let tail_kind = match kind {
            NodeKind::Heading(_) => NodeKind::Paragraph,
            other => other,
        };
        transactions.push(Transaction::InsertNode {
            index: node + 1,
            node: crate::models::Node::new(tail_kind, tail),
        });
        model
            .change(transactions, Some(Selection::caret(node + 1, 0)))
            .is_ok()
    }
}

impl Action for ContentAction {
    fn invoke(&mut self, surface: &mut Surface, method: &str, args: &[Value]) -> ActionResult {
        tracing::debug!(method, source = %self.source, "content action");
        match method {
            "insert" => Some(self.insert(surface, arg_str(args, 0).unwrap_or_default())),
            "remove" => Some(self.insert(surface, "")),
            "selectAll" => {
                let model = surface.model().clone();
                let mut model = model.borrow_mut();
                let doc = model.document();
                let Some(last) = doc.len().checked_sub(1) else {
                    return Some(false);
                };
                let end = doc.node(last).map(|n| n.len_chars()).unwrap_or(0);
                model.set_selection(Selection::range(
                    Position::new(0, 0),
                    Position::new(last, end),
                ));
                None
            }
            "break" => Some(self.split(surface)),
            _ => Some(false),
        }
    }
}

struct AnnotationAction {
    source: CompactString,
}

impl AnnotationAction {
    fn create(source: &str) -> Box<dyn Action> {
        Box::new(Self {
            source: source.into(),
        })
    }
}

impl Action for AnnotationAction {
    fn invoke(&mut self, surface: &mut Surface, method: &str, args: &[Value]) -> ActionResult {
        let model = surface.model().clone();
        let mut model = model.borrow_mut();
        let selection = model.selection();
        let Some(range) = selection.covered_nodes().filter(|_| !selection.is_collapsed()) else {
            return Some(false);
        };

        let doc = model.document();
        let nodes: Vec<_> = range
            .filter_map(|i| doc.node(i).map(|n| (i, n.marks.clone())))
            .collect();

        let transactions: Vec<Transaction> = match method {
            "toggle" => {
                let Some(name) = arg_str(args, 0).map(CompactString::from) else {
                    return Some(false);
                };
                let all_marked = nodes.iter().all(|(_, marks)| marks.contains(&name));
                nodes
                    .into_iter()
                    .map(|(index, before)| {
                        let mut after = before.clone();
                        if all_marked {
                            after.remove(&name);
                        } else {
                            after.insert(name.clone());
                        }
                        Transaction::SetMarks {
                            index,
                            before,
                            after,
                        }
                    })
                    .collect()
            }
            "clear" => nodes
                .into_iter()
                .filter(|(_, marks)| !marks.is_empty())
                .map(|(index, before)| Transaction::SetMarks {
                    index,
                    before,
                    after: Default::default(),
                })
                .collect(),
            _ => return Some(false),
        };

        tracing::debug!(method, source = %self.source, count = transactions.len(), "annotation action");
        Some(model.change(transactions, None).is_ok())
    }
}

struct FormatAction {
    source: CompactString,
}

impl FormatAction {
    fn create(source: &str) -> Box<dyn Action> {
        Box::new(Self {
            source: source.into(),
        })
    }
}

impl Action for FormatAction {
    fn invoke(&mut self, surface: &mut Surface, method: &str, args: &[Value]) -> ActionResult {
        if method != "convert" {
            return Some(false);
        }
        let kind = match arg_str(args, 0).unwrap_or_default() {
            "paragraph" => NodeKind::Paragraph,
            "preformatted" => NodeKind::Preformatted,
            "heading" => NodeKind::Heading(arg_u64(args, 1).unwrap_or(1).clamp(1, 6) as u8),
            other => {
                tracing::debug!(kind = other, "unknown format");
                return Some(false);
            }
        };

        let model = surface.model().clone();
        let mut model = model.borrow_mut();
        let Some(range) = model.selection().covered_nodes() else {
            return Some(false);
        };
        let transactions: Vec<Transaction> = range
            .filter_map(|index| {
                let node = model.document().node(index)?;
                (node.kind != kind).then_some(Transaction::SetKind {
                    index,
                    before: node.kind,
                    after: kind,
                })
            })
            .collect();
        tracing::debug!(source = %self.source, ?kind, "format action");
        Some(model.change(transactions, None).is_ok())
    }
}

struct WindowAction {
    source: CompactString,
}

impl WindowAction {
    fn create(source: &str) -> Box<dyn Action> {
        Box::new(Self {
            source: source.into(),
        })
    }
}

impl Action for WindowAction {
    fn invoke(&mut self, surface: &mut Surface, method: &str, args: &[Value]) -> ActionResult {
        let Some(name) = arg_str(args, 0) else {
            return Some(false);
        };
        let data = args.get(1).cloned().map_or(WindowData::None, WindowData::Value);
        let dialogs = surface.dialogs_mut();
        tracing::debug!(method, window = name, source = %self.source, "window action");
        match method {
            "open" => Some(dialogs.open_window(name, data).is_ok()),
            "close" => Some(dialogs.close_window(name)),
            "toggle" => {
                if dialogs.is_open(name) {
                    Some(dialogs.close_window(name))
                } else {
                    Some(dialogs.open_window(name, data).is_ok())
                }
            }
            _ => Some(false),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/action.rs"]
mod tests;
