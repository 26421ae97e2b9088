use super::*;
use crate::models::document::Node;

fn set_text(index: usize, before: &str, after: &str) -> Transaction {
    Transaction::SetText {
        index,
        before: before.to_string(),
        after: after.to_string(),
    }
}

#[test]
fn undo_and_redo_walk_the_batches() {
    let mut doc = Document::new(vec![Node::paragraph("a")]);
    let mut stack = UndoStack::new();

    let tx = set_text(0, "a", "ab");
    doc.apply(&tx).unwrap();
    stack.push(vec![tx]);

    assert!(stack.undo(&mut doc).unwrap());
    assert_eq!(doc.nodes()[0].text, "a");
    assert!(stack.can_redo());

    assert!(stack.redo(&mut doc).unwrap());
    assert_eq!(doc.nodes()[0].text, "ab");
    assert!(!stack.redo(&mut doc).unwrap());
}

#[test]
fn batch_is_undone_in_reverse_order() {
    let mut doc = Document::new(vec![Node::paragraph("a")]);
    let mut stack = UndoStack::new();

    let batch = vec![
        Transaction::InsertNode {
            index: 1,
            node: Node::paragraph("b"),
        },
        set_text(1, "b", "bc"),
    ];
    for tx in &batch {
        doc.apply(tx).unwrap();
    }
    stack.push(batch);

    stack.undo(&mut doc).unwrap();
    assert_eq!(doc.nodes(), &[Node::paragraph("a")]);
}

#[test]
fn new_batch_clears_redo() {
    let mut doc = Document::new(vec![Node::paragraph("a")]);
    let mut stack = UndoStack::new();
    let tx = set_text(0, "a", "b");
    doc.apply(&tx).unwrap();
    stack.push(vec![tx]);
    stack.undo(&mut doc).unwrap();

    stack.push(vec![set_text(0, "a", "c")]);
    assert!(!stack.can_redo());
}

#[test]
fn levels_are_capped() {
    let mut stack = UndoStack::with_max_levels(2);
    for i in 0..5 {
        stack.push(vec![set_text(0, &i.to_string(), &(i + 1).to_string())]);
    }
    let mut doc = Document::new(vec![Node::paragraph("5")]);
    assert!(stack.undo(&mut doc).unwrap());
    assert!(stack.undo(&mut doc).unwrap());
    assert!(!stack.undo(&mut doc).unwrap());
    assert_eq!(doc.nodes()[0].text, "3");
}

#[test]
fn failed_undo_keeps_batch() {
    let mut doc = Document::new(vec![Node::paragraph("a")]);
    let mut stack = UndoStack::new();
    stack.push(vec![set_text(0, "a", "b")]);
    doc.set_read_only(true);

    assert_eq!(stack.undo(&mut doc), Err(DocumentError::ReadOnly));
    assert!(stack.can_undo());
}
