//! Surface model: document + selection + undo history + read-only flag.
//!
//! A surface model may be shared (`Rc<RefCell<_>>`) by several surface
//! controllers. It owns the history; controllers observe it through the bus and
//! must unsubscribe when they are destroyed.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::bus::{Bus, BusReceiver};
use crate::core::event::ListenerId;

use super::document::{Document, DocumentError, DocumentId, Transaction};
use super::history::UndoStack;
use super::selection::{Position, Selection};

#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    Transact {
        document: DocumentId,
        has_content: bool,
    },
    Select(Selection),
    Focus,
    Blur,
    ReadOnly(bool),
}

pub type SharedSurfaceModel = Rc<RefCell<SurfaceModel>>;

pub struct SurfaceModel {
    document: Document,
    selection: Selection,
    history: UndoStack,
    read_only: bool,
    focused: bool,
    bus: Bus<ModelEvent>,
}

impl SurfaceModel {
    pub fn new(document: Document) -> Self {
        let read_only = document.is_read_only();
        Self {
            document,
            selection: Selection::Null,
            history: UndoStack::new(),
            read_only,
            focused: false,
            bus: Bus::new(),
        }
    }

    pub fn into_shared(self) -> SharedSurfaceModel {
        Rc::new(RefCell::new(self))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn subscribe(&mut self) -> (ListenerId, BusReceiver<ModelEvent>) {
        self.bus.subscribe()
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.bus.len()
    }

    /// Returns whether the flag changed.
    pub fn set_read_only(&mut self, read_only: bool) -> bool {
        if self.read_only == read_only {
            return false;
        }
        self.read_only = read_only;
        self.document.set_read_only(read_only);
        self.bus.publish(ModelEvent::ReadOnly(read_only));
        true
    }

    pub fn set_selection(&mut self, selection: Selection) {
        let selection = self.clamp_selection(selection);
        if selection == self.selection {
            return;
        }
        self.selection = selection;
        self.bus.publish(ModelEvent::Select(selection));
    }

    pub fn set_null_selection(&mut self) {
        self.set_selection(Selection::Null);
    }

    pub fn focus(&mut self) {
        if self.focused {
            return;
        }
        self.focused = true;
        self.bus.publish(ModelEvent::Focus);
    }

    pub fn blur(&mut self) {
        if !self.focused {
            return;
        }
        self.focused = false;
        self.bus.publish(ModelEvent::Blur);
    }

    /// Applies `transactions` as one undo step. All-or-nothing.
    pub fn change(
        &mut self,
        transactions: Vec<Transaction>,
        selection: Option<Selection>,
    ) -> Result<(), DocumentError> {
        if self.read_only {
            tracing::warn!(
                count = transactions.len(),
                "transaction rejected: surface model is read-only"
            );
            return Err(DocumentError::ReadOnly);
        }

        for (applied, tx) in transactions.iter().enumerate() {
            if let Err(error) = self.document.apply(tx) {
                for done in transactions[..applied].iter().rev() {
                    let _ = self.document.apply(&done.inverse());
                }
                tracing::warn!(%error, "transaction rejected");
                return Err(error);
            }
        }

        let changed = !transactions.is_empty();
        self.history.push(transactions);
        if changed {
            self.publish_transact();
        }
        if let Some(selection) = selection {
            self.set_selection(selection);
        } else if changed {
            let clamped = self.clamp_selection(self.selection);
            self.set_selection(clamped);
        }
        Ok(())
    }

    pub fn has_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn has_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        self.step_history(true)
    }

    pub fn redo(&mut self) -> bool {
        self.step_history(false)
    }

    fn step_history(&mut self, undo: bool) -> bool {
        if self.read_only {
            return false;
        }
        let result = if undo {
            self.history.undo(&mut self.document)
        } else {
            self.history.redo(&mut self.document)
        };
        match result {
            Ok(true) => {
                self.publish_transact();
                let clamped = self.clamp_selection(self.selection);
                self.set_selection(clamped);
                true
            }
            Ok(false) => false,
            Err(error) => {
                tracing::warn!(%error, undo, "history step failed");
                false
            }
        }
    }

    fn publish_transact(&mut self) {
        self.bus.publish(ModelEvent::Transact {
            document: self.document.id(),
            has_content: self.document.has_content(),
        });
    }

    fn clamp_position(&self, pos: Position) -> Option<Position> {
        let last = self.document.len().checked_sub(1)?;
        let node = pos.node.min(last);
        let len = self.document.node(node).map(|n| n.len_chars()).unwrap_or(0);
        Some(Position::new(node, pos.offset.min(len)))
    }

    /// Pulls a selection back inside the current document bounds.
    pub fn clamp_selection(&self, selection: Selection) -> Selection {
        match selection {
            Selection::Null => Selection::Null,
            Selection::Linear { anchor, focus } => {
                match (self.clamp_position(anchor), self.clamp_position(focus)) {
                    (Some(anchor), Some(focus)) => Selection::Linear { anchor, focus },
                    _ => Selection::Null,
                }
            }
            Selection::Node { node } => {
                if node < self.document.len() {
                    Selection::Node { node }
                } else {
                    Selection::Null
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/surface_model.rs"]
mod tests;
