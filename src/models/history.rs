//! Undo history: batches of transactions, one batch per undo step.
//!
//! A new batch clears the redo stack. Stacks are capped at `max_levels`.

use super::document::{Document, DocumentError, Transaction};

pub const DEFAULT_MAX_LEVELS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionBatch {
    pub transactions: Vec<Transaction>,
}

#[derive(Debug)]
pub struct UndoStack {
    undo: Vec<TransactionBatch>,
    redo: Vec<TransactionBatch>,
    max_levels: usize,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_MAX_LEVELS)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            max_levels: max_levels.max(1),
        }
    }

    pub fn push(&mut self, transactions: Vec<Transaction>) {
        if transactions.is_empty() {
            return;
        }
        self.redo.clear();
        self.undo.push(TransactionBatch { transactions });
        if self.undo.len() > self.max_levels {
            self.undo.remove(0);
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Applies the inverse of the latest batch. `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self, doc: &mut Document) -> Result<bool, DocumentError> {
        let Some(batch) = self.undo.pop() else {
            return Ok(false);
        };
        for tx in batch.transactions.iter().rev() {
            if let Err(e) = doc.apply(&tx.inverse()) {
                self.undo.push(batch);
                return Err(e);
            }
        }
        self.redo.push(batch);
        Ok(true)
    }

    pub fn redo(&mut self, doc: &mut Document) -> Result<bool, DocumentError> {
        let Some(batch) = self.redo.pop() else {
            return Ok(false);
        };
        for tx in &batch.transactions {
            if let Err(e) = doc.apply(tx) {
                self.redo.push(batch);
                return Err(e);
            }
        }
        self.undo.push(batch);
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/history.rs"]
mod tests;
