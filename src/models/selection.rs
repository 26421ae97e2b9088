//! Selection model: null, native linear range, or a virtual node selection.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub node: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(node: usize, offset: usize) -> Self {
        Self { node, offset }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionKind {
    Null,
    Linear,
    Node,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Null,
    /// Browser-managed caret or text range.
    Linear { anchor: Position, focus: Position },
    /// Synthetic selection of a whole node, drawn by overlays.
    Node { node: usize },
}

impl Selection {
    pub fn caret(node: usize, offset: usize) -> Self {
        let pos = Position::new(node, offset);
        Self::Linear {
            anchor: pos,
            focus: pos,
        }
    }

    pub fn range(anchor: Position, focus: Position) -> Self {
        Self::Linear { anchor, focus }
    }

    pub fn kind(&self) -> SelectionKind {
        match self {
            Selection::Null => SelectionKind::Null,
            Selection::Linear { .. } => SelectionKind::Linear,
            Selection::Node { .. } => SelectionKind::Node,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Selection::Null)
    }

    pub fn is_native_cursor(&self) -> bool {
        matches!(self, Selection::Linear { .. })
    }

    pub fn is_collapsed(&self) -> bool {
        match self {
            Selection::Null => true,
            Selection::Linear { anchor, focus } => anchor == focus,
            Selection::Node { .. } => false,
        }
    }

    pub fn focus(&self) -> Option<Position> {
        match *self {
            Selection::Null => None,
            Selection::Linear { focus, .. } => Some(focus),
            Selection::Node { node } => Some(Position::new(node, 0)),
        }
    }

    /// Ordered `(start, end)` of a linear selection.
    pub fn bounds(&self) -> Option<(Position, Position)> {
        match *self {
            Selection::Linear { anchor, focus } => Some((anchor.min(focus), anchor.max(focus))),
            _ => None,
        }
    }

    pub fn covered_nodes(&self) -> Option<RangeInclusive<usize>> {
        match *self {
            Selection::Null => None,
            Selection::Linear { anchor, focus } => {
                let (a, b) = (anchor.node, focus.node);
                Some(a.min(b)..=a.max(b))
            }
            Selection::Node { node } => Some(node..=node),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/selection.rs"]
mod tests;
