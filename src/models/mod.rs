//! Data model layer

pub mod document;
pub mod history;
pub mod selection;
pub mod surface_model;

pub use document::{Document, DocumentError, DocumentId, Node, NodeKind, Transaction};
pub use history::UndoStack;
pub use selection::{Position, Selection, SelectionKind};
pub use surface_model::{ModelEvent, SharedSurfaceModel, SurfaceModel};
