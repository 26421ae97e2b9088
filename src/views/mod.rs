//! View layer
//!
//! - SurfaceView: editable render tree mirroring the model
//! - Context: contextual menu bound to the selection

pub mod context;
pub mod surface_view;

pub use context::Context;
pub use surface_view::{PlaceholderElement, RenderedNode, SurfaceView, ViewEvent};
