//! Application layer: targets embedding surfaces.

pub mod target;

pub use target::{KeyScope, Target, TargetError, TargetState, ToolbarFactory};
