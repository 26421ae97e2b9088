//! Editing kernel: surface controller, actions, progress and host services.

pub mod action;
pub mod progress;
pub mod scroll;
pub mod sequence;
pub mod services;
pub mod surface;

pub use action::{Action, ActionFactory, ActionResult};
pub use progress::{ProgressBar, ProgressDescriptor, ProgressError, ProgressReceiver};
pub use sequence::{Sequence, SequenceRegistry};
pub use surface::{
    Executable, Lifecycle, Surface, SurfaceDeps, SurfaceEvent, SurfaceHost, SurfaceId,
    SurfaceInput,
};
