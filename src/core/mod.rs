//! Core primitives shared by the kernel and the app layer:
//! - Event / Bus: synchronous listeners and fan-out channels
//! - Trigger / Command: key chords and the commands they run
//! - Geometry / Platform: layout and host facts
//! - Instances: registry of live targets

pub mod bus;
pub mod command;
pub mod debounce;
pub mod event;
pub mod geometry;
pub mod instances;
pub mod platform;
pub mod trigger;

pub use command::{Command, CommandRegistry};
pub use event::{Emitter, ListenerId};
pub use instances::{InstanceRegistry, TargetId};
pub use trigger::{Trigger, TriggerDef, TriggerListener, TriggerRegistry};
