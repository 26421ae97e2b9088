//! Service ports: traits + data contracts for external collaborators.

pub mod converter;
pub mod layout;
pub mod runtime;
pub mod settings;
pub mod toolbar;
pub mod windows;

pub use converter::Converter;
pub use layout::LayoutHost;
pub use runtime::{ready, LocalBoxFuture};
pub use settings::{
    SurfaceConfig, SurfaceMode, TargetConfig, ToolGroupConfig, ToolbarConfig, TriggerRule,
};
pub use toolbar::{Toolbar, ToolbarRole};
pub use windows::{WindowData, WindowError, WindowHandle, WindowManager};
