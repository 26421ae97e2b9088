use crate::kernel::progress::ProgressDescriptor;

#[derive(Debug)]
pub enum WindowData {
    None,
    Value(serde_json::Value),
    Progress(Vec<ProgressDescriptor>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    #[error("window manager has been destroyed")]
    Destroyed,
    #[error("unknown window `{0}`")]
    Unknown(String),
}

/// Dialog / window management contract.
pub trait WindowManager {
    fn open_window(&mut self, name: &str, data: WindowData) -> Result<WindowHandle, WindowError>;

    fn close_window(&mut self, name: &str) -> bool;

    fn is_open(&self, name: &str) -> bool;

    fn destroy(&mut self);

    fn is_destroyed(&self) -> bool;
}
