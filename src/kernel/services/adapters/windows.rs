use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::kernel::progress::ProgressDescriptor;
use crate::kernel::services::ports::{WindowData, WindowError, WindowHandle, WindowManager};

#[derive(Debug, Default)]
pub struct WindowLog {
    pub open: FxHashSet<String>,
    /// Names in the order they were opened.
    pub opened: Vec<String>,
    /// Descriptors handed over by progress windows, awaiting an answer.
    pub progress: Vec<ProgressDescriptor>,
    pub destroyed: bool,
    next_handle: u64,
}

/// Window manager without a UI: records what was opened and keeps progress
/// descriptors so the caller can resolve or cancel them.
#[derive(Debug, Clone, Default)]
pub struct HeadlessWindowManager {
    log: Rc<RefCell<WindowLog>>,
}

impl HeadlessWindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        self.log.borrow().opened.clone()
    }

    pub fn take_progress(&self) -> Vec<ProgressDescriptor> {
        std::mem::take(&mut self.log.borrow_mut().progress)
    }
}

impl WindowManager for HeadlessWindowManager {
    fn open_window(&mut self, name: &str, data: WindowData) -> Result<WindowHandle, WindowError> {
        let mut log = self.log.borrow_mut();
        if log.destroyed {
            return Err(WindowError::Destroyed);
        }
        if let WindowData::Progress(descriptors) = data {
            log.progress.extend(descriptors);
        }
        log.open.insert(name.to_string());
        log.opened.push(name.to_string());
        log.next_handle += 1;
        Ok(WindowHandle(log.next_handle))
    }

    fn close_window(&mut self, name: &str) -> bool {
        self.log.borrow_mut().open.remove(name)
    }

    fn is_open(&self, name: &str) -> bool {
        self.log.borrow().open.contains(name)
    }

    fn destroy(&mut self) {
        let mut log = self.log.borrow_mut();
        log.open.clear();
        log.progress.clear();
        log.destroyed = true;
    }

    fn is_destroyed(&self) -> bool {
        self.log.borrow().destroyed
    }
}
