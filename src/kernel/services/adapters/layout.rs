use std::cell::RefCell;
use std::rc::Rc;

use crate::core::geometry::Rect;
use crate::kernel::services::ports::LayoutHost;
use crate::models::Selection;

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    pub surface_rect: Option<Rect>,
    pub focus_rect: Option<Rect>,
    pub viewport: Rect,
    pub scroll_top: f64,
    pub keyboard_height: f64,
    /// Every `scroll_to` call, oldest first.
    pub scrolls: Vec<(f64, bool)>,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            surface_rect: None,
            focus_rect: None,
            viewport: Rect::new(0.0, 0.0, 1024.0, 768.0),
            scroll_top: 0.0,
            keyboard_height: 0.0,
            scrolls: Vec::new(),
        }
    }
}

/// Fixed geometry set by the embedder. Clones share state, so a caller can
/// keep a handle after boxing one into a surface.
#[derive(Debug, Clone, Default)]
pub struct StaticLayout {
    state: Rc<RefCell<LayoutState>>,
}

impl StaticLayout {
    pub fn new(state: LayoutState) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn update(&self, f: impl FnOnce(&mut LayoutState)) {
        f(&mut self.state.borrow_mut());
    }

    pub fn snapshot(&self) -> LayoutState {
        self.state.borrow().clone()
    }

    pub fn scrolls(&self) -> Vec<(f64, bool)> {
        self.state.borrow().scrolls.clone()
    }
}

impl LayoutHost for StaticLayout {
    fn surface_rect(&self) -> Option<Rect> {
        self.state.borrow().surface_rect
    }

    fn selection_focus_rect(&self, selection: &Selection) -> Option<Rect> {
        if selection.is_null() {
            return None;
        }
        self.state.borrow().focus_rect
    }

    fn viewport(&self) -> Rect {
        self.state.borrow().viewport
    }

    fn scroll_top(&self) -> f64 {
        self.state.borrow().scroll_top
    }

    fn scroll_to(&mut self, top: f64, animate: bool) {
        let mut state = self.state.borrow_mut();
        state.scroll_top = top;
        state.scrolls.push((top, animate));
    }

    fn virtual_keyboard_height(&self) -> f64 {
        self.state.borrow().keyboard_height
    }
}
