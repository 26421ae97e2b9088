//! Contextual menu attached to the current selection.
//!
//! Desktop contexts float next to the selection. A docked context (mobile)
//! sits at the bottom of the viewport, so its height becomes bottom padding.

use crate::models::Selection;

pub const DEFAULT_CONTEXT_HEIGHT: f64 = 44.0;

#[derive(Debug)]
pub struct Context {
    visible: bool,
    docked: bool,
    height: f64,
    destroyed: bool,
}

impl Context {
    pub fn new(docked: bool) -> Self {
        Self {
            visible: false,
            docked,
            height: DEFAULT_CONTEXT_HEIGHT,
            destroyed: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_docked(&self) -> bool {
        self.docked
    }

    /// Occupied height; 0 while hidden.
    pub fn size(&self) -> f64 {
        if self.visible {
            self.height
        } else {
            0.0
        }
    }

    pub fn set_height(&mut self, height: f64) -> bool {
        let changed = (self.height - height).abs() > f64::EPSILON;
        self.height = height;
        changed && self.visible
    }

    /// Shows tools for non-collapsed or node selections. Returns whether visibility changed.
    pub fn update(&mut self, selection: &Selection, read_only: bool) -> bool {
        if self.destroyed {
            return false;
        }
        let show = !read_only && !selection.is_null() && !selection.is_collapsed();
        let changed = show != self.visible;
        self.visible = show;
        changed
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn destroy(&mut self) {
        self.visible = false;
        self.destroyed = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/views/context.rs"]
mod tests;
