//! Viewport geometry shared by the surface and its hosts.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            right: left + width,
            bottom: top + height,
            left,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
            left: self.left + dx,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Applies only the sides present in `update`. Returns whether anything changed.
    pub fn merge(&mut self, update: PaddingUpdate) -> bool {
        let prev = *self;
        if let Some(top) = update.top {
            self.top = top;
        }
        if let Some(right) = update.right {
            self.right = right;
        }
        if let Some(bottom) = update.bottom {
            self.bottom = bottom;
        }
        if let Some(left) = update.left {
            self.left = left;
        }
        prev != *self
    }

    /// Side-by-side sum, e.g. surface padding plus a fixed overlay inset.
    pub fn combined(&self, other: Padding) -> Self {
        Self {
            top: self.top + other.top,
            right: self.right + other.right,
            bottom: self.bottom + other.bottom,
            left: self.left + other.left,
        }
    }

    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            top: self.top + margin,
            right: self.right + margin,
            bottom: self.bottom + margin,
            left: self.left + margin,
        }
    }
}

/// Partial padding change; `None` keeps the current side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaddingUpdate {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

impl PaddingUpdate {
    pub fn top(value: f64) -> Self {
        Self {
            top: Some(value),
            ..Self::default()
        }
    }

    pub fn bottom(value: f64) -> Self {
        Self {
            bottom: Some(value),
            ..Self::default()
        }
    }

    pub fn left(value: f64) -> Self {
        Self {
            left: Some(value),
            ..Self::default()
        }
    }

    pub fn right(value: f64) -> Self {
        Self {
            right: Some(value),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/geometry.rs"]
mod tests;
