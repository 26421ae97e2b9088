//! Scroll-into-view geometry.
//!
//! Pure functions: the caller supplies rects in viewport coordinates and
//! applies the resulting plan to the scroll container.

use crate::core::geometry::{Padding, Rect};
use crate::core::platform::Platform;
use crate::models::Selection;

/// Breathing room kept around the selection, on top of surface padding.
pub const SCROLL_MARGIN: f64 = 5.0;
/// iOS draws its selection handles and loupe above the caret.
pub const IOS_SELECTION_TOP: f64 = 45.0;
/// Android puts a floating selection toolbar under the selection.
pub const ANDROID_SELECTION_BOTTOM: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollPlan {
    /// Selection already visible.
    Stay,
    /// Node selection taller than the usable viewport; leave it alone.
    TooTall,
    To { top: f64, animate: bool },
}

/// Padding applied around the selection, including mobile OS chrome.
pub fn selection_padding(base: Padding, platform: &Platform, selection: &Selection) -> Padding {
    let mut padding = base.expanded(SCROLL_MARGIN);
    if platform.mobile && !selection.is_collapsed() {
        if platform.is_ios() {
            padding.top += IOS_SELECTION_TOP;
        }
        if platform.is_android() {
            padding.bottom += ANDROID_SELECTION_BOTTOM;
        }
    }
    padding
}

pub fn plan_scroll(
    rect: Rect,
    viewport: Rect,
    scroll_top: f64,
    padding: Padding,
    native: bool,
) -> ScrollPlan {
    let top_limit = viewport.top + padding.top;
    let bottom_limit = viewport.bottom - padding.bottom;

    if !native && rect.height() > bottom_limit - top_limit {
        return ScrollPlan::TooTall;
    }

    let target = if rect.top < top_limit {
        scroll_top - (top_limit - rect.top)
    } else if rect.bottom > bottom_limit {
        scroll_top + (rect.bottom - bottom_limit)
    } else {
        return ScrollPlan::Stay;
    };

    let target = target.max(0.0);
    if (target - scroll_top).abs() < f64::EPSILON {
        return ScrollPlan::Stay;
    }
    // Native carets follow typing; animating them lags behind the keyboard.
    ScrollPlan::To {
        top: target,
        animate: !native,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/scroll.rs"]
mod tests;
