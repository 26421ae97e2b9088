use crate::core::geometry::Rect;
use crate::models::Selection;

/// Geometry of the live surface as laid out by the host.
///
/// Stands in for the scroll container, scroll listener and overlay container
/// of a browser page. All rects are in viewport coordinates unless noted.
pub trait LayoutHost {
    /// Bounding rect of the surface; `None` while detached.
    fn surface_rect(&self) -> Option<Rect>;

    /// Rect of the focus end of `selection`, relative to the surface.
    fn selection_focus_rect(&self, selection: &Selection) -> Option<Rect>;

    /// Visible area of the scroll container.
    fn viewport(&self) -> Rect;

    fn scroll_top(&self) -> f64;

    fn scroll_to(&mut self, top: f64, animate: bool);

    /// Height of the on-screen keyboard, 0 when hidden or unknown.
    fn virtual_keyboard_height(&self) -> f64 {
        0.0
    }
}
