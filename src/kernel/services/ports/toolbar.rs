use super::runtime::LocalBoxFuture;
use super::settings::ToolGroupConfig;
use crate::kernel::surface::SurfaceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarRole {
    Main,
    Actions,
}

/// Toolbar widget contract; rendering is the host's concern.
pub trait Toolbar {
    /// Rebinds the tool groups to `surface`, replacing any previous binding.
    fn setup(&mut self, groups: &[ToolGroupConfig], surface: SurfaceId);

    fn surface(&self) -> Option<SurfaceId>;

    fn is_floatable(&self) -> bool;

    fn is_floating(&self) -> bool;

    fn float(&mut self);

    fn unfloat(&mut self);

    /// Document-relative top offset of the toolbar when not floating.
    fn original_offset_top(&self) -> f64;

    fn height(&self) -> f64;

    /// Popup tool groups anchor to the toolbar's screen position.
    fn reposition_popups(&mut self);

    /// Runs the exit transition; resolves once the toolbar may be destroyed.
    fn teardown(&mut self) -> LocalBoxFuture<'static, ()>;

    fn destroy(&mut self);
}
