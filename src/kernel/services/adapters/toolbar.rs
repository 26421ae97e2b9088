use std::cell::RefCell;
use std::rc::Rc;

use crate::kernel::services::ports::{ready, LocalBoxFuture, ToolGroupConfig, Toolbar, ToolbarRole};
use crate::kernel::surface::SurfaceId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolbarState {
    pub surface: Option<SurfaceId>,
    pub groups: Vec<String>,
    pub setups: usize,
    pub floatable: bool,
    pub floating: bool,
    pub offset_top: f64,
    pub height: f64,
    pub repositions: usize,
    pub torn_down: bool,
    pub destroyed: bool,
}

/// Toolbar that only tracks state; transitions resolve immediately.
#[derive(Debug, Clone)]
pub struct HeadlessToolbar {
    role: ToolbarRole,
    state: Rc<RefCell<ToolbarState>>,
}

impl HeadlessToolbar {
    pub fn new(role: ToolbarRole, floatable: bool) -> Self {
        Self {
            role,
            state: Rc::new(RefCell::new(ToolbarState {
                floatable,
                height: 40.0,
                ..ToolbarState::default()
            })),
        }
    }

    pub fn role(&self) -> ToolbarRole {
        self.role
    }

    pub fn state(&self) -> ToolbarState {
        self.state.borrow().clone()
    }

    pub fn update(&self, f: impl FnOnce(&mut ToolbarState)) {
        f(&mut self.state.borrow_mut());
    }
}

impl Toolbar for HeadlessToolbar {
    fn setup(&mut self, groups: &[ToolGroupConfig], surface: SurfaceId) {
        let mut state = self.state.borrow_mut();
        state.surface = Some(surface);
        state.groups = groups.iter().map(|g| g.name.clone()).collect();
        state.setups += 1;
    }

    fn surface(&self) -> Option<SurfaceId> {
        self.state.borrow().surface
    }

    fn is_floatable(&self) -> bool {
        self.state.borrow().floatable
    }

    fn is_floating(&self) -> bool {
        self.state.borrow().floating
    }

    fn float(&mut self) {
        self.state.borrow_mut().floating = true;
    }

    fn unfloat(&mut self) {
        self.state.borrow_mut().floating = false;
    }

    fn original_offset_top(&self) -> f64 {
        self.state.borrow().offset_top
    }

    fn height(&self) -> f64 {
        self.state.borrow().height
    }

    fn reposition_popups(&mut self) {
        self.state.borrow_mut().repositions += 1;
    }

    fn teardown(&mut self) -> LocalBoxFuture<'static, ()> {
        self.state.borrow_mut().torn_down = true;
        ready(())
    }

    fn destroy(&mut self) {
        let mut state = self.state.borrow_mut();
        state.surface = None;
        state.destroyed = true;
    }
}
