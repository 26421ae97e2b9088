//! Target: the embedding context for one or more surfaces.
//!
//! Owns the surfaces, the shared toolbars and the document/target-level key
//! bindings, and coordinates which surface is active.

use std::time::Instant;

use compact_str::CompactString;
use crossterm::event::KeyEvent;
use slotmap::SlotMap;

use crate::core::geometry::PaddingUpdate;
use crate::core::instances::{InstanceRegistry, TargetId};
use crate::core::trigger::{Trigger, TriggerListener};
use crate::kernel::services::ports::{SurfaceConfig, SurfaceMode, TargetConfig, Toolbar, ToolbarRole};
use crate::kernel::surface::{Surface, SurfaceDeps, SurfaceHost, SurfaceId, SurfaceInput};
use crate::views::ViewEvent;

pub type ToolbarFactory = Box<dyn FnMut(ToolbarRole) -> Box<dyn Toolbar>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("surface {0:?} was never added to this target")]
    SurfaceNotRegistered(SurfaceId),
    #[error("target config lists no modes")]
    NoModes,
}

/// Which key listener a keydown is routed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyScope {
    Document,
    Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    Live,
    TornDown,
    Destroyed,
}

pub struct Target {
    id: TargetId,
    registry: InstanceRegistry,
    config: TargetConfig,
    deps: SurfaceDeps,
    surfaces: SlotMap<SurfaceId, Surface>,
    order: Vec<SurfaceId>,
    surface: Option<SurfaceId>,
    toolbar_factory: ToolbarFactory,
    toolbar: Option<Box<dyn Toolbar>>,
    actions_toolbar: Option<Box<dyn Toolbar>>,
    active_toolbars: u32,
    /// Surfaces deactivated by open toolbar popups, with their prior state.
    deactivated: Vec<(SurfaceId, bool)>,
    default_mode: SurfaceMode,
    classes: Vec<String>,
    document_triggers: TriggerListener,
    target_triggers: TriggerListener,
    handlers_bound: bool,
    attached: bool,
    state: TargetState,
}

impl Target {
    pub fn new(
        registry: &InstanceRegistry,
        config: TargetConfig,
        deps: SurfaceDeps,
        toolbar_factory: ToolbarFactory,
    ) -> Result<Self, TargetError> {
        let first_mode = *config.modes.first().ok_or(TargetError::NoModes)?;
        let default_mode = config
            .default_mode
            .filter(|mode| config.modes.contains(mode))
            .unwrap_or(first_mode);

        let document_triggers = TriggerListener::new(&config.document_commands, &deps.triggers);
        let target_triggers = TriggerListener::new(&config.target_commands, &deps.triggers);
        let id = registry.register();
        tracing::info!(target = ?id, mode = default_mode.name(), "target created");

        Ok(Self {
            id,
            registry: registry.clone(),
            config,
            deps,
            surfaces: SlotMap::with_key(),
            order: Vec::new(),
            surface: None,
            toolbar_factory,
            toolbar: None,
            actions_toolbar: None,
            active_toolbars: 0,
            deactivated: Vec::new(),
            default_mode,
            classes: vec![
                "ve-init-target".to_string(),
                mode_class(default_mode),
            ],
            document_triggers,
            target_triggers,
            handlers_bound: true,
            attached: true,
            state: TargetState::Live,
        })
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn state(&self) -> TargetState {
        self.state
    }

    pub fn config(&self) -> &TargetConfig {
        &self.config
    }

    pub fn deps(&self) -> &SurfaceDeps {
        &self.deps
    }

    pub fn modes(&self) -> &[SurfaceMode] {
        &self.config.modes
    }

    pub fn default_mode(&self) -> SurfaceMode {
        self.default_mode
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn handlers_bound(&self) -> bool {
        self.handlers_bound
    }

    pub fn active_toolbars(&self) -> u32 {
        self.active_toolbars
    }

    pub fn document_triggers(&self) -> &TriggerListener {
        &self.document_triggers
    }

    pub fn target_triggers(&self) -> &TriggerListener {
        &self.target_triggers
    }

    pub fn toolbar(&self) -> Option<&dyn Toolbar> {
        self.toolbar.as_deref()
    }

    pub fn actions_toolbar(&self) -> Option<&dyn Toolbar> {
        self.actions_toolbar.as_deref()
    }

    /// Builds a surface with the target's registries. The caller still has to
    /// `add_surface` it.
    pub fn create_surface(
        &self,
        input: SurfaceInput,
        config: SurfaceConfig,
        host: SurfaceHost,
    ) -> Surface {
        Surface::new(input, config, &self.deps, host)
    }

    /// Stores and initializes `surface`.
    pub fn add_surface(&mut self, mut surface: Surface) -> SurfaceId {
        surface.set_target(self.id);
        let id = self.surfaces.insert_with_key(|id| {
            surface.set_id(id);
            surface
        });
        self.order.push(id);
        if let Some(surface) = self.surfaces.get_mut(id) {
            surface.initialize();
        }
        tracing::debug!(surface = ?id, "surface added");
        id
    }

    pub fn surface_count(&self) -> usize {
        self.order.len()
    }

    pub fn surface_ids(&self) -> &[SurfaceId] {
        &self.order
    }

    pub fn get_surface(&self, id: SurfaceId) -> Option<&Surface> {
        self.surfaces.get(id)
    }

    pub fn get_surface_mut(&mut self, id: SurfaceId) -> Option<&mut Surface> {
        self.surfaces.get_mut(id)
    }

    pub fn surface_id(&self) -> Option<SurfaceId> {
        self.surface
    }

    /// The active surface.
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.and_then(|id| self.surfaces.get(id))
    }

    pub fn surface_mut(&mut self) -> Option<&mut Surface> {
        self.surface.and_then(|id| self.surfaces.get_mut(id))
    }

    /// Makes `id` the active surface and rebinds both toolbars to it.
    pub fn set_surface(&mut self, id: SurfaceId) -> Result<(), TargetError> {
        if !self.surfaces.contains_key(id) {
            tracing::error!(surface = ?id, "set_surface on unknown surface");
            return Err(TargetError::SurfaceNotRegistered(id));
        }
        if self.surface == Some(id) {
            return Ok(());
        }
        self.surface = Some(id);
        self.setup_toolbars(id);
        tracing::debug!(surface = ?id, "active surface changed");
        Ok(())
    }

    fn setup_toolbars(&mut self, id: SurfaceId) {
        let factory = &mut self.toolbar_factory;
        let toolbar = self
            .toolbar
            .get_or_insert_with(|| factory(ToolbarRole::Main));
        toolbar.setup(&self.config.toolbar_groups, id);
        let actions = self
            .actions_toolbar
            .get_or_insert_with(|| factory(ToolbarRole::Actions));
        actions.setup(&self.config.action_groups, id);
    }

    /// Toolbars report popups opening/closing. Several may be active at once.
    ///
    /// Every surface deactivated while the counter is above zero gets its
    /// prior state back when the counter returns to zero, even if the active
    /// surface changed in between.
    pub fn on_toolbar_active(&mut self, active: bool) {
        if !self.handlers_bound {
            return;
        }
        if active {
            self.active_toolbars += 1;
            let Some(id) = self.surface else {
                return;
            };
            if self.deactivated.iter().any(|(seen, _)| *seen == id) {
                return;
            }
            let Some(surface) = self.surfaces.get_mut(id) else {
                return;
            };
            self.deactivated.push((id, surface.view().is_active()));
            if surface.view_mut().deactivate() {
                surface.handle_view_event(ViewEvent::Activation, Instant::now());
            }
            return;
        }

        let Some(remaining) = self.active_toolbars.checked_sub(1) else {
            tracing::error!("toolbar deactivated more often than activated");
            return;
        };
        self.active_toolbars = remaining;
        if remaining > 0 {
            return;
        }
        for (id, was_active) in std::mem::take(&mut self.deactivated) {
            let Some(surface) = self.surfaces.get_mut(id) else {
                continue;
            };
            if was_active && !surface.is_destroyed() && surface.view_mut().activate() {
                surface.handle_view_event(ViewEvent::Activation, Instant::now());
            }
        }
    }

    /// Floats the main toolbar once the container scrolls past it.
    pub fn on_container_scroll(&mut self, scroll_top: f64, now: Instant) {
        if !self.handlers_bound {
            return;
        }
        let Some(toolbar) = self.toolbar.as_mut() else {
            return;
        };
        if !toolbar.is_floatable() || !self.config.toolbar.floatable {
            return;
        }
        let was_floating = toolbar.is_floating();
        if scroll_top + self.config.toolbar.scroll_offset > toolbar.original_offset_top() {
            toolbar.float();
        } else {
            toolbar.unfloat();
        }
        if toolbar.is_floating() != was_floating {
            toolbar.reposition_popups();
            self.on_toolbar_resize(now);
        }
    }

    /// A floating toolbar covers the top of the viewport.
    pub fn on_toolbar_resize(&mut self, now: Instant) {
        let Some(toolbar) = self.toolbar.as_ref() else {
            return;
        };
        let top = if toolbar.is_floating() {
            toolbar.height()
        } else {
            0.0
        };
        if let Some(surface) = self.surface_mut() {
            surface.set_padding(PaddingUpdate::top(top), now);
        }
    }

    /// Returns `true` when a command ran and the default should be prevented.
    pub fn handle_key_down(&mut self, scope: KeyScope, event: KeyEvent) -> bool {
        if !self.handlers_bound {
            return false;
        }
        let trigger = Trigger::from(event);
        if !trigger.is_complete() {
            return false;
        }
        let listener = match scope {
            KeyScope::Document => &self.document_triggers,
            KeyScope::Target => &self.target_triggers,
        };
        let Some(name) = listener.command_for(&trigger).map(CompactString::from) else {
            return false;
        };
        let commands = std::rc::Rc::clone(&self.deps.commands);
        let Some(command) = commands.lookup(&name) else {
            return false;
        };
        let Some(surface) = self.surface_mut() else {
            return false;
        };
        command.execute(surface, false, "trigger", &[])
    }

    /// Swaps the mode class; the old one is removed before the new one is added.
    pub fn set_default_mode(&mut self, mode: SurfaceMode) -> bool {
        if !self.config.modes.contains(&mode) {
            tracing::error!(mode = mode.name(), "mode not offered by this target");
            return false;
        }
        if mode == self.default_mode {
            return false;
        }
        let old = mode_class(self.default_mode);
        self.classes.retain(|c| *c != old);
        self.classes.push(mode_class(mode));
        self.default_mode = mode;
        true
    }

    /// Ticks every live surface.
    pub fn tick(&mut self, now: Instant) {
        for id in &self.order {
            if let Some(surface) = self.surfaces.get_mut(*id) {
                surface.tick(now);
            }
        }
    }

    /// Unbinds handlers, waits for the toolbars to leave, then destroys the
    /// surfaces newest first. Later calls return immediately.
    pub async fn teardown(&mut self) {
        if self.state != TargetState::Live {
            return;
        }
        self.state = TargetState::TornDown;
        self.handlers_bound = false;
        self.active_toolbars = 0;
        self.deactivated.clear();

        let transitions: Vec<_> = [self.toolbar.as_mut(), self.actions_toolbar.as_mut()]
            .into_iter()
            .flatten()
            .map(|toolbar| toolbar.teardown())
            .collect();
        for transition in transitions {
            transition.await;
        }
        for mut toolbar in [self.toolbar.take(), self.actions_toolbar.take()]
            .into_iter()
            .flatten()
        {
            toolbar.destroy();
        }

        for id in self.order.iter().rev() {
            if let Some(surface) = self.surfaces.get_mut(*id) {
                surface.destroy();
            }
        }
        self.surface = None;
        tracing::debug!(target = ?self.id, "target torn down");
    }

    pub async fn destroy(&mut self) {
        if self.state == TargetState::Destroyed {
            return;
        }
        self.teardown().await;
        self.attached = false;
        self.registry.clear_active(self.id);
        self.registry.deregister(self.id);
        self.state = TargetState::Destroyed;
        tracing::info!(target = ?self.id, "target destroyed");
    }
}

fn mode_class(mode: SurfaceMode) -> String {
    format!("ve-init-target-{}", mode.name())
}

#[cfg(test)]
#[path = "../../tests/unit/app/target.rs"]
mod tests;
