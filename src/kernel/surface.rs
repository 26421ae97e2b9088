//! Surface controller.
//!
//! Owns the view and the per-surface sub-controllers, mirrors model state
//! into them and dispatches commands/actions. Model notifications arrive on a
//! bus channel and are applied on `pump`, so nothing here is re-entered while
//! the model is borrowed.

use std::rc::Rc;
use std::time::{Duration, Instant};

use compact_str::CompactString;
use crossterm::event::KeyEvent;
use rustc_hash::FxHashSet;
use serde_json::Value;
use slotmap::new_key_type;
use tokio::sync::oneshot;

use crate::core::bus::BusReceiver;
use crate::core::command::CommandRegistry;
use crate::core::debounce::Debounce;
use crate::core::event::{Emitter, ListenerId};
use crate::core::geometry::{Padding, PaddingUpdate};
use crate::core::instances::TargetId;
use crate::core::platform::Platform;
use crate::core::trigger::{Trigger, TriggerListener, TriggerRegistry};
use crate::kernel::action::ActionFactory;
use crate::kernel::progress::{ProgressDescriptor, ProgressReceiver};
use crate::kernel::scroll::{self, ScrollPlan};
use crate::kernel::sequence::SequenceRegistry;
use crate::kernel::services::adapters::{HeadlessWindowManager, HtmlConverter, StaticLayout};
use crate::kernel::services::ports::{
    Converter, LayoutHost, SurfaceConfig, SurfaceMode, WindowData, WindowManager,
};
use crate::models::document::char_to_byte;
use crate::models::{
    Document, ModelEvent, Selection, SharedSurfaceModel, SurfaceModel, Transaction,
};
use crate::views::{Context, SurfaceView, ViewEvent};

new_key_type! {
    pub struct SurfaceId;
}

pub const SCROLL_DEBOUNCE: Duration = Duration::from_millis(500);

pub enum SurfaceInput {
    Html(String),
    Document(Document),
    /// Adopted as-is; may be shared with other surfaces.
    Model(SharedSurfaceModel),
}

/// Host-side collaborators owned by one surface.
pub struct SurfaceHost {
    pub layout: Box<dyn LayoutHost>,
    pub dialogs: Box<dyn WindowManager>,
    pub toolbar_dialogs: Box<dyn WindowManager>,
}

impl SurfaceHost {
    pub fn headless() -> Self {
        Self {
            layout: Box::new(StaticLayout::default()),
            dialogs: Box::new(HeadlessWindowManager::new()),
            toolbar_dialogs: Box::new(HeadlessWindowManager::new()),
        }
    }
}

/// Registries and services shared by every surface of a target.
#[derive(Clone)]
pub struct SurfaceDeps {
    pub commands: Rc<CommandRegistry>,
    pub triggers: Rc<TriggerRegistry>,
    pub sequences: Rc<SequenceRegistry>,
    pub actions: Rc<ActionFactory>,
    pub converter: Rc<dyn Converter>,
    pub platform: Platform,
}

impl SurfaceDeps {
    pub fn with_defaults(platform: Platform) -> Self {
        Self {
            commands: Rc::new(CommandRegistry::with_defaults()),
            triggers: Rc::new(TriggerRegistry::with_defaults(platform.kind)),
            sequences: Rc::new(SequenceRegistry::with_defaults()),
            actions: Rc::new(ActionFactory::with_defaults()),
            converter: Rc::new(HtmlConverter::new()),
            platform,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    ReadOnly(bool),
    /// Emitted after a native selection was scrolled into view.
    Scroll,
    Position,
    Activation(bool),
    Focus,
    Blur,
    Select(Selection),
    /// Break requested on a single-line surface.
    Submit,
    Destroy,
}

#[derive(Debug, Clone, Copy)]
pub enum Executable<'a> {
    Trigger(&'a Trigger),
    Action { name: &'a str, method: &'a str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Initialized,
    Destroyed,
}

pub struct Surface {
    id: Option<SurfaceId>,
    target: Option<TargetId>,
    model: SharedSurfaceModel,
    model_listener: Option<ListenerId>,
    model_rx: BusReceiver<ModelEvent>,
    view: SurfaceView,
    context: Context,
    dialogs: Box<dyn WindowManager>,
    toolbar_dialogs: Box<dyn WindowManager>,
    layout: Box<dyn LayoutHost>,
    config: SurfaceConfig,
    padding: Padding,
    visible_padding_bottom: Option<f64>,
    trigger_listener: TriggerListener,
    command_registry: Rc<CommandRegistry>,
    sequences: Rc<SequenceRegistry>,
    actions: Rc<ActionFactory>,
    converter: Rc<dyn Converter>,
    platform: Platform,
    progresses: Vec<ProgressDescriptor>,
    progress_flush: Debounce,
    scroll_debounce: Debounce,
    emitter: Emitter<SurfaceEvent>,
    lifecycle: Lifecycle,
}

impl Surface {
    pub fn new(input: SurfaceInput, config: SurfaceConfig, deps: &SurfaceDeps, host: SurfaceHost) -> Self {
        let model = match input {
            SurfaceInput::Model(model) => model,
            SurfaceInput::Document(document) => SurfaceModel::new(document).into_shared(),
            SurfaceInput::Html(html) => {
                let document = match config.mode {
                    SurfaceMode::Visual => deps.converter.document_from_html(&html),
                    SurfaceMode::Source => deps.converter.document_from_source(&html),
                };
                SurfaceModel::new(document).into_shared()
            }
        };
        let (model_listener, model_rx) = model.borrow_mut().subscribe();
        let view = SurfaceView::new(&model.borrow(), config.mode, config.attached_root, config.debug);
        let commands = derive_commands(&deps.commands, &config);
        let trigger_listener = TriggerListener::new(&commands, &deps.triggers);
        let read_only = config.read_only;

        let mut surface = Self {
            id: None,
            target: None,
            model,
            model_listener: Some(model_listener),
            model_rx,
            view,
            context: Context::new(deps.platform.mobile),
            dialogs: host.dialogs,
            toolbar_dialogs: host.toolbar_dialogs,
            layout: host.layout,
            config,
            padding: Padding::default(),
            visible_padding_bottom: None,
            trigger_listener,
            command_registry: Rc::clone(&deps.commands),
            sequences: Rc::clone(&deps.sequences),
            actions: Rc::clone(&deps.actions),
            converter: Rc::clone(&deps.converter),
            platform: deps.platform,
            progresses: Vec::new(),
            progress_flush: Debounce::new(Duration::ZERO),
            scroll_debounce: Debounce::new(SCROLL_DEBOUNCE),
            emitter: Emitter::new(),
            lifecycle: Lifecycle::Created,
        };
        if read_only {
            surface.set_read_only(true);
        }
        surface.update_placeholder();
        surface
    }

    /// Runs once the surface is attached to the host.
    pub fn initialize(&mut self) {
        if self.lifecycle != Lifecycle::Created {
            return;
        }
        self.view.initialize();
        self.update_placeholder();
        self.adjust_visible_padding();
        self.lifecycle = Lifecycle::Initialized;
    }

    pub fn id(&self) -> Option<SurfaceId> {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: SurfaceId) {
        self.id = Some(id);
    }

    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    pub(crate) fn set_target(&mut self, target: TargetId) {
        self.target = Some(target);
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_initialized(&self) -> bool {
        self.lifecycle == Lifecycle::Initialized
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifecycle == Lifecycle::Destroyed
    }

    pub fn model(&self) -> &SharedSurfaceModel {
        &self.model
    }

    pub fn selection(&self) -> Selection {
        self.model.borrow().selection()
    }

    pub fn view(&self) -> &SurfaceView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut SurfaceView {
        &mut self.view
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn dialogs(&self) -> &dyn WindowManager {
        self.dialogs.as_ref()
    }

    pub fn dialogs_mut(&mut self) -> &mut dyn WindowManager {
        self.dialogs.as_mut()
    }

    pub fn toolbar_dialogs(&self) -> &dyn WindowManager {
        self.toolbar_dialogs.as_ref()
    }

    pub fn mode(&self) -> SurfaceMode {
        self.config.mode
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn is_multiline(&self) -> bool {
        self.config.multiline
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Bottom inset of the visible area; `None` when not adjusted (desktop).
    pub fn visible_padding_bottom(&self) -> Option<f64> {
        self.visible_padding_bottom
    }

    pub fn commands(&self) -> &[CompactString] {
        self.trigger_listener.commands()
    }

    pub fn trigger_listener(&self) -> &TriggerListener {
        &self.trigger_listener
    }

    pub fn pending_progress(&self) -> usize {
        self.progresses.len()
    }

    pub fn html(&self) -> String {
        self.converter.html_from_document(self.model.borrow().document())
    }

    pub fn on(&mut self, listener: impl FnMut(&SurfaceEvent) + 'static) -> ListenerId {
        self.emitter.on(listener)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.emitter.off(id)
    }

    pub(crate) fn emit(&mut self, event: SurfaceEvent) {
        self.emitter.emit(&event);
    }

    pub fn execute(&mut self, executable: Executable<'_>, args: &[Value]) -> bool {
        self.execute_with_source(executable, "api", args)
    }

    pub fn execute_with_source(
        &mut self,
        executable: Executable<'_>,
        source: &str,
        args: &[Value],
    ) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let result = match executable {
            Executable::Trigger(trigger) => {
                let Some(name) = self.trigger_listener.command_for(trigger).map(CompactString::from)
                else {
                    return false;
                };
                let registry = Rc::clone(&self.command_registry);
                match registry.lookup(&name) {
                    Some(command) => command.execute(self, false, source, args),
                    None => {
                        tracing::debug!(command = %name, "trigger bound to unregistered command");
                        false
                    }
                }
            }
            Executable::Action { name, method } => {
                let actions = Rc::clone(&self.actions);
                if !actions.does_action_support_method(name, method) {
                    tracing::debug!(action = name, method, "unsupported action method");
                    return false;
                }
                match actions.create(name, source) {
                    Some(mut action) => action.invoke(self, method, args).unwrap_or(true),
                    None => false,
                }
            }
        };
        self.pump();
        result
    }

    /// Dispatches a physical key through this surface's triggers.
    pub fn handle_key_down(&mut self, event: KeyEvent) -> bool {
        let trigger = Trigger::from(event);
        if !trigger.is_complete() {
            return false;
        }
        self.execute_with_source(Executable::Trigger(&trigger), "trigger", &[])
    }

    pub fn select(&mut self, selection: Selection) {
        self.model.borrow_mut().set_selection(selection);
        self.pump();
    }

    /// Types `text` at the selection, then runs any sequence it completes.
    pub fn insert_text(&mut self, text: &str, source: &str) -> bool {
        let inserted = self.execute_with_source(
            Executable::Action {
                name: "content",
                method: "insert",
            },
            source,
            &[Value::from(text)],
        );
        if !inserted {
            return false;
        }

        let Some((node, offset, before_caret)) = self.text_before_caret() else {
            return true;
        };
        let sequences = Rc::clone(&self.sequences);
        let hits: Vec<(CompactString, usize)> = sequences
            .find_matching(&before_caret)
            .filter(|s| self.commands().iter().any(|c| c == s.command()))
            .map(|s| (CompactString::from(s.command()), s.strip()))
            .collect();

        for (command, strip) in hits {
            tracing::debug!(command = %command, "sequence matched");
            self.strip_before_caret(node, offset, strip);
            let registry = Rc::clone(&self.command_registry);
            if let Some(command) = registry.lookup(&command) {
                command.execute(self, false, "sequence", &[]);
            }
        }
        true
    }

    fn text_before_caret(&self) -> Option<(usize, usize, String)> {
        let model = self.model.borrow();
        let selection = model.selection();
        if !selection.is_collapsed() {
            return None;
        }
        let focus = selection.focus()?;
        let node = model.document().node(focus.node)?;
        let end = char_to_byte(&node.text, focus.offset);
        Some((focus.node, focus.offset, node.text[..end].to_string()))
    }

    fn strip_before_caret(&mut self, node: usize, offset: usize, count: usize) {
        let mut model = self.model.borrow_mut();
        let Some(current) = model.document().node(node).map(|n| n.text.clone()) else {
            return;
        };
        let start = offset.saturating_sub(count);
        let from = char_to_byte(&current, start);
        let to = char_to_byte(&current, offset);
        let after = format!("{}{}", &current[..from], &current[to..]);
        let tx = Transaction::SetText {
            index: node,
            before: current,
            after,
        };
        if let Err(error) = model.change(vec![tx], Some(Selection::caret(node, start))) {
            tracing::warn!(%error, "failed to strip sequence");
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.model.borrow().is_read_only()
    }

    /// Model first, then view, then listeners. No-op when unchanged.
    pub fn set_read_only(&mut self, read_only: bool) {
        if self.is_destroyed() {
            return;
        }
        let model_changed = self.model.borrow_mut().set_read_only(read_only);
        let view_changed = self.view.is_read_only() != read_only;
        if !model_changed && !view_changed {
            return;
        }
        self.view.set_read_only(read_only);
        self.sync_context_read_only(read_only);
        self.adjust_visible_padding();
        self.emit(SurfaceEvent::ReadOnly(read_only));
    }

    /// A read-only surface hides its context; a docked one gives its inset back.
    fn sync_context_read_only(&mut self, read_only: bool) {
        let selection = self.selection();
        if self.context.update(&selection, read_only) {
            self.on_context_visibility_change(Instant::now());
        }
    }

    /// Applies the model's pending notifications to the view and listeners.
    pub fn pump(&mut self) {
        if self.is_destroyed() {
            return;
        }
        for event in self.model_rx.drain() {
            match event {
                ModelEvent::Transact { .. } => {
                    self.view.render(&self.model.borrow());
                    self.update_placeholder();
                }
                ModelEvent::Select(selection) => {
                    let read_only = self.is_read_only();
                    if self.context.update(&selection, read_only) {
                        self.on_context_visibility_change(Instant::now());
                    }
                    self.emit(SurfaceEvent::Select(selection));
                    self.scroll_selection_into_view();
                }
                ModelEvent::Focus => {
                    self.view.set_focused(true);
                    self.emit(SurfaceEvent::Focus);
                }
                ModelEvent::Blur => {
                    self.view.set_focused(false);
                    self.emit(SurfaceEvent::Blur);
                }
                ModelEvent::ReadOnly(read_only) => {
                    // Another surface sharing the model changed it.
                    if self.view.is_read_only() != read_only {
                        self.view.set_read_only(read_only);
                        self.sync_context_read_only(read_only);
                        self.adjust_visible_padding();
                        self.emit(SurfaceEvent::ReadOnly(read_only));
                    }
                }
            }
        }
    }

    /// Pumps the model, then fires due debounces: scroll, then progress flush.
    pub fn tick(&mut self, now: Instant) {
        if self.is_destroyed() {
            return;
        }
        self.pump();
        if self.scroll_debounce.poll(now) {
            self.scroll_selection_into_view();
        }
        if self.progress_flush.poll(now) {
            self.flush_progresses();
        }
    }

    pub fn handle_view_event(&mut self, event: ViewEvent, now: Instant) {
        if self.is_destroyed() {
            return;
        }
        match event {
            ViewEvent::Position => {
                self.scroll_debounce.schedule(now);
                self.emit(SurfaceEvent::Position);
            }
            ViewEvent::Focus => self.model.borrow_mut().focus(),
            ViewEvent::Blur => {
                let mut model = self.model.borrow_mut();
                model.blur();
                if self.config.null_selection_on_blur {
                    model.set_null_selection();
                }
            }
            ViewEvent::Activation => {
                let active = self.view.is_active();
                self.emit(SurfaceEvent::Activation(active));
            }
        }
        self.pump();
    }

    pub fn set_padding(&mut self, update: PaddingUpdate, now: Instant) {
        if self.padding.merge(update) {
            self.adjust_visible_padding();
            self.scroll_debounce.schedule(now);
        }
    }

    /// Docked context menus occupy the bottom of the viewport.
    pub fn handle_context_resize(&mut self, height: f64, now: Instant) {
        if self.context.set_height(height) {
            self.on_context_visibility_change(now);
        }
    }

    pub fn handle_toolbar_dialogs_resize(&mut self, update: PaddingUpdate, now: Instant) {
        self.set_padding(update, now);
    }

    fn on_context_visibility_change(&mut self, now: Instant) {
        if self.context.is_docked() {
            let size = self.context.size();
            self.set_padding(PaddingUpdate::bottom(size), now);
        }
    }

    pub fn adjust_visible_padding(&mut self) {
        if !self.platform.mobile || self.config.in_target_widget {
            self.visible_padding_bottom = None;
            return;
        }
        let bottom = if self.is_read_only() {
            0.0
        } else {
            let keyboard = if self.platform.is_ios() && !self.config.in_dialog {
                self.layout.virtual_keyboard_height()
            } else {
                0.0
            };
            self.padding.bottom + keyboard
        };
        self.visible_padding_bottom = Some(bottom);
    }

    /// Returns whether the container was scrolled.
    pub fn scroll_selection_into_view(&mut self) -> bool {
        let selection = self.selection();
        if selection.is_null() {
            return false;
        }
        let Some(surface_rect) = self.layout.surface_rect() else {
            tracing::trace!("surface not laid out; skip scroll");
            return false;
        };
        let Some(focus_rect) = self.layout.selection_focus_rect(&selection) else {
            tracing::trace!("selection has no rect; skip scroll");
            return false;
        };
        let native = selection.is_native_cursor();
        let rect = focus_rect.translate(surface_rect.left, surface_rect.top);
        let base = self.padding.combined(self.config.overlay_padding);
        let padding = scroll::selection_padding(base, &self.platform, &selection);

        match scroll::plan_scroll(rect, self.layout.viewport(), self.layout.scroll_top(), padding, native) {
            ScrollPlan::To { top, animate } => {
                tracing::debug!(top, animate, native, "scroll selection into view");
                self.layout.scroll_to(top, animate);
                if native {
                    self.emit(SurfaceEvent::Scroll);
                }
                true
            }
            ScrollPlan::TooTall => {
                tracing::trace!("selection taller than viewport");
                false
            }
            ScrollPlan::Stay => false,
        }
    }

    pub fn update_placeholder(&mut self) {
        let has_content = self.model.borrow().document().has_content();
        let visible = self.config.placeholder.is_some() && !has_content;
        self.view
            .update_placeholder(self.config.placeholder.as_deref(), visible);
    }

    /// Queues a progress bar; the dialog opens on the next `tick`, batched
    /// with any other progress created before then.
    pub fn create_progress(
        &mut self,
        completion: Option<oneshot::Receiver<()>>,
        label: &str,
        cancellable: bool,
        now: Instant,
    ) -> ProgressReceiver {
        let (descriptor, receiver) = ProgressDescriptor::new(label, cancellable, completion);
        if self.is_destroyed() {
            // Dropping the descriptor abandons the receiver.
            return receiver;
        }
        self.progresses.push(descriptor);
        self.progress_flush.schedule(now);
        receiver
    }

    fn flush_progresses(&mut self) {
        if self.progresses.is_empty() {
            return;
        }
        let batch = std::mem::take(&mut self.progresses);
        let count = batch.len();
        if let Err(error) = self
            .dialogs
            .open_window("progress", WindowData::Progress(batch))
        {
            tracing::warn!(%error, count, "progress dialog unavailable");
        }
    }

    /// Releases sub-controllers in order and disconnects from the model.
    /// Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.is_destroyed() {
            return;
        }
        self.context.destroy();
        self.dialogs.destroy();
        self.toolbar_dialogs.destroy();
        self.view.destroy();

        if let Some(listener) = self.model_listener.take() {
            self.model.borrow_mut().unsubscribe(listener);
        }
        self.progresses.clear();
        self.scroll_debounce.cancel();
        self.progress_flush.cancel();
        self.view.detach();

        self.lifecycle = Lifecycle::Destroyed;
        tracing::debug!(surface = ?self.id, "surface destroyed");
        self.emit(SurfaceEvent::Destroy);
        self.emitter.clear();
    }
}

/// (included, or every registered command) minus excluded, first occurrence wins.
fn derive_commands(registry: &CommandRegistry, config: &SurfaceConfig) -> Vec<CompactString> {
    let included: Vec<CompactString> = match &config.include_commands {
        Some(names) => names.iter().map(|n| CompactString::from(n.as_str())).collect(),
        None => registry.names().map(CompactString::from).collect(),
    };
    let mut seen = FxHashSet::default();
    included
        .into_iter()
        .filter(|name| !config.exclude_commands.iter().any(|e| e == name.as_str()))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/surface.rs"]
mod tests;
