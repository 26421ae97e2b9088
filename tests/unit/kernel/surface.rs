use std::cell::{Cell, RefCell};

use crossterm::event::{KeyCode, KeyModifiers};

use super::*;
use crate::core::command::Command;
use crate::core::geometry::Rect;
use crate::core::platform::Os;
use crate::core::trigger::TriggerDef;
use crate::kernel::action::{Action, ActionResult};
use crate::kernel::progress::{ProgressBar, ProgressError};
use crate::kernel::services::adapters::LayoutState;
use crate::kernel::services::ports::{WindowError, WindowHandle};
use crate::models::{Node, NodeKind, Position};

struct Harness {
    surface: Surface,
    layout: StaticLayout,
    dialogs: HeadlessWindowManager,
    events: Rc<RefCell<Vec<SurfaceEvent>>>,
}

fn harness_with(nodes: Vec<Node>, config: SurfaceConfig, deps: &SurfaceDeps) -> Harness {
    let layout = StaticLayout::new(LayoutState {
        surface_rect: Some(Rect::new(0.0, 0.0, 800.0, 2000.0)),
        viewport: Rect::new(0.0, 0.0, 800.0, 600.0),
        ..LayoutState::default()
    });
    let dialogs = HeadlessWindowManager::new();
    let host = SurfaceHost {
        layout: Box::new(layout.clone()),
        dialogs: Box::new(dialogs.clone()),
        toolbar_dialogs: Box::new(HeadlessWindowManager::new()),
    };
    let mut surface = Surface::new(
        SurfaceInput::Document(Document::new(nodes)),
        config,
        deps,
        host,
    );
    surface.initialize();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    surface.on(move |event| sink.borrow_mut().push(event.clone()));
    Harness {
        surface,
        layout,
        dialogs,
        events,
    }
}

fn harness(nodes: Vec<Node>) -> Harness {
    harness_with(
        nodes,
        SurfaceConfig::default(),
        &SurfaceDeps::with_defaults(Platform::default()),
    )
}

fn key(ch: char, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), modifiers)
}

fn count(events: &Rc<RefCell<Vec<SurfaceEvent>>>, wanted: &SurfaceEvent) -> usize {
    events.borrow().iter().filter(|e| *e == wanted).count()
}

#[test]
fn read_only_reaches_model_and_view_before_listeners() {
    let mut h = harness(vec![Node::paragraph("text")]);
    let model = Rc::clone(h.surface.model());
    let seen = Rc::new(Cell::new(None));
    let probe = Rc::clone(&seen);
    h.surface.on(move |event| {
        if let SurfaceEvent::ReadOnly(_) = event {
            probe.set(Some(model.borrow().is_read_only()));
        }
    });

    h.surface.set_read_only(true);
    assert_eq!(seen.get(), Some(true));
    assert!(h.surface.view().is_read_only());
    assert!(h.surface.is_read_only());
    assert_eq!(count(&h.events, &SurfaceEvent::ReadOnly(true)), 1);

    // Unchanged value is a no-op.
    h.surface.set_read_only(true);
    h.surface.pump();
    assert_eq!(count(&h.events, &SurfaceEvent::ReadOnly(true)), 1);
}

#[test]
fn read_only_config_applies_at_construction() {
    let config = SurfaceConfig {
        read_only: true,
        ..SurfaceConfig::default()
    };
    let h = harness_with(
        vec![Node::paragraph("x")],
        config,
        &SurfaceDeps::with_defaults(Platform::default()),
    );
    assert!(h.surface.is_read_only());
    assert!(h.surface.view().classes().contains(&"ve-ce-surface-readOnly".to_string()));
}

#[test]
fn read_only_surface_rejects_edits() {
    let mut h = harness(vec![Node::paragraph("keep")]);
    h.surface.set_read_only(true);
    h.surface.select(Selection::caret(0, 4));
    assert!(!h.surface.insert_text("!", "test"));
    assert_eq!(h.surface.model().borrow().document().text(), "keep");
}

#[test]
fn placeholder_tracks_content() {
    let config = SurfaceConfig {
        placeholder: Some("Start writing".to_string()),
        ..SurfaceConfig::default()
    };
    let mut h = harness_with(
        Vec::new(),
        config,
        &SurfaceDeps::with_defaults(Platform::default()),
    );
    assert!(h.surface.view().is_placeholder_visible());

    assert!(h.surface.insert_text("hi", "test"));
    assert!(!h.surface.view().is_placeholder_visible());

    h.surface.select(Selection::range(Position::new(0, 0), Position::new(0, 2)));
    assert!(h.surface.execute(
        Executable::Action {
            name: "content",
            method: "remove"
        },
        &[]
    ));
    assert!(!h.surface.model().borrow().document().has_content());
    assert!(h.surface.view().is_placeholder_visible());
}

#[test]
fn view_follows_model_document() {
    let mut h = harness(vec![Node::paragraph("one")]);
    h.surface.select(Selection::caret(0, 3));
    h.surface.insert_text(" two", "test");
    let model_id = h.surface.model().borrow().document().id();
    assert_eq!(h.surface.view().document_id(), model_id);
    assert_eq!(h.surface.view().nodes()[0].text, "one two");
}

thread_local! {
    static HITS: Cell<usize> = const { Cell::new(0) };
}

struct CountingAction;

impl Action for CountingAction {
    fn invoke(&mut self, _surface: &mut Surface, _method: &str, _args: &[Value]) -> ActionResult {
        HITS.with(|hits| hits.set(hits.get() + 1));
        None
    }
}

#[test]
fn bound_trigger_executes_command_once() {
    HITS.with(|hits| hits.set(0));
    let mut commands = CommandRegistry::new();
    commands.register(Command::new("bold", "count", "hit"));
    let mut triggers = TriggerRegistry::new(Platform::default().kind);
    triggers
        .register("bold", TriggerDef::universal(&["ctrl+b"]))
        .unwrap();
    let mut actions = ActionFactory::new();
    actions.register("count", &["hit"], |_| -> Box<dyn Action> { Box::new(CountingAction) });

    let mut deps = SurfaceDeps::with_defaults(Platform::default());
    deps.commands = Rc::new(commands);
    deps.triggers = Rc::new(triggers);
    deps.actions = Rc::new(actions);
    let mut h = harness_with(vec![Node::paragraph("x")], SurfaceConfig::default(), &deps);

    let trigger: Trigger = "ctrl+b".parse().unwrap();
    assert_eq!(h.surface.trigger_listener().command_for(&trigger), Some("bold"));
    assert!(h.surface.execute(Executable::Trigger(&trigger), &[]));
    assert_eq!(HITS.with(Cell::get), 1);
}

#[test]
fn ctrl_b_bolds_the_selection() {
    let mut h = harness(vec![Node::paragraph("bold me")]);
    h.surface.select(Selection::range(Position::new(0, 0), Position::new(0, 4)));
    assert!(h.surface.handle_key_down(key('b', KeyModifiers::CONTROL)));
    assert!(h.surface.model().borrow().document().nodes()[0].marks.contains("bold"));

    assert!(h.surface.handle_key_down(key('z', KeyModifiers::CONTROL)));
    assert!(h.surface.model().borrow().document().nodes()[0].marks.is_empty());
}

#[test]
fn unbound_or_incomplete_keys_do_nothing() {
    let mut h = harness(vec![Node::paragraph("x")]);
    assert!(!h.surface.handle_key_down(key('q', KeyModifiers::CONTROL)));
    assert!(!h.surface.handle_key_down(KeyEvent::new(
        KeyCode::Modifier(crossterm::event::ModifierKeyCode::LeftShift),
        KeyModifiers::SHIFT,
    )));
}

#[test]
fn excluded_commands_are_not_bound() {
    let config = SurfaceConfig {
        exclude_commands: vec!["bold".to_string()],
        ..SurfaceConfig::default()
    };
    let mut h = harness_with(
        vec![Node::paragraph("abc")],
        config,
        &SurfaceDeps::with_defaults(Platform::default()),
    );
    assert!(!h.surface.commands().iter().any(|c| c == "bold"));
    h.surface.select(Selection::range(Position::new(0, 0), Position::new(0, 3)));
    assert!(!h.surface.handle_key_down(key('b', KeyModifiers::CONTROL)));
}

#[test]
fn included_commands_keep_their_order() {
    let config = SurfaceConfig {
        include_commands: Some(vec!["redo".into(), "undo".into(), "redo".into()]),
        exclude_commands: vec!["undo".into()],
        ..SurfaceConfig::default()
    };
    let h = harness_with(
        Vec::new(),
        config,
        &SurfaceDeps::with_defaults(Platform::default()),
    );
    assert_eq!(h.surface.commands(), &[CompactString::from("redo")]);
}

#[test]
fn action_dispatch_checks_method_table() {
    let mut h = harness(vec![Node::paragraph("abc")]);
    let unknown = Executable::Action {
        name: "content",
        method: "explode",
    };
    assert!(!h.surface.execute(unknown, &[]));
    let missing = Executable::Action {
        name: "nope",
        method: "insert",
    };
    assert!(!h.surface.execute(missing, &[]));

    // selectAll returns nothing, which counts as success.
    let select_all = Executable::Action {
        name: "content",
        method: "selectAll",
    };
    assert!(h.surface.execute(select_all, &[]));
    assert_eq!(
        h.surface.selection(),
        Selection::range(Position::new(0, 0), Position::new(0, 3))
    );
}

#[test]
fn tall_node_selection_does_not_scroll() {
    let mut h = harness(vec![Node::paragraph("a"), Node::paragraph("b")]);
    h.layout.update(|state| {
        state.focus_rect = Some(Rect::new(0.0, 700.0, 800.0, 900.0));
        state.scroll_top = 0.0;
    });
    h.surface.select(Selection::Node { node: 1 });
    assert!(h.layout.scrolls().is_empty());
    assert_eq!(h.layout.snapshot().scroll_top, 0.0);
    assert_eq!(count(&h.events, &SurfaceEvent::Scroll), 0);
}

#[test]
fn native_caret_scrolls_immediately_and_notifies() {
    let mut h = harness(vec![Node::paragraph("abc")]);
    h.layout.update(|state| state.focus_rect = Some(Rect::new(0.0, 640.0, 1.0, 20.0)));
    h.surface.select(Selection::caret(0, 1));
    // 660 - (600 - 5) = 65
    assert_eq!(h.layout.scrolls(), vec![(65.0, false)]);
    assert_eq!(count(&h.events, &SurfaceEvent::Scroll), 1);
}

#[test]
fn node_selection_scroll_is_animated_and_silent() {
    let mut h = harness(vec![Node::paragraph("abc")]);
    h.layout.update(|state| state.focus_rect = Some(Rect::new(0.0, 640.0, 100.0, 40.0)));
    h.surface.select(Selection::Node { node: 0 });
    assert_eq!(h.layout.scrolls(), vec![(85.0, true)]);
    assert_eq!(count(&h.events, &SurfaceEvent::Scroll), 0);
}

#[test]
fn position_events_scroll_after_debounce() {
    let mut h = harness(vec![Node::paragraph("abc")]);
    h.surface.select(Selection::caret(0, 0));
    h.layout.update(|state| state.focus_rect = Some(Rect::new(0.0, 640.0, 1.0, 20.0)));

    let t0 = Instant::now();
    h.surface.handle_view_event(ViewEvent::Position, t0);
    assert_eq!(count(&h.events, &SurfaceEvent::Position), 1);
    h.surface.tick(t0 + Duration::from_millis(100));
    assert!(h.layout.scrolls().is_empty());

    h.surface.tick(t0 + SCROLL_DEBOUNCE);
    assert_eq!(h.layout.scrolls().len(), 1);
}

#[test]
fn padding_merges_per_side() {
    let mut h = harness(Vec::new());
    let now = Instant::now();
    h.surface.set_padding(PaddingUpdate::bottom(7.0), now);
    h.surface.set_padding(PaddingUpdate::top(10.0), now);
    h.surface.set_padding(PaddingUpdate::left(5.0), now);
    assert_eq!(
        h.surface.padding(),
        Padding {
            top: 10.0,
            right: 0.0,
            bottom: 7.0,
            left: 5.0
        }
    );
}

#[test]
fn toolbar_dialog_resize_feeds_scroll_padding() {
    let mut h = harness(vec![Node::paragraph("abc")]);
    h.surface.select(Selection::caret(0, 0));
    h.layout.update(|state| state.focus_rect = Some(Rect::new(0.0, 520.0, 1.0, 20.0)));

    let t0 = Instant::now();
    h.surface
        .handle_toolbar_dialogs_resize(PaddingUpdate::bottom(100.0), t0);
    h.surface.tick(t0 + SCROLL_DEBOUNCE);
    // 540 - (600 - 105) = 45
    assert_eq!(h.layout.scrolls(), vec![(45.0, false)]);
}

#[test]
fn visible_padding_on_ios_includes_keyboard() {
    let deps = SurfaceDeps::with_defaults(Platform::mobile(Os::Ios));
    let mut h = harness_with(vec![Node::paragraph("x")], SurfaceConfig::default(), &deps);
    h.layout.update(|state| state.keyboard_height = 300.0);
    h.surface.set_padding(PaddingUpdate::bottom(20.0), Instant::now());
    assert_eq!(h.surface.visible_padding_bottom(), Some(320.0));

    h.surface.set_read_only(true);
    assert_eq!(h.surface.visible_padding_bottom(), Some(0.0));
}

#[test]
fn visible_padding_skipped_on_desktop_and_target_widgets() {
    let mut desktop = harness(Vec::new());
    desktop.surface.set_padding(PaddingUpdate::bottom(20.0), Instant::now());
    assert_eq!(desktop.surface.visible_padding_bottom(), None);

    let config = SurfaceConfig {
        in_target_widget: true,
        ..SurfaceConfig::default()
    };
    let deps = SurfaceDeps::with_defaults(Platform::mobile(Os::Android));
    let mut widget = harness_with(Vec::new(), config, &deps);
    widget.surface.set_padding(PaddingUpdate::bottom(20.0), Instant::now());
    assert_eq!(widget.surface.visible_padding_bottom(), None);
}

#[test]
fn docked_context_pads_the_bottom() {
    let deps = SurfaceDeps::with_defaults(Platform::mobile(Os::Android));
    let mut h = harness_with(vec![Node::paragraph("hello")], SurfaceConfig::default(), &deps);
    h.surface
        .select(Selection::range(Position::new(0, 0), Position::new(0, 5)));
    assert!(h.surface.context().is_visible());
    assert_eq!(h.surface.padding().bottom, crate::views::context::DEFAULT_CONTEXT_HEIGHT);

    h.surface.handle_context_resize(80.0, Instant::now());
    assert_eq!(h.surface.padding().bottom, 80.0);

    h.surface.select(Selection::caret(0, 1));
    assert_eq!(h.surface.padding().bottom, 0.0);
}

#[test]
fn read_only_releases_docked_context_inset() {
    let deps = SurfaceDeps::with_defaults(Platform::mobile(Os::Android));
    let mut h = harness_with(vec![Node::paragraph("hello")], SurfaceConfig::default(), &deps);
    h.surface
        .select(Selection::range(Position::new(0, 0), Position::new(0, 5)));
    assert_eq!(h.surface.padding().bottom, crate::views::context::DEFAULT_CONTEXT_HEIGHT);

    h.surface.set_read_only(true);
    assert!(!h.surface.context().is_visible());
    assert_eq!(h.surface.padding().bottom, 0.0);

    h.surface.set_read_only(false);
    assert!(h.surface.context().is_visible());
    assert_eq!(h.surface.padding().bottom, crate::views::context::DEFAULT_CONTEXT_HEIGHT);
}

#[test]
fn overlay_padding_widens_scroll_envelope() {
    let config = SurfaceConfig {
        overlay_padding: Padding {
            bottom: 100.0,
            ..Padding::default()
        },
        ..SurfaceConfig::default()
    };
    let deps = SurfaceDeps::with_defaults(Platform::default());
    let mut h = harness_with(vec![Node::paragraph("abc")], config, &deps);
    h.layout.update(|state| state.focus_rect = Some(Rect::new(0.0, 520.0, 1.0, 20.0)));

    h.surface.select(Selection::caret(0, 0));
    // 540 - (600 - 105) = 45
    assert_eq!(h.layout.scrolls(), vec![(45.0, false)]);
}

#[test]
fn progress_is_batched_into_one_dialog() {
    let mut h = harness(Vec::new());
    let t0 = Instant::now();
    let mut first = h.surface.create_progress(None, "Uploading", false, t0);
    let mut second = h.surface.create_progress(None, "Converting", true, t0);
    assert_eq!(h.surface.pending_progress(), 2);
    assert!(first.try_result().is_none());

    h.surface.tick(t0);
    assert_eq!(h.surface.pending_progress(), 0);
    assert_eq!(h.dialogs.opened(), vec!["progress".to_string()]);

    let mut descriptors = h.dialogs.take_progress();
    assert_eq!(descriptors.len(), 2);
    let converting = descriptors.pop().unwrap();
    let uploading = descriptors.pop().unwrap();
    assert!(uploading.resolve(ProgressBar::new("Uploading")));
    assert!(converting.cancel().is_ok());

    assert_eq!(first.try_result().unwrap().unwrap().label, "Uploading");
    assert_eq!(second.try_result(), Some(Err(ProgressError::Cancelled)));
}

#[test]
fn progress_receiver_resolves_as_future() {
    let mut h = harness(Vec::new());
    let t0 = Instant::now();
    let receiver = h.surface.create_progress(None, "Saving", false, t0);
    h.surface.tick(t0);
    for descriptor in h.dialogs.take_progress() {
        descriptor.resolve(ProgressBar::new("Saving"));
    }
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let bar = runtime.block_on(receiver).unwrap();
    assert_eq!(bar.label, "Saving");
}

#[test]
fn pending_progress_is_abandoned_on_destroy() {
    let mut h = harness(Vec::new());
    let mut receiver = h.surface.create_progress(None, "Never", true, Instant::now());
    h.surface.destroy();
    assert_eq!(receiver.try_result(), Some(Err(ProgressError::Abandoned)));
}

#[test]
fn blur_clears_selection_when_configured() {
    let mut h = harness(vec![Node::paragraph("abc")]);
    let now = Instant::now();
    h.surface.handle_view_event(ViewEvent::Focus, now);
    assert!(h.surface.view().is_focused());
    h.surface.select(Selection::caret(0, 1));

    h.surface.handle_view_event(ViewEvent::Blur, now);
    assert!(!h.surface.view().is_focused());
    assert!(h.surface.selection().is_null());
    assert_eq!(count(&h.events, &SurfaceEvent::Blur), 1);
}

#[test]
fn blur_keeps_selection_when_disabled() {
    let config = SurfaceConfig {
        null_selection_on_blur: false,
        ..SurfaceConfig::default()
    };
    let mut h = harness_with(
        vec![Node::paragraph("abc")],
        config,
        &SurfaceDeps::with_defaults(Platform::default()),
    );
    let now = Instant::now();
    h.surface.handle_view_event(ViewEvent::Focus, now);
    h.surface.select(Selection::caret(0, 1));
    h.surface.handle_view_event(ViewEvent::Blur, now);
    assert_eq!(h.surface.selection(), Selection::caret(0, 1));
}

#[test]
fn typed_sequence_converts_block() {
    let mut h = harness(vec![Node::paragraph("")]);
    h.surface.select(Selection::caret(0, 0));
    assert!(h.surface.insert_text("# ", "typing"));
    let model = h.surface.model().borrow();
    let node = &model.document().nodes()[0];
    assert_eq!(node.kind, NodeKind::Heading(1));
    assert_eq!(node.text, "");
}

#[test]
fn break_splits_multiline_surfaces() {
    let mut h = harness(vec![Node::heading(1, "TitleRest")]);
    h.surface.select(Selection::caret(0, 5));
    assert!(h.surface.handle_key_down(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT)));
    let model = h.surface.model().borrow();
    let nodes = model.document().nodes();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].text, "Title");
    assert_eq!(nodes[1].text, "Rest");
    assert_eq!(nodes[1].kind, NodeKind::Paragraph);
    assert_eq!(model.selection(), Selection::caret(1, 0));
}

#[test]
fn break_submits_single_line_surfaces() {
    let config = SurfaceConfig {
        multiline: false,
        ..SurfaceConfig::default()
    };
    let mut h = harness_with(
        vec![Node::paragraph("query")],
        config,
        &SurfaceDeps::with_defaults(Platform::default()),
    );
    h.surface.select(Selection::caret(0, 5));
    assert!(h.surface.handle_key_down(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT)));
    assert_eq!(count(&h.events, &SurfaceEvent::Submit), 1);
    assert_eq!(h.surface.model().borrow().document().len(), 1);
}

#[test]
fn shared_model_mirrors_read_only() {
    let deps = SurfaceDeps::with_defaults(Platform::default());
    let model = SurfaceModel::new(Document::new(vec![Node::paragraph("x")])).into_shared();
    let mut left = Surface::new(
        SurfaceInput::Model(Rc::clone(&model)),
        SurfaceConfig::default(),
        &deps,
        SurfaceHost::headless(),
    );
    let mut right = Surface::new(
        SurfaceInput::Model(Rc::clone(&model)),
        SurfaceConfig::default(),
        &deps,
        SurfaceHost::headless(),
    );
    assert!(Rc::ptr_eq(left.model(), right.model()));

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    right.on(move |e| sink.borrow_mut().push(e.clone()));

    left.set_read_only(true);
    right.pump();
    assert!(right.view().is_read_only());
    assert_eq!(count(&events, &SurfaceEvent::ReadOnly(true)), 1);
}

#[test]
fn destroy_is_idempotent_and_disconnects() {
    let mut h = harness(vec![Node::paragraph("x")]);
    assert_eq!(h.surface.model().borrow().subscriber_count(), 1);

    h.surface.destroy();
    h.surface.destroy();

    assert!(h.surface.is_destroyed());
    assert_eq!(count(&h.events, &SurfaceEvent::Destroy), 1);
    assert_eq!(h.surface.model().borrow().subscriber_count(), 0);
    assert!(h.surface.context().is_destroyed());
    assert!(h.surface.dialogs().is_destroyed());
    assert!(h.surface.toolbar_dialogs().is_destroyed());
    assert!(h.surface.view().is_destroyed());
    assert!(!h.surface.view().is_attached());
    assert!(!h.surface.execute(
        Executable::Action {
            name: "history",
            method: "undo"
        },
        &[]
    ));
}

struct RecordingWindows {
    name: &'static str,
    log: Rc<RefCell<Vec<&'static str>>>,
    destroyed: bool,
}

impl WindowManager for RecordingWindows {
    fn open_window(&mut self, _name: &str, _data: WindowData) -> Result<WindowHandle, WindowError> {
        Err(WindowError::Unknown(self.name.to_string()))
    }

    fn close_window(&mut self, _name: &str) -> bool {
        false
    }

    fn is_open(&self, _name: &str) -> bool {
        false
    }

    fn destroy(&mut self) {
        self.destroyed = true;
        self.log.borrow_mut().push(self.name);
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

#[test]
fn destroy_releases_parts_in_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let windows = |name: &'static str| {
        Box::new(RecordingWindows {
            name,
            log: Rc::clone(&log),
            destroyed: false,
        }) as Box<dyn WindowManager>
    };
    let host = SurfaceHost {
        layout: Box::new(StaticLayout::default()),
        dialogs: windows("dialogs"),
        toolbar_dialogs: windows("toolbar_dialogs"),
    };
    let mut surface = Surface::new(
        SurfaceInput::Document(Document::new(vec![Node::paragraph("x")])),
        SurfaceConfig::default(),
        &SurfaceDeps::with_defaults(Platform::default()),
        host,
    );
    surface.initialize();
    let sink = Rc::clone(&log);
    surface.on(move |event| {
        if *event == SurfaceEvent::Destroy {
            sink.borrow_mut().push("destroy");
        }
    });

    surface.destroy();
    surface.destroy();

    assert_eq!(*log.borrow(), vec!["dialogs", "toolbar_dialogs", "destroy"]);
    assert!(surface.context().is_destroyed());
    assert!(surface.view().is_destroyed());
    assert!(!surface.view().is_attached());
}

#[test]
fn html_source_mode_builds_preformatted() {
    let config = SurfaceConfig {
        mode: SurfaceMode::Source,
        ..SurfaceConfig::default()
    };
    let surface = Surface::new(
        SurfaceInput::Html("a\nb".to_string()),
        config,
        &SurfaceDeps::with_defaults(Platform::default()),
        SurfaceHost::headless(),
    );
    assert_eq!(surface.mode(), SurfaceMode::Source);
    assert_eq!(surface.html(), "<pre>a</pre><pre>b</pre>");
}
