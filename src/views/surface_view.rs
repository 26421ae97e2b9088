//! Surface view: the editable render tree mirroring the surface model.
//!
//! Responsibilities:
//! - re-render from the model after every transaction
//! - activation / focus / read-only state of the editable root
//! - placeholder presentation

use crate::kernel::services::ports::SurfaceMode;
use crate::models::{DocumentId, Node, NodeKind, SurfaceModel};

const DEBUG_STYLE: &str = "outline: 1px dashed #a2a9b1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// Layout of the editable content moved (reflow, image load, IME).
    Position,
    Focus,
    Blur,
    Activation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNode {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub text: String,
    /// Inline style only present while debugging.
    pub debug_style: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderElement {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub text: String,
}

#[derive(Debug)]
pub struct SurfaceView {
    document_id: DocumentId,
    mode: SurfaceMode,
    attached_root: Option<usize>,
    nodes: Vec<RenderedNode>,
    read_only: bool,
    deactivated: bool,
    focused: bool,
    placeholder: Option<PlaceholderElement>,
    debug: bool,
    attached: bool,
    initialized: bool,
    destroyed: bool,
}

impl SurfaceView {
    pub fn new(
        model: &SurfaceModel,
        mode: SurfaceMode,
        attached_root: Option<usize>,
        debug: bool,
    ) -> Self {
        let mut view = Self {
            document_id: model.document().id(),
            mode,
            attached_root,
            nodes: Vec::new(),
            read_only: model.is_read_only(),
            deactivated: false,
            focused: false,
            placeholder: None,
            debug,
            attached: true,
            initialized: false,
            destroyed: false,
        };
        view.render(model);
        view
    }

    pub fn initialize(&mut self) {
        self.initialized = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn render(&mut self, model: &SurfaceModel) {
        let document = model.document();
        self.document_id = document.id();
        let nodes: Vec<&Node> = match self.attached_root {
            Some(root) => document.node(root).into_iter().collect(),
            None => document.nodes().iter().collect(),
        };
        self.nodes = nodes
            .into_iter()
            .map(|node| RenderedNode {
                tag: node.kind.tag(),
                classes: node_classes(node),
                text: node.text.clone(),
                debug_style: self.debug.then(|| DEBUG_STYLE.to_string()),
            })
            .collect();
    }

    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }

    pub fn mode(&self) -> SurfaceMode {
        self.mode
    }

    pub fn nodes(&self) -> &[RenderedNode] {
        &self.nodes
    }

    pub fn classes(&self) -> Vec<String> {
        let mut classes = vec![
            "ve-ce-surface".to_string(),
            format!("ve-ce-surface-{}", self.mode.name()),
        ];
        if self.read_only {
            classes.push("ve-ce-surface-readOnly".to_string());
        }
        if self.deactivated {
            classes.push("ve-ce-surface-deactivated".to_string());
        }
        classes
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn is_active(&self) -> bool {
        !self.deactivated
    }

    /// Returns whether the state changed.
    pub fn activate(&mut self) -> bool {
        let changed = self.deactivated;
        self.deactivated = false;
        changed
    }

    pub fn deactivate(&mut self) -> bool {
        let changed = !self.deactivated;
        self.deactivated = true;
        changed
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn placeholder(&self) -> Option<&PlaceholderElement> {
        self.placeholder.as_ref()
    }

    pub fn is_placeholder_visible(&self) -> bool {
        self.placeholder.is_some()
    }

    /// Shows `text` styled like the first rendered node, or hides the placeholder.
    pub fn update_placeholder(&mut self, text: Option<&str>, visible: bool) {
        let Some(text) = text.filter(|_| visible) else {
            self.placeholder = None;
            return;
        };

        // Cloning drops `debug_style`; only tag and classes carry over.
        let (tag, mut classes) = match self.nodes.first() {
            Some(first) => (first.tag, first.classes.clone()),
            None => ("div", Vec::new()),
        };
        classes.push("ve-ce-surface-placeholder".to_string());
        self.placeholder = Some(PlaceholderElement {
            tag,
            classes,
            text: text.to_string(),
        });
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.focused = false;
        self.placeholder = None;
        self.nodes.clear();
    }
}

fn node_classes(node: &Node) -> Vec<String> {
    let kind = match node.kind {
        NodeKind::Paragraph => "paragraph",
        NodeKind::Heading(_) => "heading",
        NodeKind::Preformatted => "preformatted",
    };
    let mut classes = vec![format!("ve-ce-{kind}Node")];
    classes.extend(node.marks.iter().map(|m| format!("ve-ce-mark-{m}")));
    classes
}

#[cfg(test)]
#[path = "../../tests/unit/views/surface_view.rs"]
mod tests;
