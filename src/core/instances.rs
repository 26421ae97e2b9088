//! Registry of live targets and the currently active one.
//!
//! Injected into every `Target` instead of a process-wide singleton. Clones
//! share the same registry.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct TargetId;
}

#[derive(Debug, Default)]
struct Instances {
    targets: SlotMap<TargetId, ()>,
    active: Option<TargetId>,
}

#[derive(Debug, Clone, Default)]
pub struct InstanceRegistry {
    inner: Rc<RefCell<Instances>>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new target and makes it active.
    pub fn register(&self) -> TargetId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.targets.insert(());
        inner.active = Some(id);
        id
    }

    pub fn deregister(&self, id: TargetId) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.active == Some(id) {
            inner.active = None;
        }
        inner.targets.remove(id).is_some()
    }

    pub fn contains(&self, id: TargetId) -> bool {
        self.inner.borrow().targets.contains_key(id)
    }

    pub fn active(&self) -> Option<TargetId> {
        self.inner.borrow().active
    }

    pub fn set_active(&self, id: TargetId) -> bool {
        let mut inner = self.inner.borrow_mut();
        if !inner.targets.contains_key(id) {
            return false;
        }
        inner.active = Some(id);
        true
    }

    /// Clears the active reference only if it still points at `id`.
    pub fn clear_active(&self, id: TargetId) {
        let mut inner = self.inner.borrow_mut();
        if inner.active == Some(id) {
            inner.active = None;
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().targets.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/instances.rs"]
mod tests;
