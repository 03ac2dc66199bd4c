//! Scoped registration of page-level event listeners.
//!
//! Components that react to input outside their own bounds (an outside press
//! closing a revealed card) register a listener with the page's
//! [`ListenerRegistry`] and keep the returned [`ListenerGuard`]. Dropping the
//! guard deregisters the listener, so every exit path (state reset, early
//! teardown, panic unwinding) releases it.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Page-level events a component can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ListenerKind {
    /// `mousedown` / `touchstart` anywhere on the document.
    OutsidePress,
    /// Window resize (layout may flip between desktop and mobile).
    Resize,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    active: BTreeMap<u64, ListenerKind>,
}

/// Shared, single-threaded registry. Cloning shares the same registry.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<Inner>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it stays registered while the guard lives.
    pub fn register(&self, kind: ListenerKind) -> ListenerGuard {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.active.insert(id, kind);
        tracing::trace!(id, ?kind, "listener registered");
        ListenerGuard {
            id,
            registry: Rc::clone(&self.inner),
        }
    }

    pub fn active_count(&self) -> usize {
        self.inner.borrow().active.len()
    }

    pub fn count_of(&self, kind: ListenerKind) -> usize {
        self.inner
            .borrow()
            .active
            .values()
            .filter(|k| **k == kind)
            .count()
    }
}

/// Live registration. Deregisters on drop.
#[derive(Debug)]
pub struct ListenerGuard {
    id: u64,
    registry: Rc<RefCell<Inner>>,
}

impl ListenerGuard {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.registry.try_borrow_mut() {
            inner.active.remove(&self.id);
            tracing::trace!(id = self.id, "listener deregistered");
        }
    }
}
