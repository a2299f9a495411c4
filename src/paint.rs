//! Paint-context factory seam.
//!
//! The painting subsystem turns a validated [`StyleDef`] into a
//! rendering-ready context. The tool table only keeps an opaque
//! [`ContextHandle`] to it; dropping the last clone of a handle gives the
//! context back to the factory that made it, so tables that are discarded
//! (a failed load, a replaced definition, an old table after a reload) never
//! leak factory-side resources.

use crate::tools::StyleDef;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Factory-assigned identity of a paint context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(pub u64);

/// Abstraction over the painting subsystem's context constructor.
///
/// Creation is infallible: styles are validated before they reach the
/// factory.
pub trait PaintContextFactory: Send + Sync {
    fn create_paint_context(&self, style: &StyleDef) -> ContextId;

    fn release_paint_context(&self, id: ContextId);
}

/// Shared, reference-counted handle to a paint context.
///
/// Clones refer to the same context; the context is released exactly once,
/// when the last clone is dropped.
#[derive(Clone)]
pub struct ContextHandle {
    inner: Arc<HandleInner>,
}

struct HandleInner {
    id: ContextId,
    factory: Arc<dyn PaintContextFactory>,
}

impl ContextHandle {
    /// Asks `factory` for a new context built from `style`.
    pub fn create(factory: &Arc<dyn PaintContextFactory>, style: &StyleDef) -> Self {
        let id = factory.create_paint_context(style);
        Self {
            inner: Arc::new(HandleInner {
                id,
                factory: Arc::clone(factory),
            }),
        }
    }

    pub fn id(&self) -> ContextId {
        self.inner.id
    }
}

impl Drop for HandleInner {
    fn drop(&mut self) {
        self.factory.release_paint_context(self.id);
    }
}

impl fmt::Debug for ContextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContextHandle").field(&self.inner.id).finish()
    }
}

/// In-process factory that records the style of every live context.
///
/// Used where no renderer is attached (the command-line front end, tests);
/// a renderer would look its own resources up by [`ContextId`] the same way.
#[derive(Default)]
pub struct ContextRegistry {
    next_id: AtomicU64,
    live: Mutex<HashMap<ContextId, StyleDef>>,
}

impl ContextRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of contexts created and not yet released.
    pub fn live_count(&self) -> usize {
        self.live.lock().map(|live| live.len()).unwrap_or(0)
    }

    /// Style a live context was created from.
    pub fn style_of(&self, id: ContextId) -> Option<StyleDef> {
        self.live
            .lock()
            .ok()
            .and_then(|live| live.get(&id).cloned())
    }
}

impl PaintContextFactory for ContextRegistry {
    fn create_paint_context(&self, style: &StyleDef) -> ContextId {
        let id = ContextId(self.next_id.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut live) = self.live.lock() {
            live.insert(id, style.clone());
        }
        debug!("Created paint context {:?} for {} tool", id, style.tool);
        id
    }

    fn release_paint_context(&self, id: ContextId) {
        if let Ok(mut live) = self.live.lock() {
            live.remove(&id);
        }
        debug!("Released paint context {:?}", id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolKind;

    #[test]
    fn last_clone_releases_context() {
        let registry = Arc::new(ContextRegistry::new());
        let factory: Arc<dyn PaintContextFactory> = registry.clone();
        let style = StyleDef::defaults_for(ToolKind::Line);

        let handle = ContextHandle::create(&factory, &style);
        let copy = handle.clone();
        assert_eq!(registry.live_count(), 1);
        assert_eq!(registry.style_of(handle.id()), Some(style));

        drop(handle);
        assert_eq!(registry.live_count(), 1);

        drop(copy);
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn ids_are_unique() {
        let registry = Arc::new(ContextRegistry::new());
        let factory: Arc<dyn PaintContextFactory> = registry.clone();
        let style = StyleDef::defaults_for(ToolKind::Pen);

        let a = ContextHandle::create(&factory, &style);
        let b = ContextHandle::create(&factory, &style);
        assert_ne!(a.id(), b.id());
        assert_eq!(registry.live_count(), 2);
    }
}
