//! Application-wide authoritative tool configuration.

use super::{ToolConfig, ToolEntry};
use crate::config::{Diagnostic, loader};
use crate::paint::PaintContextFactory;
use log::{info, warn};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Holds the currently published [`ToolConfig`].
///
/// Readers take an `Arc` snapshot and keep using it for as long as they like;
/// a reload builds a complete new config off to the side and publishes it
/// with a single swap, so no reader ever sees a partially loaded table.
#[derive(Debug, Default)]
pub struct SharedToolConfig {
    current: RwLock<Arc<ToolConfig>>,
}

impl SharedToolConfig {
    pub fn new(config: ToolConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// Returns the currently published config.
    pub fn snapshot(&self) -> Arc<ToolConfig> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Publishes `config`, returning the previously published one.
    pub fn publish(&self, config: ToolConfig) -> Arc<ToolConfig> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(config))
    }

    /// Loads `path` and publishes the result if, and only if, it loaded
    /// cleanly. On failure the published config is left untouched.
    pub fn reload(
        &self,
        path: &Path,
        factory: &Arc<dyn PaintContextFactory>,
    ) -> Result<(), Diagnostic> {
        match loader::load(path, factory) {
            Ok(config) => {
                info!(
                    "Publishing {} tool(s) from {}",
                    config.tools.len(),
                    path.display()
                );
                self.publish(config);
                Ok(())
            }
            Err(diagnostic) => {
                warn!("Keeping previous tool configuration: {diagnostic}");
                Err(diagnostic)
            }
        }
    }

    pub fn lookup_tool(&self, id: &str) -> Option<ToolEntry> {
        self.snapshot().lookup_tool(id).cloned()
    }

    pub fn toggle_key(&self) -> Option<String> {
        self.snapshot().toggle_key().map(str::to_owned)
    }

    pub fn undo_key(&self) -> Option<String> {
        self.snapshot().undo_key().map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::ContextRegistry;
    use crate::tools::ToolKind;
    use std::fs;
    use tempfile::TempDir;

    fn registry() -> (Arc<ContextRegistry>, Arc<dyn PaintContextFactory>) {
        let registry = Arc::new(ContextRegistry::new());
        let factory: Arc<dyn PaintContextFactory> = registry.clone();
        (registry, factory)
    }

    #[test]
    fn failed_reload_keeps_published_config() {
        let (registry, factory) = registry();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tools.cfg");

        fs::write(&path, "\"pen\" line (width=3);\nhotkey = \"F9\";\n").unwrap();
        let shared = SharedToolConfig::default();
        shared.reload(&path, &factory).unwrap();
        assert_eq!(registry.live_count(), 1);

        fs::write(&path, "\"pen\" arrow;\n\"other\" bogus;\n").unwrap();
        let err = shared.reload(&path, &factory).unwrap_err();
        assert_eq!(err.line(), Some(2));

        let pen = shared.lookup_tool("pen").unwrap();
        assert_eq!(pen.tool(), ToolKind::Line);
        assert_eq!(pen.width(), 3);
        assert_eq!(shared.toggle_key().as_deref(), Some("F9"));
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn old_contexts_released_once_last_snapshot_drops() {
        let (registry, factory) = registry();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tools.cfg");

        fs::write(&path, "\"a\" pen; \"b\" eraser;").unwrap();
        let shared = SharedToolConfig::default();
        shared.reload(&path, &factory).unwrap();
        let held = shared.snapshot();

        fs::write(&path, "\"c\" line;").unwrap();
        shared.reload(&path, &factory).unwrap();
        assert_eq!(registry.live_count(), 3);
        assert!(held.lookup_tool("a").is_some());

        drop(held);
        assert_eq!(registry.live_count(), 1);
        assert!(shared.lookup_tool("a").is_none());
        assert!(shared.lookup_tool("c").is_some());
    }
}
