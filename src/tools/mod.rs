//! Committed tool configuration: the tool table and hotkey bindings.
//!
//! Values here are produced by the loader in [`crate::config`] and read by the
//! painting and input subsystems. A [`ToolConfig`] is immutable once built;
//! reconfiguration replaces it wholesale through [`SharedToolConfig`].

pub mod kind;
pub mod shared;
pub mod style;

pub use kind::ToolKind;
pub use shared::SharedToolConfig;
pub use style::StyleDef;

use crate::config::keybindings::KeyBinding;
use crate::draw::Color;
use crate::paint::{ContextHandle, PaintContextFactory};
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::sync::Arc;

/// Toggle key used when neither the config file nor the command line set one.
pub const DEFAULT_HOTKEY: &str = "F9";

/// Undo key used when neither the config file nor the command line set one.
pub const DEFAULT_UNDOKEY: &str = "F10";

/// Identifier the built-in pen is registered under.
pub const FALLBACK_TOOL: &str = "default";

/// Identifier the built-in eraser is registered under.
pub const FALLBACK_ERASER: &str = "default:eraser";

/// Tool identifier as written in the config file.
///
/// The identifier is opaque: lookups use the exact string. When it has the
/// compound `device:tool` form, [`ToolId::device`] and [`ToolId::tool_class`]
/// expose the two halves (split at the first `:`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToolId(String);

impl ToolId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Input device part of a `device:tool` identifier, or the whole
    /// identifier when there is no `:`.
    pub fn device(&self) -> &str {
        self.0.split_once(':').map_or(&self.0, |(device, _)| device)
    }

    /// Tool class after the first `:` (e.g. `eraser` in `Wacom Pen:eraser`).
    pub fn tool_class(&self) -> Option<&str> {
        self.0.split_once(':').map(|(_, class)| class)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// One committed tool: its style and the paint context built from it.
#[derive(Debug, Clone, Serialize)]
pub struct ToolEntry {
    #[serde(flatten)]
    style: StyleDef,
    #[serde(skip)]
    context: ContextHandle,
}

impl ToolEntry {
    /// Builds the paint context for `style` and wraps both into an entry.
    pub fn create(style: StyleDef, factory: &Arc<dyn PaintContextFactory>) -> Self {
        let context = ContextHandle::create(factory, &style);
        Self { style, context }
    }

    pub fn style(&self) -> &StyleDef {
        &self.style
    }

    pub fn tool(&self) -> ToolKind {
        self.style.tool
    }

    pub fn color(&self) -> Option<Color> {
        self.style.color
    }

    pub fn width(&self) -> u32 {
        self.style.width
    }

    pub fn arrowsize(&self) -> f64 {
        self.style.arrowsize
    }

    pub fn minwidth(&self) -> u32 {
        self.style.minwidth
    }

    pub fn maxwidth(&self) -> u32 {
        self.style.maxwidth
    }

    pub fn context(&self) -> &ContextHandle {
        &self.context
    }
}

/// Mapping from tool identifier to committed tool entry.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ToolTable {
    entries: BTreeMap<String, ToolEntry>,
}

impl ToolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `entry` under `id`, returning the entry it replaced.
    pub fn insert(&mut self, id: ToolId, entry: ToolEntry) -> Option<ToolEntry> {
        self.entries.insert(id.into_string(), entry)
    }

    pub fn get(&self, id: &str) -> Option<&ToolEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries ordered by identifier.
    pub fn iter(&self) -> btree_map::Iter<'_, String, ToolEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ToolTable {
    type Item = (&'a String, &'a ToolEntry);
    type IntoIter = btree_map::Iter<'a, String, ToolEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Key names bound to toggling the overlay and to undoing the last stroke.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HotkeyBindings {
    pub toggle: Option<String>,
    pub undo: Option<String>,
}

impl HotkeyBindings {
    /// Parsed toggle binding. Values set by the loader always parse.
    pub fn toggle_binding(&self) -> Option<KeyBinding> {
        self.toggle.as_deref().and_then(|key| KeyBinding::parse(key).ok())
    }

    /// Parsed undo binding. Values set by the loader always parse.
    pub fn undo_binding(&self) -> Option<KeyBinding> {
        self.undo.as_deref().and_then(|key| KeyBinding::parse(key).ok())
    }
}

/// Result of a successful load: every tool plus the hotkey bindings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ToolConfig {
    pub tools: ToolTable,
    pub bindings: HotkeyBindings,
}

impl ToolConfig {
    /// Built-in configuration used when no usable config file exists: a red
    /// pen and an eraser, no hotkeys.
    pub fn fallback(factory: &Arc<dyn PaintContextFactory>) -> Self {
        let mut tools = ToolTable::new();
        tools.insert(
            ToolId::new(FALLBACK_TOOL),
            ToolEntry::create(StyleDef::defaults_for(ToolKind::Pen), factory),
        );
        tools.insert(
            ToolId::new(FALLBACK_ERASER),
            ToolEntry::create(StyleDef::defaults_for(ToolKind::Eraser), factory),
        );
        Self {
            tools,
            bindings: HotkeyBindings::default(),
        }
    }

    pub fn lookup_tool(&self, id: &str) -> Option<&ToolEntry> {
        self.tools.get(id)
    }

    pub fn toggle_key(&self) -> Option<&str> {
        self.bindings.toggle.as_deref()
    }

    pub fn undo_key(&self) -> Option<&str> {
        self.bindings.undo.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::ContextRegistry;

    #[test]
    fn tool_id_splits_compound_form_at_first_colon() {
        let id = ToolId::new("Wacom Pen:eraser:tip");
        assert_eq!(id.device(), "Wacom Pen");
        assert_eq!(id.tool_class(), Some("eraser:tip"));
        assert_eq!(id.as_str(), "Wacom Pen:eraser:tip");

        let plain = ToolId::new("mouse");
        assert_eq!(plain.device(), "mouse");
        assert_eq!(plain.tool_class(), None);
    }

    #[test]
    fn replacing_an_entry_releases_its_context() {
        let registry = Arc::new(ContextRegistry::new());
        let factory: Arc<dyn PaintContextFactory> = registry.clone();
        let mut table = ToolTable::new();

        table.insert(
            ToolId::new("pen"),
            ToolEntry::create(StyleDef::defaults_for(ToolKind::Pen), &factory),
        );
        let replaced = table.insert(
            ToolId::new("pen"),
            ToolEntry::create(StyleDef::defaults_for(ToolKind::Eraser), &factory),
        );
        assert!(replaced.is_some());
        drop(replaced);

        assert_eq!(table.len(), 1);
        assert_eq!(registry.live_count(), 1);
        assert_eq!(table.get("pen").map(ToolEntry::tool), Some(ToolKind::Eraser));
    }

    #[test]
    fn fallback_has_pen_and_eraser() {
        let registry = Arc::new(ContextRegistry::new());
        let factory: Arc<dyn PaintContextFactory> = registry.clone();
        let config = ToolConfig::fallback(&factory);

        assert_eq!(
            config.lookup_tool(FALLBACK_TOOL).map(ToolEntry::tool),
            Some(ToolKind::Pen)
        );
        assert_eq!(
            config.lookup_tool(FALLBACK_ERASER).map(ToolEntry::tool),
            Some(ToolKind::Eraser)
        );
        assert_eq!(config.toggle_key(), None);
        assert_eq!(registry.live_count(), 2);
    }

    #[test]
    fn bindings_expose_parsed_keys() {
        let bindings = HotkeyBindings {
            toggle: Some("Ctrl+F9".to_string()),
            undo: None,
        };
        let toggle = bindings.toggle_binding().unwrap();
        assert_eq!(toggle.key, "F9");
        assert!(toggle.ctrl);
        assert!(bindings.undo_binding().is_none());
    }
}
