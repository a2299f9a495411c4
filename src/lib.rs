//! Tool and hotkey configuration for the inkscribe annotation overlay.
//!
//! The library side parses `tools.cfg` into a [`ToolConfig`], hands each tool
//! a paint context through a [`PaintContextFactory`], and keeps the active
//! table behind a [`SharedToolConfig`] so reloads can swap it atomically.

pub mod config;
pub mod draw;
pub mod paint;
pub mod tools;

pub use config::{Diagnostic, Settings};
pub use paint::{ContextRegistry, PaintContextFactory};
pub use tools::{SharedToolConfig, ToolConfig, ToolEntry};
