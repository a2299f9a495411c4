//! Tool configuration language and settings files.
//!
//! Tools and hotkeys are read from `tools.cfg`, a small statement-oriented
//! language:
//!
//! ```text
//! # device:tool   type   style
//! "mouse:left"    line   (width=4, color="red");
//! "Wacom Pen"     pen    (color="#3366ff", minwidth=2, maxwidth=20);
//! "Wacom Eraser"  eraser;
//! hotkey  = "F9";
//! undokey = "F10";
//! ```
//!
//! The user's file (`~/.config/inkscribe/tools.cfg`) is preferred over the
//! system-wide one (`/etc/inkscribe/tools.cfg`). Loading is all-or-nothing:
//! see [`loader`].

pub mod error;
pub mod keybindings;
pub mod lexer;
pub mod loader;
pub mod parser;
pub mod settings;
pub mod style;
pub mod symbols;

pub use error::{Diagnostic, ErrorKind, LexError, ParseError};
pub use keybindings::KeyBinding;
pub use loader::{LoadResult, load, load_or_fallback, load_str};
pub use settings::Settings;

use anyhow::{Context, Result};
use log::debug;
use std::path::PathBuf;

pub const APP_DIR: &str = "inkscribe";

pub const TOOL_CONFIG_FILE: &str = "tools.cfg";

/// System-wide configuration directory.
pub const SYSTEM_CONFIG_DIR: &str = "/etc/inkscribe";

/// Returns the per-user configuration directory (`~/.config/inkscribe`).
///
/// # Errors
/// Returns an error if the config directory cannot be determined (e.g., HOME not set).
pub fn config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Could not find config directory")?
        .join(APP_DIR))
}

/// Tool config locations in order of preference: user, then system.
pub fn tool_config_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(2);
    match config_dir() {
        Ok(dir) => candidates.push(dir.join(TOOL_CONFIG_FILE)),
        Err(err) => debug!("Skipping user tool config: {err:#}"),
    }
    candidates.push(PathBuf::from(SYSTEM_CONFIG_DIR).join(TOOL_CONFIG_FILE));
    candidates
}

/// First existing tool config on the search path.
pub fn locate_tool_config() -> Option<PathBuf> {
    tool_config_candidates().into_iter().find(|path| {
        let found = path.is_file();
        if found {
            debug!("Using tool config {}", path.display());
        } else {
            debug!("No tool config at {}", path.display());
        }
        found
    })
}
