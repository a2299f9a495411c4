//! Key binding strings used by the `hotkey` and `undokey` assignments.
//!
//! A binding is a key name with optional modifiers, e.g. `F9`, `BackSpace`
//! or `Ctrl+Shift+Z`.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyBindingError {
    #[error("empty key name")]
    Empty,

    #[error("no key after modifiers in '{0}'")]
    MissingKey(String),
}

/// A key name plus the modifiers that must be held with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parses `"Ctrl+Shift+Z"`, `"F9"` and the like.
    ///
    /// Modifier names are case-insensitive and may come in any order; spaces
    /// around `+` are ignored. A trailing `++` names the `+` key itself.
    pub fn parse(spec: &str) -> Result<Self, KeyBindingError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(KeyBindingError::Empty);
        }

        let mut binding = Self {
            key: String::new(),
            ctrl: false,
            shift: false,
            alt: false,
        };

        let mut rest = spec;
        while let Some((head, tail)) = rest.split_once('+') {
            let modifier = head.trim();
            match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => binding.ctrl = true,
                "shift" => binding.shift = true,
                "alt" | "mod1" => binding.alt = true,
                // "Ctrl++" or a bare "+": the key is '+'
                "" if tail.trim().is_empty() => {
                    rest = "+";
                    break;
                }
                _ => break,
            }
            rest = tail;
        }

        let key = rest.trim();
        if key.is_empty() {
            return Err(KeyBindingError::MissingKey(spec.to_string()));
        }
        binding.key = key.to_string();
        Ok(binding)
    }

    /// Whether a key event with the given modifier state triggers this
    /// binding. Key names compare case-insensitively.
    ///
    /// Called by the overlay's key handler for the toggle and undo keys.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        if self.alt {
            f.write_str("Alt+")?;
        }
        f.write_str(&self.key)
    }
}
