//! Persisted UI preferences.
//!
//! These live in `~/.config/inkscribe/settings.toml`, separate from the tool
//! configuration, and are rewritten by the application itself (e.g. when the
//! user dismisses the intro). Missing or broken files never stop startup:
//! defaults are used instead.

use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.toml";

/// Overlay opacity used when none is stored.
pub const DEFAULT_OPACITY: f64 = 0.75;

/// Root of the settings file.
///
/// # Example TOML
/// ```toml
/// [general]
/// show_intro_on_startup = false
///
/// [drawing]
/// opacity = 0.9
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct Settings {
    #[serde(default)]
    pub general: GeneralSettings,

    #[serde(default)]
    pub drawing: DrawingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeneralSettings {
    /// Show the introduction window when the overlay starts
    #[serde(default = "default_show_intro")]
    pub show_intro_on_startup: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            show_intro_on_startup: default_show_intro(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DrawingSettings {
    /// Overlay opacity (0.0 - 1.0); 0.0 means "not set"
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl Default for DrawingSettings {
    fn default() -> Self {
        Self {
            opacity: default_opacity(),
        }
    }
}

fn default_show_intro() -> bool {
    true
}

fn default_opacity() -> f64 {
    DEFAULT_OPACITY
}

impl Settings {
    /// Default location of the settings file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        Ok(super::config_dir()?.join(SETTINGS_FILE))
    }

    /// Loads settings from `path`.
    ///
    /// A missing file silently yields defaults. An unreadable or malformed
    /// file is logged and also yields defaults.
    pub fn load_from(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(err) => {
                warn!("Error loading settings file {}: {err}", path.display());
                return Self::default();
            }
        };

        let mut settings: Settings = match toml::from_str(&text) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("Error parsing settings file {}: {err}", path.display());
                return Self::default();
            }
        };

        settings.validate_and_clamp();
        debug!("Settings: {:?}", settings);
        settings
    }

    /// Writes settings to `path`, creating the parent directory if needed.
    ///
    /// The overlay calls this on exit to persist preferences such as a
    /// dismissed intro. A read-only existing file is left alone with a
    /// warning.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the settings
    /// cannot be serialized, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Ok(metadata) = fs::metadata(path) {
            if metadata.permissions().readonly() {
                warn!("Not overwriting read-only settings file {}", path.display());
                return Ok(());
            }
        }

        let parent = path
            .parent()
            .ok_or_else(|| anyhow!("Settings path {} has no parent", path.display()))?;
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;

        let text = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, text)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;

        info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// JSON schema describing the settings file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Settings)
    }

    fn validate_and_clamp(&mut self) {
        let opacity = self.drawing.opacity;
        // 0.0 is what an unset value used to read back as
        if opacity == 0.0 {
            self.drawing.opacity = DEFAULT_OPACITY;
        } else if !(0.0..=1.0).contains(&opacity) {
            warn!("Invalid opacity {opacity:.2}, clamping to 0.0-1.0 range");
            self.drawing.opacity = opacity.clamp(0.0, 1.0);
        }
    }
}
