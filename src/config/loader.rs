//! Transactional loading of tool configuration files.
//!
//! A load either returns a complete [`ToolConfig`] or a single
//! [`Diagnostic`] for the first problem found. Nothing the caller already
//! holds is touched in either case; publishing the result is the caller's
//! move (see [`crate::tools::SharedToolConfig`]).

use super::error::Diagnostic;
use super::parser::parse_config;
use crate::paint::PaintContextFactory;
use crate::tools::ToolConfig;
use log::{debug, info, warn};
use std::fs;
use std::path::Path;
use std::sync::Arc;

pub type LoadResult = Result<ToolConfig, Diagnostic>;

/// Reads and parses the config file at `path`.
///
/// An unreadable file is reported as [`ErrorKind::Io`](super::ErrorKind::Io)
/// before any parsing happens. Bytes that are not valid UTF-8 are replaced
/// with U+FFFD, so legacy-encoded comments and names still load while a
/// stray byte in the statement text is a lexical error on its own line.
pub fn load(path: &Path, factory: &Arc<dyn PaintContextFactory>) -> LoadResult {
    let bytes = fs::read(path).map_err(|source| Diagnostic::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let source = match String::from_utf8(bytes) {
        Ok(source) => source,
        Err(err) => {
            warn!(
                "{} is not valid UTF-8, replacing invalid bytes",
                path.display()
            );
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    };
    load_str(&source, path, factory)
}

/// Parses config text. `name` is only used to label diagnostics.
pub fn load_str(
    source: &str,
    name: impl AsRef<Path>,
    factory: &Arc<dyn PaintContextFactory>,
) -> LoadResult {
    let name = name.as_ref();
    match parse_config(source, factory) {
        Ok(config) => {
            info!(
                "Loaded {} tool(s) from {}",
                config.tools.len(),
                name.display()
            );
            debug!("Hotkeys: {:?}", config.bindings);
            Ok(config)
        }
        Err(err) => Err(Diagnostic::parse(name, err)),
    }
}

/// Loads `path`, or the built-in tools if that fails.
///
/// The returned diagnostic, if any, explains why the fallback was used.
pub fn load_or_fallback(
    path: Option<&Path>,
    factory: &Arc<dyn PaintContextFactory>,
) -> (ToolConfig, Option<Diagnostic>) {
    let Some(path) = path else {
        warn!("No usable config file found, falling back to default tools");
        return (ToolConfig::fallback(factory), None);
    };

    match load(path, factory) {
        Ok(config) => (config, None),
        Err(diagnostic) => {
            warn!("{diagnostic}");
            warn!(
                "Failed parsing config file {}, falling back to default tools",
                path.display()
            );
            (ToolConfig::fallback(factory), Some(diagnostic))
        }
    }
}
