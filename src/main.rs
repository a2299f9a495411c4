use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use inkscribe::config::{self, Settings};
use inkscribe::paint::{ContextRegistry, PaintContextFactory};
use inkscribe::tools::{DEFAULT_HOTKEY, DEFAULT_UNDOKEY, ToolEntry, ToolId, ToolTable, style};
use log::{debug, info, warn};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("INKSCRIBE_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "inkscribe")]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Tool and hotkey configuration loader for screen annotation overlays"
)]
struct Cli {
    /// Tool config to load instead of searching the default locations
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Key that toggles the overlay (overrides the config file)
    #[arg(long, short = 'k', value_name = "NAME")]
    key: Option<String>,

    /// Raw keycode that toggles the overlay (overrides --key)
    #[arg(long, short = 'K', value_name = "CODE", value_parser = clap::value_parser!(u32).range(1..))]
    keycode: Option<u32>,

    /// Key that undoes the last stroke (overrides the config file)
    #[arg(long, short = 'u', value_name = "NAME")]
    undo_key: Option<String>,

    /// Raw keycode for undo (overrides --undo-key)
    #[arg(long, short = 'U', value_name = "CODE", value_parser = clap::value_parser!(u32).range(1..))]
    undo_keycode: Option<u32>,

    /// Overlay opacity between 0.0 and 1.0 (overrides settings.toml)
    #[arg(long, short = 'o', value_name = "OPACITY", value_parser = parse_opacity)]
    opacity: Option<f64>,

    /// Enable debug logging
    #[arg(long, short = 'd', action = ArgAction::SetTrue)]
    debug: bool,

    /// Validate the tool config and exit non-zero on the first error
    #[arg(long, action = ArgAction::SetTrue)]
    check: bool,

    /// Print the loaded configuration as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    dump: bool,
}

fn parse_opacity(value: &str) -> Result<f64, String> {
    let opacity: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (0.0..=1.0).contains(&opacity) {
        Ok(opacity)
    } else {
        Err(format!("{opacity} is outside 0.0-1.0"))
    }
}

/// A key as the overlay will grab it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
enum KeySpec {
    Name(String),
    Code(u32),
}

impl KeySpec {
    /// Keycode beats key name, command line beats config file.
    fn resolve(
        code: Option<u32>,
        cli_name: Option<&str>,
        from_config: Option<&str>,
        default: &str,
    ) -> Self {
        match (code, cli_name.or(from_config)) {
            (Some(code), _) => KeySpec::Code(code),
            (None, Some(name)) => KeySpec::Name(name.to_string()),
            (None, None) => KeySpec::Name(default.to_string()),
        }
    }
}

impl fmt::Display for KeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySpec::Name(name) => f.write_str(name),
            KeySpec::Code(code) => write!(f, "keycode {code}"),
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    config: Option<String>,
    hotkey: KeySpec,
    undokey: KeySpec,
    opacity: f64,
    tools: &'a ToolTable,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("inkscribe: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let registry = Arc::new(ContextRegistry::new());
    let factory: Arc<dyn PaintContextFactory> = registry.clone();

    let path = cli.config.clone().or_else(config::locate_tool_config);

    let (tools, loaded_from) = if cli.check {
        let path = path.context("No tool config found")?;
        match config::load(&path, &factory) {
            Ok(tools) => (tools, Some(path)),
            Err(diagnostic) => {
                eprintln!("{diagnostic}");
                return Ok(ExitCode::FAILURE);
            }
        }
    } else {
        match config::load_or_fallback(path.as_deref(), &factory) {
            (tools, None) => (tools, path),
            (tools, Some(_)) => (tools, None),
        }
    };
    debug!("{} paint context(s) live", registry.live_count());

    let settings = match Settings::default_path() {
        Ok(settings_path) => Settings::load_from(&settings_path),
        Err(err) => {
            warn!("Using default settings: {err:#}");
            Settings::default()
        }
    };
    let opacity = cli.opacity.unwrap_or(settings.drawing.opacity);

    let report = Report {
        config: loaded_from.map(|p| p.display().to_string()),
        hotkey: KeySpec::resolve(
            cli.keycode,
            cli.key.as_deref(),
            tools.toggle_key(),
            DEFAULT_HOTKEY,
        ),
        undokey: KeySpec::resolve(
            cli.undo_keycode,
            cli.undo_key.as_deref(),
            tools.undo_key(),
            DEFAULT_UNDOKEY,
        ),
        opacity,
        tools: &tools.tools,
    };

    if cli.dump {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize configuration")?
        );
    } else if cli.check {
        info!("Configuration OK");
        println!(
            "{}: OK ({} tools)",
            report.config.as_deref().unwrap_or("-"),
            report.tools.len()
        );
    } else {
        print_summary(&report);
    }

    Ok(ExitCode::SUCCESS)
}

fn print_summary(report: &Report<'_>) {
    match &report.config {
        Some(path) => println!("Config:  {path}"),
        None => println!("Config:  built-in defaults"),
    }
    println!("Hotkey:  {}", report.hotkey);
    println!("Undo:    {}", report.undokey);
    println!("Opacity: {:.2}", report.opacity);
    println!("Tools:");
    for (name, entry) in report.tools {
        let id = ToolId::new(name.as_str());
        let origin = id
            .tool_class()
            .map(|class| format!(" [device {}, class {class}]", id.device()))
            .unwrap_or_default();
        println!("  {:<24} {}{origin}", format!("\"{name}\""), describe(entry));
    }
}

fn describe(entry: &ToolEntry) -> String {
    let color = entry
        .color()
        .map_or_else(|| "none".to_string(), |color| color.to_hex());
    let mut text = format!("{} (color={color}, width={}", entry.tool(), entry.width());
    if entry.arrowsize() > 0.0 {
        text.push_str(&format!(", arrowsize={}", entry.arrowsize()));
    }
    if entry.minwidth() != style::DEFAULT_MIN_WIDTH {
        text.push_str(&format!(", minwidth={}", entry.minwidth()));
    }
    if entry.maxwidth() != style::DEFAULT_MAX_WIDTH {
        text.push_str(&format!(", maxwidth={}", entry.maxwidth()));
    }
    text.push(')');
    text
}
