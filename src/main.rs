//! totp-view CLI
//!
//! Browse TOTP entries from a JSON file and show their current codes.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::{EnvFilter, prelude::*};

use totp_view::APP_NAME;
use totp_view::clipboard::{Clipboard, SystemClipboard};
use totp_view::store::load_entries;
use totp_view::tui::{self, App};

#[derive(Parser, Debug)]
#[command(name = "totp-view")]
#[command(about = "Browse TOTP entries and their current codes")]
#[command(version)]
struct Cli {
    /// JSON file with the entries to show
    file: PathBuf,

    /// Log file path (default: <cache dir>/totp-view/totp-view.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Never touch the clipboard; hides the copy command
    #[arg(long)]
    no_clipboard: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    // Log to a file: the terminal belongs to the TUI
    let log_path = resolve_log_path(cli.log_file);
    init_logging(&log_path, cli.debug)
        .map_err(|e| format!("cannot open log file {}: {}", log_path.display(), e))?;
    tracing::info!("starting {} {}", APP_NAME, env!("CARGO_PKG_VERSION"));

    let entries = load_entries(&cli.file).map_err(|e| e.to_string())?;
    let clipboard = open_clipboard(cli.no_clipboard);

    let app = App::new(title(&cli.file), entries, clipboard.is_some());
    tui::run(app, clipboard).map_err(|e| e.to_string())
}

// ============================================================================
// SETUP HELPERS
// ============================================================================

/// Open the system clipboard. Failure only disables copying.
fn open_clipboard(disabled: bool) -> Option<Box<dyn Clipboard>> {
    if disabled {
        tracing::info!("clipboard disabled by --no-clipboard");
        return None;
    }

    match SystemClipboard::init() {
        Ok(clipboard) => {
            let clipboard: Box<dyn Clipboard> = Box::new(clipboard);
            Some(clipboard)
        }
        Err(e) => {
            tracing::warn!("copy disabled for this session: {}", e);
            None
        }
    }
}

/// Header title: app name, version and the entry file's name.
fn title(file: &Path) -> String {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file.display().to_string());
    format!("{} v{}: {}", APP_NAME, env!("CARGO_PKG_VERSION"), name)
}

/// Resolve the log file path, defaulting to the user cache directory.
fn resolve_log_path(log_file: Option<PathBuf>) -> PathBuf {
    match log_file {
        Some(path) => path,
        None => dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_NAME)
            .join(format!("{}.log", APP_NAME)),
    }
}

fn init_logging(path: &Path, debug: bool) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let log_file = File::create(path)?;

    let level = if debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_file)
                .with_ansi(false)
                .with_target(false),
        )
        .with(filter)
        .init();

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
