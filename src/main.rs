//! Quill entrypoint.
use anyhow::{Context, Result};
use clap::Parser;
use quill::{CrosstermTerminal, Editor, EditorConfig};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about = "A small terminal text editor")]
struct Args {
    /// File to open. A missing file is created on first save.
    path: Option<PathBuf>,
    /// Columns per tab stop.
    #[arg(long = "tab-stop", default_value_t = quill::DEFAULT_TAB_STOP)]
    tab_stop: usize,
    /// Write logs to this file (filtered by `RUST_LOG`).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = match args.log_file.as_deref() {
        Some(path) => configure_logging(path)?,
        None => None,
    };
    install_panic_hook();

    let config = EditorConfig::default().with_tab_stop(args.tab_stop);
    let terminal = CrosstermTerminal::new(config.poll_timeout).context("failed to enter raw mode")?;
    let mut editor = Editor::new(terminal, config)?;
    if let Some(path) = args.path.as_ref() {
        editor
            .open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
    }
    tracing::info!(target: "editor", path = ?args.path, "startup");

    let outcome = editor.run();
    // Leave raw mode before anything is printed.
    drop(editor);
    outcome.context("editor session failed")
}

/// Send `tracing` output to `path`. The screen belongs to the editor.
fn configure_logging(path: &Path) -> Result<Option<WorkerGuard>> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .with_context(|| format!("log file {} has no file name", path.display()))?;
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(()) => Ok(Some(guard)),
        // Global subscriber already installed; drop guard so writer shuts down.
        Err(_) => Ok(None),
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            CrosstermTerminal::restore(true);
            tracing::error!(target: "editor", ?info, "panic");
            default_panic(info);
        }));
    });
}
