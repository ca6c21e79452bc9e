use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Overrides the directory log files are written to.
pub const LOG_DIR_ENV: &str = "NOTES_LOG_DIR";

const DEFAULT_FILTER: &str = "info";

/// An installed file logger. Pending lines are flushed when this is dropped,
/// so hold it until the program is done.
pub struct LogFile {
    path: PathBuf,
    _guard: WorkerGuard,
}

impl LogFile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// `$NOTES_LOG_DIR` when set, else `<config dir>/notes/logs`.
pub fn default_logs_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(LOG_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let config_dir = dirs::config_dir().context("Could not find config directory")?;
    Ok(config_dir.join("notes").join("logs"))
}

/// One file per run, named after the moment the run started.
pub fn log_file_name(started: DateTime<Local>) -> String {
    format!("notes-{}.log", started.format("%Y-%m-%d-%H-%M-%S"))
}

/// Install the global subscriber writing to a fresh file in
/// [`default_logs_dir`].
pub fn init_logging() -> Result<LogFile> {
    init_logging_in(&default_logs_dir()?)
}

/// Install the global subscriber writing to a fresh file in `logs_dir`.
/// `RUST_LOG` replaces the default `info` filter.
pub fn init_logging_in(logs_dir: &Path) -> Result<LogFile> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let file_name = log_file_name(Local::now());
    let path = logs_dir.join(&file_name);
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(logs_dir, &file_name));

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .context("Invalid log filter")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()
        .context("A global logger is already installed")?;

    Ok(LogFile {
        path,
        _guard: guard,
    })
}
