//! Logging setup for the application.
//!
//! Installs a global tracing subscriber filtered by `RUST_LOG` (default
//! `warn`). The interactive TUI owns the terminal, so without a log file its
//! records are discarded rather than written to stderr.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::config::OperationMode;

const DEFAULT_FILTER: &str = "warn";

static LOG_GUARD: OnceLock<Option<WorkerGuard>> = OnceLock::new();

/// Destination for log records when no log file is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleOutput {
    /// Write records to stderr.
    Stderr,
    /// Drop records.
    Discard,
}

impl ConsoleOutput {
    /// Console destination suited to `mode`.
    ///
    /// The interactive TUI draws on the alternate screen, so records must not
    /// reach the terminal there.
    #[must_use]
    pub const fn for_mode(mode: OperationMode) -> Self {
        match mode {
            OperationMode::OneShot => Self::Stderr,
            OperationMode::Interactive => Self::Discard,
        }
    }
}

/// Errors that may occur while initialising logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log file could not be created or opened.
    #[error("failed to open log file {path}: {source}")]
    OpenFile {
        /// Path of the log file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Another global subscriber is already installed.
    #[error("failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Initialises tracing, writing to `log_file` when given and to `console`
/// otherwise.
///
/// Subsequent calls are no-ops.
///
/// # Errors
///
/// Returns [`LoggingError`] when the log file cannot be opened or a
/// different subscriber is already installed.
pub fn init(log_file: Option<&Path>, console: ConsoleOutput) -> Result<(), LoggingError> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let filter = build_env_filter();
    let (writer, guard) = make_writer(log_file, console)?;
    let layer = fmt::layer()
        .with_ansi(console == ConsoleOutput::Stderr && log_file.is_none())
        .with_writer(writer);
    tracing::subscriber::set_global_default(Registry::default().with(filter).with(layer))?;

    if LOG_GUARD.set(guard).is_err() {
        tracing::debug!("log guard already stored");
    }
    tracing::debug!("logging initialised");
    Ok(())
}

fn make_writer(
    log_file: Option<&Path>,
    console: ConsoleOutput,
) -> Result<(BoxMakeWriter, Option<WorkerGuard>), LoggingError> {
    let Some(path) = log_file else {
        let writer = match console {
            ConsoleOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
            ConsoleOutput::Discard => BoxMakeWriter::new(std::io::sink),
        };
        return Ok((writer, None));
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenFile {
            path: path.to_path_buf(),
            source,
        })?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    Ok((BoxMakeWriter::new(writer), Some(guard)))
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
