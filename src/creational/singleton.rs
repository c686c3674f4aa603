//! Singleton
//! Example: Simple Logging System
//!
//! One `Logger` per process. The instance lives behind a `lazy_static!`
//! mutex; callers only ever hold a [`LoggerHandle`], which is a zero-sized
//! ticket into that shared slot.

use chrono::{DateTime, Local};
use lazy_static::lazy_static;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_LOG_FILE: &str = "log.txt";

const HEADER: &str = "Hello World!";

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Logger is a singleton and was already initialized with '{}'", path.display())]
    AlreadyInitialized { path: PathBuf },

    #[error("Logger was never initialized")]
    NotInitialized,

    #[error("Failed to write log file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug)]
struct Logger {
    path: PathBuf,
    entries: usize,
}

lazy_static! {
    static ref INSTANCE: Mutex<Option<Logger>> = Mutex::new(None);
}

// The slot only holds a path and a counter, so a poisoned lock is still usable.
fn slot() -> MutexGuard<'static, Option<Logger>> {
    INSTANCE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn open_log(path: &Path) -> Result<Logger, LoggerError> {
    fs::write(path, format!("{HEADER}\n")).map_err(|source| LoggerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "logger initialized");
    Ok(Logger {
        path: path.to_path_buf(),
        entries: 0,
    })
}

/// ctime-style line, e.g. `[Mon Oct 19 09:05:00 2026] message`.
pub fn format_entry(at: DateTime<Local>, message: &str) -> String {
    format!("[{}] {}", at.format("%a %b %e %H:%M:%S %Y"), message)
}

/// Access point for the process-wide logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerHandle {
    _private: (),
}

impl LoggerHandle {
    /// Create the singleton writing to `path`. Fails if it already exists.
    pub fn init(path: impl AsRef<Path>) -> Result<Self, LoggerError> {
        let mut slot = slot();
        if let Some(existing) = slot.as_ref() {
            return Err(LoggerError::AlreadyInitialized {
                path: existing.path.clone(),
            });
        }
        *slot = Some(open_log(path.as_ref())?);
        Ok(LoggerHandle { _private: () })
    }

    /// The existing singleton, created at [`DEFAULT_LOG_FILE`] on first use.
    pub fn instance() -> Result<Self, LoggerError> {
        let mut slot = slot();
        if slot.is_none() {
            *slot = Some(open_log(Path::new(DEFAULT_LOG_FILE))?);
        }
        Ok(LoggerHandle { _private: () })
    }

    pub fn is_initialized() -> bool {
        slot().is_some()
    }

    pub fn log(&self, message: &str) -> Result<(), LoggerError> {
        let mut slot = slot();
        let logger = slot.as_mut().ok_or(LoggerError::NotInitialized)?;

        let io_err = |source| LoggerError::Io {
            path: logger.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .append(true)
            .open(&logger.path)
            .map_err(io_err)?;
        writeln!(file, "{}", format_entry(Local::now(), message)).map_err(io_err)?;

        logger.entries += 1;
        debug!(entries = logger.entries, "logged message");
        Ok(())
    }

    pub fn path(&self) -> Result<PathBuf, LoggerError> {
        slot()
            .as_ref()
            .map(|logger| logger.path.clone())
            .ok_or(LoggerError::NotInitialized)
    }

    /// Messages logged since initialization.
    pub fn entries(&self) -> Result<usize, LoggerError> {
        slot()
            .as_ref()
            .map(|logger| logger.entries)
            .ok_or(LoggerError::NotInitialized)
    }
}
