//! Process-wide logging facade and its scope guard.
//!
//! [`Logging`] holds at most one active [`Logger`]. Until [`Logging::init`]
//! runs, and again after [`Logging::shutdown`], every call is routed to
//! [`Logger::fallback`], which writes `[LEVEL] message` lines to standard
//! error and keeps the default fatal policy (terminate).
//!
//! Init and shutdown are meant to run during single-threaded startup and
//! teardown. Log calls may come from any thread.

use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use once_cell::sync::Lazy;

use crate::{LogOptions, LogSink, Logger};

static ACTIVE: Lazy<RwLock<Option<Logger>>> = Lazy::new(|| RwLock::new(None));
static FALLBACK: Lazy<Logger> = Lazy::new(Logger::fallback);

/// Entry point for process-wide logging.
pub struct Logging;

impl Logging {
    /// Initialize the backend from `options`.
    ///
    /// Does nothing if logging is already initialized.
    pub fn init(options: &LogOptions) {
        Self::install(|| Logger::new(options));
    }

    /// Load options from a JSON file (see [`LogOptions::from_json`]) and
    /// initialize.
    pub fn init_from_json<P: AsRef<Path>>(path: P) {
        Self::init(&LogOptions::from_json(path));
    }

    /// Initialize with a caller-provided sink instead of the backend.
    ///
    /// Does nothing if logging is already initialized.
    ///
    /// The sink runs while the facade state is locked for reading: a sink
    /// that calls [`Logging::init`], [`Logging::init_with_sink`] or
    /// [`Logging::shutdown`] from inside [`LogSink::log`] deadlocks.
    pub fn init_with_sink(options: &LogOptions, sink: Box<dyn LogSink>) {
        Self::install(|| Logger::with_sink(options, sink));
    }

    /// Release backend resources. Safe to call when not initialized.
    pub fn shutdown() {
        let logger = write_active().take();
        if let Some(logger) = logger {
            logger.shutdown();
        }
    }

    pub fn is_initialized() -> bool {
        read_active().is_some()
    }

    pub fn info(message: &str) {
        Self::with_logger(|logger| logger.info(message));
    }

    pub fn warn(message: &str) {
        Self::with_logger(|logger| logger.warn(message));
    }

    pub fn error(message: &str) {
        Self::with_logger(|logger| logger.error(message));
    }

    /// Log a fatal event.
    ///
    /// When the active policy has `fatal_terminates` set (the default, also
    /// while uninitialized) the process is aborted after the record is
    /// flushed. This happens on every code path, including success paths.
    pub fn fatal(message: &str) {
        Self::with_logger(|logger| logger.fatal(message));
    }

    /// Log `message` at INFO if verbose `level` is enabled.
    pub fn verbose(level: u32, message: &str) {
        Self::with_logger(|logger| logger.verbose(level, message));
    }

    pub fn is_verbose(level: u32) -> bool {
        Self::with_logger(|logger| logger.is_verbose(level))
    }

    fn install(build: impl FnOnce() -> Logger) {
        let mut active = write_active();
        if active.is_none() {
            *active = Some(build());
        }
    }

    fn with_logger<R>(f: impl FnOnce(&Logger) -> R) -> R {
        let active = read_active();
        match active.as_ref() {
            Some(logger) => f(logger),
            None => f(&*FALLBACK),
        }
    }
}

fn read_active() -> RwLockReadGuard<'static, Option<Logger>> {
    ACTIVE.read().unwrap_or_else(|e| e.into_inner())
}

fn write_active() -> RwLockWriteGuard<'static, Option<Logger>> {
    ACTIVE.write().unwrap_or_else(|e| e.into_inner())
}

/// Initializes logging on construction and shuts it down on drop.
///
/// The facade state is process-wide: with nested or sequential guards, the
/// first guard's options win at init and the first guard dropped shuts
/// logging down for everyone.
#[must_use = "logging is shut down as soon as the guard is dropped"]
#[derive(Debug)]
pub struct LoggingGuard {
    _private: (),
}

impl LoggingGuard {
    /// Initialize from `options`.
    pub fn new(options: &LogOptions) -> Self {
        Logging::init(options);
        Self { _private: () }
    }

    /// Initialize from a JSON config file.
    pub fn from_json<P: AsRef<Path>>(path: P) -> Self {
        Logging::init_from_json(path);
        Self { _private: () }
    }
}

impl Drop for LoggingGuard {
    fn drop(&mut self) {
        Logging::shutdown();
    }
}
