//! Builder pattern for initializing logging.
//!
//! This module provides a fluent API for assembling [`LogOptions`] and
//! starting the facade in a single chain of method calls.
//!
//! # Example
//!
//! ```rust,no_run
//! let _guard = cortexi_logging::builder()
//!     .with_app_name("Indexer")
//!     .with_log_dir("/var/log/indexer")
//!     .with_stderr_threshold(2)
//!     .guard();
//!
//! cortexi_logging::Logging::info("indexer started");
//! ```

use std::path::Path;

use crate::{LogOptions, Logging, LoggingGuard};

/// A builder for configuring and initializing logging.
#[derive(Debug, Clone, Default)]
pub struct LogBuilder {
    options: LogOptions,
}

impl LogBuilder {
    /// Create a new LogBuilder with default options.
    pub fn new() -> Self {
        Self {
            options: LogOptions::new(),
        }
    }

    /// Create a LogBuilder from existing options.
    pub fn from_options(options: LogOptions) -> Self {
        Self { options }
    }

    /// Start from a JSON config file (see [`LogOptions::from_json`]).
    pub fn from_json<P: AsRef<Path>>(path: P) -> Self {
        Self::from_options(LogOptions::from_json(path))
    }

    /// Set the application name.
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.options = self.options.with_app_name(app_name);
        self
    }

    /// Write per-severity log files under `log_dir`.
    pub fn with_log_dir(mut self, log_dir: impl Into<String>) -> Self {
        self.options = self.options.with_log_dir(log_dir);
        self
    }

    /// Enable or disable stderr mirroring.
    pub fn with_also_to_stderr(mut self, enabled: bool) -> Self {
        self.options = self.options.with_also_to_stderr(enabled);
        self
    }

    /// Set the stderr threshold (0 = INFO .. 3 = FATAL).
    pub fn with_stderr_threshold(mut self, threshold: i32) -> Self {
        self.options = self.options.with_stderr_threshold(threshold);
        self
    }

    /// Set the verbose level.
    pub fn with_vlog(mut self, vlog: i32) -> Self {
        self.options = self.options.with_vlog(vlog);
        self
    }

    /// Show timestamps and thread ids.
    pub fn with_log_prefix(mut self, enabled: bool) -> Self {
        self.options = self.options.with_log_prefix(enabled);
        self
    }

    /// Color stderr output.
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.options = self.options.with_color(enabled);
        self
    }

    /// Abort the process on fatal events.
    pub fn with_fatal_terminates(mut self, enabled: bool) -> Self {
        self.options = self.options.with_fatal_terminates(enabled);
        self
    }

    /// Get the options without initializing.
    pub fn build(self) -> LogOptions {
        self.options
    }

    /// Initialize the process-wide facade.
    pub fn init(self) {
        Logging::init(&self.options);
    }

    /// Initialize the process-wide facade, shutting it down when the returned
    /// guard is dropped.
    pub fn guard(self) -> LoggingGuard {
        LoggingGuard::new(&self.options)
    }
}
