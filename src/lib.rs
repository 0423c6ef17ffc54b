//! # cortexi-logging
//!
//! A small logging facade with JSON configuration.
//!
//! ## Features
//!
//! - Options loaded from a JSON file or built in code, with defaults for
//!   anything missing
//! - Four severities (INFO, WARN, ERROR, FATAL) with a configurable stderr
//!   threshold
//! - One log file per severity under a configurable directory
//! - A fatal policy: abort the process or record and continue
//! - A scope guard that shuts logging down on every exit path
//! - Backed by the `tracing` ecosystem, with a plain standard-error fallback
//!
//! ## Example
//!
//! ```rust
//! use cortexi_logging::{LogOptions, Logging, LoggingGuard};
//!
//! let options = LogOptions::new()
//!     .with_app_name("Example")
//!     .with_fatal_terminates(false);
//!
//! {
//!     let _guard = LoggingGuard::new(&options);
//!     Logging::info("service started");
//!     Logging::fatal("recorded, but the process keeps running");
//! }
//!
//! assert!(!Logging::is_initialized());
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod facade;
pub mod logger;
pub mod severity;
pub mod sink;

#[cfg(feature = "backend")]
pub mod tracing_init;
#[cfg(feature = "file")]
pub mod writer;

pub use builder::LogBuilder;
pub use config::LogOptions;
pub use error::{Error, Result};
pub use facade::{Logging, LoggingGuard};
pub use logger::Logger;
pub use severity::Severity;
pub use sink::{LogSink, StderrSink};

#[cfg(feature = "backend")]
pub use tracing_init::TracingSink;
#[cfg(feature = "file")]
pub use writer::SeverityFileWriter;

/// Create a new [`LogBuilder`] with default options.
pub fn builder() -> LogBuilder {
    LogBuilder::new()
}
