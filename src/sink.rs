//! Destinations for log records.
//!
//! A [`LogSink`] receives every record the [`Logger`](crate::Logger) decides
//! to emit. The crate ships two implementations: the `tracing` backend
//! ([`TracingSink`](crate::TracingSink), behind the `backend` feature) and
//! [`StderrSink`], the plain standard-error fallback used when no backend is
//! compiled in and while the facade is uninitialized.

use std::io::{self, Write};

use crate::Severity;

/// A destination for log records.
pub trait LogSink: Send + Sync {
    /// Record `message` at `severity`.
    fn log(&self, severity: Severity, message: &str);

    /// Record a fatal-level message that will not end the process.
    ///
    /// The default records it at `Error` with a `[FATAL]` marker.
    fn log_recoverable_fatal(&self, message: &str) {
        self.log(Severity::Error, &format!("[FATAL] {}", message));
    }

    /// Flush pending records and release writers.
    ///
    /// Records logged after `close` may be dropped.
    fn close(&self) {}
}

/// Writes `[LEVEL] message` lines to standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

/// Write one `[LABEL] message` line.
fn write_record<W: Write>(writer: &mut W, severity: Severity, message: &str) -> io::Result<()> {
    writeln!(writer, "[{}] {}", severity.label(), message)
}

/// A fatal that keeps the process alive still reads `[FATAL] message`.
fn write_recoverable_fatal<W: Write>(writer: &mut W, message: &str) -> io::Result<()> {
    write_record(writer, Severity::Fatal, message)
}

impl LogSink for StderrSink {
    fn log(&self, severity: Severity, message: &str) {
        // Nothing sensible to do if stderr itself is gone.
        let _ = write_record(&mut io::stderr().lock(), severity, message);
    }

    fn log_recoverable_fatal(&self, message: &str) {
        let _ = write_recoverable_fatal(&mut io::stderr().lock(), message);
    }

    fn close(&self) {
        let _ = io::stderr().flush();
    }
}
