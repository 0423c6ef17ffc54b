//! The owned logging context.
//!
//! A [`Logger`] bundles a [`LogSink`] with the policy read from
//! [`LogOptions`]: whether `fatal` aborts the process and the verbose level.
//! The process-wide [`Logging`](crate::Logging) facade holds one of these, but
//! a `Logger` can equally be owned and passed around explicitly.

use crate::{LogOptions, LogSink, Severity, StderrSink};

/// A sink plus the fatal and verbose policy for it.
pub struct Logger {
    sink: Box<dyn LogSink>,
    fatal_terminates: bool,
    vlog: u32,
}

impl Logger {
    /// Build a logger backed by the compiled-in backend.
    pub fn new(options: &LogOptions) -> Self {
        Self::with_sink(options, backend_sink(options))
    }

    /// Build a logger that writes to `sink`.
    pub fn with_sink(options: &LogOptions, sink: Box<dyn LogSink>) -> Self {
        Self {
            sink,
            fatal_terminates: options.fatal_terminates,
            vlog: u32::try_from(options.vlog).unwrap_or(0),
        }
    }

    /// The logger used while the facade is uninitialized: standard error,
    /// default policy.
    pub fn fallback() -> Self {
        Self::with_sink(&LogOptions::default(), Box::new(StderrSink))
    }

    pub fn info(&self, message: &str) {
        self.sink.log(Severity::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.sink.log(Severity::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.sink.log(Severity::Error, message);
    }

    /// Log a fatal event.
    ///
    /// With `fatal_terminates` set this flushes the sink and aborts the
    /// process; it never returns. Otherwise the message is recorded at
    /// `Error` with a `[FATAL]` marker and the call returns normally.
    pub fn fatal(&self, message: &str) {
        if self.fatal_terminates {
            self.sink.log(Severity::Fatal, message);
            self.sink.close();
            std::process::abort();
        }
        self.sink.log_recoverable_fatal(message);
    }

    /// Log `message` at `Info` if verbose `level` is enabled.
    pub fn verbose(&self, level: u32, message: &str) {
        if self.is_verbose(level) {
            self.sink.log(Severity::Info, message);
        }
    }

    /// Whether verbose messages at `level` are emitted.
    pub fn is_verbose(&self, level: u32) -> bool {
        level <= self.vlog
    }

    pub fn fatal_terminates(&self) -> bool {
        self.fatal_terminates
    }

    /// Flush and release the sink.
    pub fn shutdown(self) {
        self.sink.close();
    }
}

#[cfg(feature = "backend")]
fn backend_sink(options: &LogOptions) -> Box<dyn LogSink> {
    Box::new(crate::TracingSink::new(options))
}

#[cfg(not(feature = "backend"))]
fn backend_sink(_options: &LogOptions) -> Box<dyn LogSink> {
    Box::new(StderrSink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::tests::MemorySink;

    fn memory_logger(options: &LogOptions) -> (Logger, MemorySink) {
        let sink = MemorySink::default();
        (Logger::with_sink(options, Box::new(sink.clone())), sink)
    }

    #[test]
    fn test_levels_reach_sink() {
        let (logger, sink) = memory_logger(&LogOptions::default());
        logger.info("one");
        logger.warn("two");
        logger.error("three");

        assert_eq!(
            sink.records(),
            vec![
                (Severity::Info, "one".to_string()),
                (Severity::Warning, "two".to_string()),
                (Severity::Error, "three".to_string()),
            ]
        );
    }

    #[test]
    fn test_fatal_without_termination_returns() {
        let options = LogOptions::default().with_fatal_terminates(false);
        let (logger, sink) = memory_logger(&options);

        logger.fatal("kept alive");
        logger.info("after fatal");

        assert_eq!(
            sink.records(),
            vec![
                (Severity::Error, "[FATAL] kept alive".to_string()),
                (Severity::Info, "after fatal".to_string()),
            ]
        );
    }

    #[test]
    fn test_verbose_respects_level() {
        let options = LogOptions::default().with_vlog(2);
        let (logger, sink) = memory_logger(&options);

        logger.verbose(1, "v1");
        logger.verbose(2, "v2");
        logger.verbose(3, "v3");

        assert!(logger.is_verbose(0));
        assert!(!logger.is_verbose(3));
        assert_eq!(
            sink.records(),
            vec![
                (Severity::Info, "v1".to_string()),
                (Severity::Info, "v2".to_string()),
            ]
        );
    }

    #[test]
    fn test_negative_vlog_behaves_as_zero() {
        let options = LogOptions::default().with_vlog(-3);
        let (logger, sink) = memory_logger(&options);

        logger.verbose(0, "level zero");
        logger.verbose(1, "level one");

        assert_eq!(sink.records(), vec![(Severity::Info, "level zero".to_string())]);
    }

    #[test]
    fn test_shutdown_closes_sink() {
        let (logger, sink) = memory_logger(&LogOptions::default());
        logger.shutdown();
        assert!(*sink.closed.lock().unwrap());
    }

    #[test]
    fn test_fallback_policy() {
        let logger = Logger::fallback();
        assert!(logger.fatal_terminates());
        logger.info("fallback logger smoke test");
    }
}
