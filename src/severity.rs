use std::fmt;

/// Ordinal log severity, from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    /// All severities in ascending order.
    pub const ALL: [Severity; 4] = [
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Map a numeric threshold (0 = INFO .. 3 = FATAL) to a severity.
    ///
    /// Values below 0 clamp to `Info`, values above 3 clamp to `Fatal`.
    pub fn from_threshold(threshold: i32) -> Self {
        match threshold {
            i32::MIN..=0 => Severity::Info,
            1 => Severity::Warning,
            2 => Severity::Error,
            _ => Severity::Fatal,
        }
    }

    /// Label used by the standard-error fallback, e.g. `WARN`.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// File name prefix for the per-severity log file, e.g. `warn_`.
    pub fn file_prefix(self) -> &'static str {
        match self {
            Severity::Info => "info_",
            Severity::Warning => "warn_",
            Severity::Error => "error_",
            Severity::Fatal => "fatal_",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
