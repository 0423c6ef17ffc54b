use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result, Severity};

/// Logging options
///
/// Every field has a default, so a partial JSON document (or an empty one)
/// yields a usable record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogOptions {
    /// Identifier passed to the backend; used in log file names
    pub app_name: String,
    /// Directory for per-severity log files (empty disables file output)
    pub log_dir: String,
    /// Mirror log lines to standard error
    pub also_to_stderr: bool,
    /// Minimum severity mirrored to stderr (0 = INFO .. 3 = FATAL)
    pub stderr_threshold: i32,
    /// Verbose logging level
    pub vlog: i32,
    /// Prefix lines with a timestamp and the thread id
    pub log_prefix: bool,
    /// Colored stderr output (requires the `ansi` feature)
    pub color: bool,
    /// Abort the process on `fatal`
    pub fatal_terminates: bool,
}

impl LogOptions {
    /// Create a new LogOptions with defaults
    pub fn new() -> Self {
        Self {
            app_name: default_app_name(),
            log_dir: String::new(),
            also_to_stderr: true,
            stderr_threshold: 1,
            vlog: 0,
            log_prefix: true,
            color: true,
            fatal_terminates: true,
        }
    }

    /// Load options from a JSON file.
    ///
    /// This never fails. An unreadable file or malformed document produces a
    /// diagnostic on standard error and the default record. A value of the
    /// wrong type stops extraction; the fields read before it are kept.
    pub fn from_json<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(_) => {
                eprintln!("Failed to open logger config file: {}", path.display());
                return Self::new();
            }
        };

        let mut options = Self::new();
        let applied = serde_json::from_reader::<_, Value>(BufReader::new(file))
            .map_err(Error::from)
            .and_then(|doc| options.apply_json(&doc));
        if let Err(e) = applied {
            eprintln!("Failed to parse logger config: {}", e);
        }
        options
    }

    /// Load options from in-memory JSON text, with the same recovery rules as
    /// [`LogOptions::from_json`].
    pub fn from_json_str(text: &str) -> Self {
        let mut options = Self::new();
        let applied = serde_json::from_str::<Value>(text)
            .map_err(Error::from)
            .and_then(|doc| options.apply_json(&doc));
        if let Err(e) = applied {
            eprintln!("Failed to parse logger config: {}", e);
        }
        options
    }

    /// Load options from a JSON file, reporting the first problem instead of
    /// falling back to defaults.
    pub fn try_from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let doc: Value = serde_json::from_reader(BufReader::new(file))?;
        let mut options = Self::new();
        options.apply_json(&doc)?;
        Ok(options)
    }

    /// Overwrite fields with the values present in `doc`, in declaration order.
    fn apply_json(&mut self, doc: &Value) -> Result<()> {
        let map = doc.as_object().ok_or_else(|| {
            Error::Config(format!("expected a JSON object, found `{}`", doc))
        })?;

        if let Some(v) = extract(map, "app_name", as_string)? {
            self.app_name = v;
        }
        if let Some(v) = extract(map, "log_dir", as_string)? {
            self.log_dir = v;
        }
        if let Some(v) = extract(map, "also_to_stderr", Value::as_bool)? {
            self.also_to_stderr = v;
        }
        if let Some(v) = extract(map, "stderr_threshold", as_i32)? {
            self.stderr_threshold = v;
        }
        if let Some(v) = extract(map, "vlog", as_i32)? {
            self.vlog = v;
        }
        if let Some(v) = extract(map, "log_prefix", Value::as_bool)? {
            self.log_prefix = v;
        }
        if let Some(v) = extract(map, "color", Value::as_bool)? {
            self.color = v;
        }
        if let Some(v) = extract(map, "fatal_terminates", Value::as_bool)? {
            self.fatal_terminates = v;
        }
        Ok(())
    }

    /// Set the application name
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    /// Set the log directory
    pub fn with_log_dir(mut self, log_dir: impl Into<String>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    /// Enable or disable stderr mirroring
    pub fn with_also_to_stderr(mut self, also_to_stderr: bool) -> Self {
        self.also_to_stderr = also_to_stderr;
        self
    }

    /// Set the stderr threshold
    pub fn with_stderr_threshold(mut self, threshold: i32) -> Self {
        self.stderr_threshold = threshold;
        self
    }

    /// Set the verbose level
    pub fn with_vlog(mut self, vlog: i32) -> Self {
        self.vlog = vlog;
        self
    }

    /// Enable or disable the timestamp/thread prefix
    pub fn with_log_prefix(mut self, log_prefix: bool) -> Self {
        self.log_prefix = log_prefix;
        self
    }

    /// Enable or disable colored stderr output
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Set the fatal-terminates policy
    pub fn with_fatal_terminates(mut self, fatal_terminates: bool) -> Self {
        self.fatal_terminates = fatal_terminates;
        self
    }

    /// The stderr threshold clamped to a severity.
    pub fn stderr_severity(&self) -> Severity {
        Severity::from_threshold(self.stderr_threshold)
    }
}

impl Default for LogOptions {
    fn default() -> Self {
        Self::new()
    }
}

fn default_app_name() -> String {
    "CortexI".to_string()
}

fn extract<T>(
    map: &Map<String, Value>,
    key: &str,
    convert: impl FnOnce(&Value) -> Option<T>,
) -> Result<Option<T>> {
    match map.get(key) {
        None => Ok(None),
        Some(value) => convert(value)
            .map(Some)
            .ok_or_else(|| Error::Config(format!("invalid value for `{}`: {}", key, value))),
    }
}

fn as_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn as_i32(value: &Value) -> Option<i32> {
    value.as_i64().and_then(|n| i32::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn test_log_options_new() {
        let options = LogOptions::new();
        assert_eq!(options.app_name, "CortexI");
        assert_eq!(options.log_dir, "");
        assert!(options.also_to_stderr);
        assert_eq!(options.stderr_threshold, 1);
        assert_eq!(options.vlog, 0);
        assert!(options.log_prefix);
        assert!(options.color);
        assert!(options.fatal_terminates);
    }

    #[test]
    fn test_log_options_default() {
        assert_eq!(LogOptions::default(), LogOptions::new());
    }

    #[test]
    fn test_from_json_full_document() {
        let file = write_config(
            r#"{
                "app_name": "CortexITest",
                "log_dir": "",
                "also_to_stderr": true,
                "stderr_threshold": 0,
                "vlog": 0,
                "log_prefix": false,
                "color": false,
                "fatal_terminates": false,
                "use_custom_sink": false
            }"#,
        );

        let options = LogOptions::from_json(file.path());
        assert_eq!(options.app_name, "CortexITest");
        assert_eq!(options.log_dir, "");
        assert!(options.also_to_stderr);
        assert_eq!(options.stderr_threshold, 0);
        assert_eq!(options.vlog, 0);
        assert!(!options.log_prefix);
        assert!(!options.color);
        assert!(!options.fatal_terminates);
    }

    #[test]
    fn test_from_json_missing_file() {
        let options = LogOptions::from_json("non_existent_file.json");
        assert_eq!(options.app_name, "CortexI");
        assert!(options.also_to_stderr);
        assert_eq!(options, LogOptions::default());
    }

    #[test]
    fn test_from_json_malformed() {
        let file = write_config(r#"{"app_name": "Broken", "#);
        assert_eq!(LogOptions::from_json(file.path()), LogOptions::default());
    }

    #[test]
    fn test_from_json_partial_document_keeps_defaults() {
        let file = write_config(r#"{"log_dir": "/var/log/cortexi", "vlog": 2}"#);
        let options = LogOptions::from_json(file.path());
        assert_eq!(options.log_dir, "/var/log/cortexi");
        assert_eq!(options.vlog, 2);
        assert_eq!(options.app_name, "CortexI");
        assert_eq!(options.stderr_threshold, 1);
        assert!(options.fatal_terminates);
    }

    #[test]
    fn test_from_json_type_mismatch_keeps_earlier_fields() {
        let options = LogOptions::from_json_str(
            r#"{"app_name": "Early", "also_to_stderr": "yes", "fatal_terminates": false}"#,
        );
        assert_eq!(options.app_name, "Early");
        assert!(options.also_to_stderr);
        assert!(options.fatal_terminates);
    }

    #[test]
    fn test_from_json_str_not_an_object() {
        assert_eq!(LogOptions::from_json_str("[1, 2, 3]"), LogOptions::default());
    }

    #[test]
    fn test_from_json_out_of_range_integer() {
        let options = LogOptions::from_json_str(r#"{"stderr_threshold": 99999999999}"#);
        assert_eq!(options.stderr_threshold, 1);
    }

    #[test]
    fn test_try_from_json_reports_errors() {
        assert!(matches!(
            LogOptions::try_from_json("non_existent_file.json"),
            Err(Error::Io(_))
        ));

        let malformed = write_config("not json");
        assert!(matches!(
            LogOptions::try_from_json(malformed.path()),
            Err(Error::Json(_))
        ));

        let mismatch = write_config(r#"{"vlog": "loud"}"#);
        assert!(matches!(
            LogOptions::try_from_json(mismatch.path()),
            Err(Error::Config(_))
        ));

        let good = write_config(r#"{"app_name": "Strict"}"#);
        let options = LogOptions::try_from_json(good.path()).expect("valid config");
        assert_eq!(options.app_name, "Strict");
    }

    #[test]
    fn test_serde_deserialize_uses_defaults() {
        let options: LogOptions =
            serde_json::from_str(r#"{"app_name": "Embedded"}"#).expect("deserialize");
        assert_eq!(options.app_name, "Embedded");
        assert!(options.fatal_terminates);
        assert_eq!(options.stderr_threshold, 1);
    }

    #[test]
    fn test_with_setters() {
        let options = LogOptions::new()
            .with_app_name("App")
            .with_log_dir("logs")
            .with_also_to_stderr(false)
            .with_stderr_threshold(3)
            .with_vlog(2)
            .with_log_prefix(false)
            .with_color(false)
            .with_fatal_terminates(false);

        assert_eq!(options.app_name, "App");
        assert_eq!(options.log_dir, "logs");
        assert!(!options.also_to_stderr);
        assert_eq!(options.stderr_threshold, 3);
        assert_eq!(options.vlog, 2);
        assert!(!options.log_prefix);
        assert!(!options.color);
        assert!(!options.fatal_terminates);
    }

    #[test]
    fn test_stderr_severity_clamps() {
        assert_eq!(
            LogOptions::new().with_stderr_threshold(-1).stderr_severity(),
            Severity::Info
        );
        assert_eq!(LogOptions::new().stderr_severity(), Severity::Warning);
        assert_eq!(
            LogOptions::new().with_stderr_threshold(7).stderr_severity(),
            Severity::Fatal
        );
    }
}
