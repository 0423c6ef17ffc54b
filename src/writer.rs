use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::Severity;

/// Append-mode log file for a single severity.
///
/// The file lives at `<log_dir>/<prefix><app_name>.log`, for example
/// `logs/warn_CortexI.log`.
#[derive(Debug)]
pub struct SeverityFileWriter {
    /// Path of the open file.
    path: PathBuf,
    /// The open file handle.
    file: File,
    /// Severity this file was opened for.
    severity: Severity,
}

impl SeverityFileWriter {
    /// Open (or create) the log file for `severity` under `log_dir`.
    pub fn open(log_dir: &Path, app_name: &str, severity: Severity) -> io::Result<Self> {
        // Create the directory on demand so `log_dir` may point at a path
        // that does not exist yet.
        if !log_dir.as_os_str().is_empty() {
            std::fs::create_dir_all(log_dir)?;
        }

        let path = Self::file_path(log_dir, app_name, severity);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            file,
            severity,
        })
    }

    /// Path of the log file for `severity` under `log_dir`.
    pub fn file_path(log_dir: &Path, app_name: &str, severity: Severity) -> PathBuf {
        log_dir.join(format!("{}{}.log", severity.file_prefix(), app_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

impl Write for SeverityFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()?;
        self.file.sync_data()
    }
}
