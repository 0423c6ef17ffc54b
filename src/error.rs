use thiserror::Error as ThisError;

/// Errors that can occur while loading options or preparing the backend
#[derive(ThisError, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration document is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A configuration value is missing or has the wrong type.
    #[error("Configuration error: {0}")]
    Config(String),
    /// Backend initialization failed.
    #[error("Initialization error: {0}")]
    Init(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
