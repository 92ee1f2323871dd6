//! Error types for ferro-clinvar
//!
//! The filter engine itself never fails: unparseable expressions estimate to
//! zero and undated records are set aside. Errors only arise at the edges,
//! when reading or writing tables and loading configuration or lookup files.

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
///
/// These codes can be used for programmatic error handling
/// and for documentation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    /// File IO error
    IoError = 9001,
    /// JSON parsing error
    JsonError = 9002,
    /// CSV/TSV parsing or writing error
    CsvError = 9003,
    /// Invalid configuration value
    ConfigError = 9004,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E9001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::IoError => "file I/O error",
            ErrorCode::JsonError => "JSON parsing error",
            ErrorCode::CsvError => "delimited table error",
            ErrorCode::ConfigError => "invalid configuration",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for ferro-clinvar operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// JSON parsing error
    #[error("JSON error: {msg}")]
    Json { msg: String },

    /// Delimited table error, with the 1-based record line when known
    #[error("CSV error{}: {msg}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Csv { msg: String, line: Option<u64> },

    /// Invalid configuration value
    #[error("Config error: {msg}")]
    Config { msg: String },
}

impl FilterError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        FilterError::Config { msg: msg.into() }
    }

    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            FilterError::Io { .. } => ErrorCode::IoError,
            FilterError::Json { .. } => ErrorCode::JsonError,
            FilterError::Csv { .. } => ErrorCode::CsvError,
            FilterError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Get a formatted error prefixed with its code
    pub fn detailed_message(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }
}

impl From<std::io::Error> for FilterError {
    fn from(e: std::io::Error) -> Self {
        FilterError::Io { msg: e.to_string() }
    }
}

impl From<serde_json::Error> for FilterError {
    fn from(e: serde_json::Error) -> Self {
        FilterError::Json { msg: e.to_string() }
    }
}

impl From<csv::Error> for FilterError {
    fn from(e: csv::Error) -> Self {
        if e.is_io_error() {
            return FilterError::Io { msg: e.to_string() };
        }
        FilterError::Csv {
            line: e.position().map(|p| p.line()),
            msg: e.to_string(),
        }
    }
}
