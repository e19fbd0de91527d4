//! Error types for the Screen Time importer.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=database, 4=data, 6=publish, etc.)
//! - Context-aware recovery hints
//! - Structured JSON output for `--json` consumers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for importer operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Database (exit 2)
    DatabaseNotFound,
    DatabaseError,

    // Data (exit 4)
    MalformedTimestamp,
    InvalidArgument,

    // Publish (exit 6)
    PublishError,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::DatabaseNotFound => "DATABASE_NOT_FOUND",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::MalformedTimestamp => "MALFORMED_TIMESTAMP",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::PublishError => "PUBLISH_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::DatabaseNotFound | Self::DatabaseError => 2,
            Self::MalformedTimestamp | Self::InvalidArgument => 4,
            Self::PublishError => 6,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether re-running the same command could succeed without changes.
    ///
    /// True for a locked database and an unreachable server.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::DatabaseError | Self::PublishError)
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur while importing Screen Time data.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Couldn't find database file (searched {})", display_paths(searched))]
    DatabaseNotFound { searched: Vec<PathBuf> },

    #[error("Malformed {field} timestamp: {value:?}")]
    MalformedTimestamp { field: &'static str, value: Option<String> },

    #[error("Failed to publish to ActivityWatch: {0}")]
    Publish(String),

    #[error("ActivityWatch server not reachable at {url}")]
    ServerUnavailable { url: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::DatabaseNotFound { .. } => ErrorCode::DatabaseNotFound,
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::MalformedTimestamp { .. } => ErrorCode::MalformedTimestamp,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Publish(_) | Self::ServerUnavailable { .. } => ErrorCode::PublishError,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::DatabaseNotFound { .. } => Some(
                "Screen Time data lives in knowledgeC.db. Grant the terminal Full Disk Access, \
                 or pass the file explicitly with `--db <path>`."
                    .to_string(),
            ),

            Self::ServerUnavailable { url } => Some(format!(
                "Start aw-server (or aw-qt) and check that it listens on {url}. \
                 Use `--dry-run` to preview the import without a server."
            )),

            Self::Database(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::DatabaseBusy
                    || err.code == rusqlite::ErrorCode::DatabaseLocked =>
            {
                Some("The database is busy. Retry in a few seconds.".to_string())
            }

            Self::MalformedTimestamp { .. } => Some(
                "The Knowledge schema may have changed. Re-run with -vv to see the offending row."
                    .to_string(),
            ),

            Self::Database(_)
            | Self::Publish(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::InvalidArgument(_)
            | Self::Config(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
