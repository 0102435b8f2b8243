//! Error types and exit codes for steptrace
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (IO, JSON, engine faults)
//! - 2: Usage error (bad flags/args, invalid weights)
//! - 3: Data error (unknown node ids)

use thiserror::Error;

/// Exit codes for the steptrace CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - unknown node ids (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during steptrace operations
#[derive(Error, Debug)]
pub enum TraceError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid weight {weight} on edge {from} -> {to} (weights must be >= 1)")]
    InvalidWeight {
        from: String,
        to: String,
        weight: u64,
    },

    // Data errors (exit code 3)
    #[error("unknown {context} node: {id}")]
    UnknownNode { context: String, id: String },

    // Generic failures (exit code 1)
    #[error("bounded tracer stalled: no progress in round {round} (level {level}, bound {bound})")]
    StalledRound {
        round: u32,
        level: u32,
        bound: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl TraceError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            TraceError::UnknownFormat(_)
            | TraceError::UsageError(_)
            | TraceError::InvalidWeight { .. } => ExitCode::Usage,

            TraceError::UnknownNode { .. } => ExitCode::Data,

            TraceError::StalledRound { .. }
            | TraceError::Io(_)
            | TraceError::Json(_)
            | TraceError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            TraceError::UnknownFormat(_) => "unknown_format",
            TraceError::UsageError(_) => "usage_error",
            TraceError::InvalidWeight { .. } => "invalid_weight",
            TraceError::UnknownNode { .. } => "unknown_node",
            TraceError::StalledRound { .. } => "stalled_round",
            TraceError::Io(_) => "io_error",
            TraceError::Json(_) => "json_error",
            TraceError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for steptrace operations
pub type Result<T> = std::result::Result<T, TraceError>;
