//! Error types for homeward-core.
//!
//! Engine operations never return errors — every observation-point call
//! either performs its side effect, returns a best-effort result, or
//! silently no-ops. Errors exist only at the trace/CLI boundary.

use thiserror::Error;

/// Top-level error for the fallible boundary operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Trace loading/validation errors
    #[error("Trace error: {0}")]
    Trace(#[from] TraceError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors loading or validating a recorded signal trace.
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Failed to parse trace: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Incompatible trace version '{found}', expected major version {expected}")]
    IncompatibleVersion { found: String, expected: String },
}
