//! Report collection error types

use thiserror::Error;

/// Errors raised while collecting or decoding a hardware report
///
/// Each of these is fatal to a single collection attempt; nothing retries.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The enumeration tool exited with a non-zero status
    #[error("system_profiler exited with {status}: {message}")]
    CommandFailed { status: i32, message: String },

    /// The enumeration tool could not be started
    #[error("Failed to launch system_profiler: {0}")]
    Launch(#[source] std::io::Error),

    /// The enumeration tool did not finish in time
    #[error("system_profiler did not finish within {secs}s")]
    Timeout { secs: u64 },

    /// The payload is not valid JSON
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is valid JSON but not a top-level object
    #[error("Failed to decode system_profiler JSON payload.")]
    MalformedJson,

    /// I/O error while reading a saved report
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for report results
pub type Result<T> = std::result::Result<T, ReportError>;
