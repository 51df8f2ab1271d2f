//! Error types for hlspack-av.

use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while packaging media.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The output workspace could not be created.
    #[error("workspace error: {0}")]
    Workspace(String),

    /// A required external tool is not available or could not be launched.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// The engine ran but exited with a non-zero status.
    #[error("engine exited with status {exit_code}: {detail}")]
    EngineFailure { exit_code: i32, detail: String },

    /// The engine was killed by a signal before exiting normally. Covers
    /// caller-initiated cancellation and timeouts as well as external kills.
    #[error("engine terminated before exiting normally (signal {})", .signal.map_or_else(|| String::from("unknown"), |s| s.to_string()))]
    EngineTerminated { signal: Option<i32> },

    /// The master playlist could not be persisted after a successful encode.
    /// Segments exist on disk without a usable manifest at this point.
    #[error("failed to write master playlist {}: {source}", .path.display())]
    ManifestWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Source probing failed.
    #[error("probe error: {0}")]
    Probe(String),

    /// The job description is unusable (e.g. empty rendition ladder).
    #[error("invalid job: {0}")]
    InvalidJob(String),

    /// The specified file was not found.
    #[error("file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}
