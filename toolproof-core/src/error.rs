//! Error types for Toolproof operations
//!
//! Per-action failures (parse, schema, constraint) never surface here; they
//! are captured in the step log. This type covers configuration and
//! transcript or metrics file I/O.

/// Result type for Toolproof operations
pub type Result<T> = std::result::Result<T, ToolproofError>;

/// Error types for the Toolproof harness
#[derive(Debug, thiserror::Error)]
pub enum ToolproofError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A transcript record could not be decoded
    #[error("Transcript error at line {line}: {message}")]
    Transcript { line: usize, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
