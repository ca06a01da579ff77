//! Error types for ideabank

use thiserror::Error;

/// Result type alias for ideabank operations
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Main error type for ideabank
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TrackerError {
    /// Get error code for MCP protocol
    pub fn code(&self) -> i64 {
        match self {
            TrackerError::Validation(_) => -32602,
            TrackerError::UnknownTool(_) => -32601,
            _ => -32000,
        }
    }

    /// Message surfaced to the calling agent inside an error-flagged tool
    /// result. Falls back to a fixed string when the underlying error
    /// formats to nothing.
    pub fn display_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            "Unknown error occurred".to_string()
        } else {
            msg
        }
    }
}
