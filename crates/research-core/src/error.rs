//! Error types for the research run library.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for all research run operations.
#[derive(Error, Debug)]
pub enum ResearchError {
    /// An inbound event could not be decoded at all
    #[error("Invalid event at line {line}: {reason}")]
    InvalidEvent { line: usize, reason: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Session not found for the given research ID
    #[error("Research session '{id}' not found")]
    SessionNotFound { id: String },
    /// The workflow transport rejected or failed a request
    #[error("Transport error: {message}")]
    Transport { message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> ResearchError {
        ResearchError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl ResearchError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a transport error from any displayable message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a file system error for the given path.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for research run operations
pub type Result<T> = std::result::Result<T, ResearchError>;
