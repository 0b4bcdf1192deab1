//! Error types for the extraction pipeline

use std::path::PathBuf;
use thiserror::Error;

use crate::types::DocumentKind;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors that abort a run before or after the worker pools
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error on a path the run cannot proceed without
    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No extractor registered for a kind that has selected input files
    #[error("No extractor registered for document kind '{0}'")]
    UnknownKind(DocumentKind),

    /// A worker thread could not be spawned or panicked
    #[error("Worker error: {0}")]
    Worker(String),

    /// TOML config error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an IO error bound to the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a worker error
    pub fn worker(message: impl Into<String>) -> Self {
        Self::Worker(message.into())
    }
}

/// Per-document failures.
///
/// These never abort a run: the stage that hits one turns it into an error
/// count for the document's kind and moves on to the next item.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Source file missing, unreadable or permission denied
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The extractor rejected the document content
    #[error("Failed to parse {kind} document: {message}")]
    Parse { kind: DocumentKind, message: String },

    /// Text-based content could not be decoded
    #[error("Failed to decode {kind} document: {message}")]
    Encoding { kind: DocumentKind, message: String },

    /// Normalized text could not be persisted
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    /// Create a parse error
    pub fn parse(kind: DocumentKind, message: impl Into<String>) -> Self {
        Self::Parse {
            kind,
            message: message.into(),
        }
    }

    /// Create an encoding error
    pub fn encoding(kind: DocumentKind, message: impl Into<String>) -> Self {
        Self::Encoding {
            kind,
            message: message.into(),
        }
    }

    /// Short label used in log fields
    pub fn label(&self) -> &'static str {
        match self {
            Self::Read { .. } => "read_error",
            Self::Parse { .. } => "parse_error",
            Self::Encoding { .. } => "encoding_error",
            Self::Write { .. } => "write_error",
        }
    }
}
