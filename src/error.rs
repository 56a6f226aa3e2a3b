//! Error types for the token counter.
//!
//! Every variant is fatal to a run except [`TcError::UndecodableContent`],
//! which the input collector recovers from when the skip policy is active.
//! Display strings are written so that the binary only has to prefix them
//! with `tc: ` to produce shell-style diagnostics.

use std::path::PathBuf;

use thiserror::Error;

/// Token counter errors.
#[derive(Error, Debug)]
pub enum TcError {
    /// Encoding name is not in the tokenizer registry.
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    /// Input path does not exist.
    #[error("{}: No such file or directory", .0.display())]
    NotFound(PathBuf),

    /// Input path names a directory.
    #[error("{}: Is a directory", .0.display())]
    IsDirectory(PathBuf),

    /// Input bytes are not valid UTF-8.
    #[error("{name}: invalid UTF-8 content")]
    UndecodableContent {
        /// File path or `stdin`.
        name: String,
    },

    /// Any other failure while reading an input path.
    #[error("{}: {source}", .path.display())]
    Read {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Tokenizer failed to load its BPE tables.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error on a standard stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TcError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Whether the collector may skip the offending input and continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TcError::UndecodableContent { .. })
    }
}

/// Result type alias for token counter operations
pub type Result<T> = std::result::Result<T, TcError>;

impl From<toml::de::Error> for TcError {
    fn from(err: toml::de::Error) -> Self {
        TcError::Config(err.to_string())
    }
}
