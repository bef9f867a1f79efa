//! Error types for ownet
//!
//! Transport failures (connect, I/O) are kept apart from protocol failures
//! (malformed headers, negative return codes) so callers can decide whether
//! a retry makes sense.

use thiserror::Error;

/// Result type alias using OwError
pub type Result<T> = std::result::Result<T, OwError>;

/// Unified error type for owserver operations
#[derive(Debug, Error)]
pub enum OwError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Connect to {addr} failed: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Server returned error {code}")]
    Server { code: i32 },

    #[error("{path} not found (error {code})")]
    NotFound { path: String, code: i32 },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl OwError {
    /// True for failures of the TCP transport itself (connect, read, write).
    pub fn is_transport(&self) -> bool {
        matches!(self, OwError::Connect { .. } | OwError::Io(_))
    }

    /// The server's negative return code, if this error carries one
    pub fn server_code(&self) -> Option<i32> {
        match self {
            OwError::Server { code } | OwError::NotFound { code, .. } => Some(*code),
            _ => None,
        }
    }
}
