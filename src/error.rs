//! Error types for vmconf
//!
//! Uses `thiserror` for library errors. Every variant corresponds to one
//! failure class the orchestration engine reports in a result record.

use thiserror::Error;

use crate::domain::ports::SessionError;

/// Result type alias for vmconf operations
pub type VmconfResult<T> = Result<T, VmconfError>;

/// Main error type for vmconf operations
#[derive(Error, Debug)]
pub enum VmconfError {
    /// Session could not be opened (host unreachable or auth rejected)
    #[error("connection failed: {0}")]
    Connect(String),

    /// Backup directory or remote read failed while taking a backup
    #[error("backup failed: {0}")]
    Backup(String),

    /// Local file I/O failed
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Remote read or write failed
    #[error("transfer failed: {0}")]
    Transfer(String),

    /// No backup matches the requested key
    #[error("no backup found for {remote_path} on {alias}")]
    NotFound { alias: String, remote_path: String },

    /// Remote command exited non-zero or failed to start
    #[error("command failed: {0}")]
    Command(String),

    /// Manifest or client configuration is invalid
    #[error("{0}")]
    Config(String),
}

impl VmconfError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        VmconfError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn reading(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::io(format!("reading file {}", path.display()), source)
    }

    pub fn config(message: impl Into<String>) -> Self {
        VmconfError::Config(message.into())
    }
}

impl From<SessionError> for VmconfError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Connect(_) | SessionError::Auth(_) => {
                VmconfError::Connect(err.to_string())
            }
            SessionError::Transfer(msg) => VmconfError::Transfer(msg),
            SessionError::Command { .. } => VmconfError::Command(err.to_string()),
        }
    }
}
