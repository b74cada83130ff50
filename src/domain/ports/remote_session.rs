//! Remote Session port - abstraction over the secure remote channel
//!
//! The orchestration engine only needs three capabilities from a host:
//! open a session, run a command, and move whole files. How that happens
//! (ssh binary, library, mock) is an infrastructure concern.
//!
//! Implementations:
//! - `SshConnector` - system `ssh` client
//! - in-memory hosts in the use-case tests

use thiserror::Error;

use crate::domain::entities::HostTarget;

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Session and transfer errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Host unreachable, DNS failure, handshake failure
    #[error("connecting to {0}")]
    Connect(String),
    /// Credentials rejected or unreadable
    #[error("authentication failed: {0}")]
    Auth(String),
    /// Remote file read/write failed
    #[error("{0}")]
    Transfer(String),
    /// Command could not be started or exited non-zero
    #[error("executing {command:?}: {message}")]
    Command {
        command: String,
        message: String,
        output: String,
    },
}

/// Combined stdout/stderr of a remote command and how it exited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub output: String,
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            exit_code: Some(0),
        }
    }

    pub fn failure(output: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self {
            output: output.into(),
            exit_code,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Turn a non-zero exit into a `SessionError::Command`, keeping the output
    pub fn into_result(self, command: &str) -> SessionResult<String> {
        if self.is_success() {
            return Ok(self.output);
        }
        let message = match self.exit_code {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        };
        Err(SessionError::Command {
            command: command.to_string(),
            message,
            output: self.output,
        })
    }
}

/// Opens sessions to hosts
///
/// Shared by every host of a fan-out, possibly from several worker threads.
pub trait SessionConnector: Send + Sync {
    fn open(&self, host: &HostTarget) -> SessionResult<Box<dyn RemoteSession>>;
}

impl<C: SessionConnector + ?Sized> SessionConnector for &C {
    fn open(&self, host: &HostTarget) -> SessionResult<Box<dyn RemoteSession>> {
        (**self).open(host)
    }
}

/// An open session to one host
pub trait RemoteSession {
    /// Run a command, capturing combined output
    ///
    /// `Err` means the command could not be started at all; a non-zero exit
    /// is reported through `CommandOutput::exit_code`.
    fn execute(&mut self, command: &str) -> SessionResult<CommandOutput>;

    /// Open a file transfer channel over this session
    fn open_transfer(&mut self) -> SessionResult<Box<dyn Transfer>>;

    fn close(&mut self) -> SessionResult<()>;
}

/// Whole-file access to a host's filesystem
pub trait Transfer {
    fn exists(&mut self, remote_path: &str) -> bool;

    fn read_all(&mut self, remote_path: &str) -> SessionResult<Vec<u8>>;

    fn write_all(&mut self, data: &[u8], remote_path: &str) -> SessionResult<()>;

    fn close(&mut self) -> SessionResult<()>;
}
