//! ssh-backed sessions

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, warn};

use super::command::{combined_output, merge_stderr, session_control_path, SshCommand};
use super::transfer::SshTransfer;
use crate::domain::entities::HostTarget;
use crate::domain::ports::{
    CommandOutput, RemoteSession, SessionConnector, SessionError, SessionResult, Transfer,
};

/// Exit status ssh uses for its own failures (as opposed to the remote command's)
const SSH_FAILURE: i32 = 255;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens sessions through the system ssh client
#[derive(Debug, Clone)]
pub struct SshConnector {
    control_dir: PathBuf,
    connect_timeout: Duration,
}

impl SshConnector {
    pub fn new() -> Self {
        Self {
            control_dir: std::env::temp_dir(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_control_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.control_dir = dir.into();
        self
    }
}

impl Default for SshConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionConnector for SshConnector {
    fn open(&self, host: &HostTarget) -> SessionResult<Box<dyn RemoteSession>> {
        let control_path = session_control_path(&self.control_dir);
        let ssh = SshCommand::new(host.clone(), control_path, self.connect_timeout);
        debug!(host = host.alias(), address = host.address(), "opening ssh session");

        // Starts the control master; later commands reuse it.
        let output = ssh.output("true").map_err(|e| {
            SessionError::Connect(format!("{}: starting ssh: {}", host.address(), e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if output.status.code() == Some(SSH_FAILURE) && stderr.contains("Permission denied") {
                return Err(SessionError::Auth(stderr));
            }
            return Err(SessionError::Connect(format!("{}: {}", host.address(), stderr)));
        }

        Ok(Box::new(SshSession { ssh }))
    }
}

/// One logical session to a host
pub struct SshSession {
    ssh: SshCommand,
}

impl RemoteSession for SshSession {
    fn execute(&mut self, command: &str) -> SessionResult<CommandOutput> {
        debug!(host = self.ssh.host().alias(), command, "executing remote command");
        let remote = merge_stderr(command);
        let output = self.ssh.output(&remote).map_err(|e| SessionError::Command {
            command: command.to_string(),
            message: e.to_string(),
            output: String::new(),
        })?;
        Ok(CommandOutput {
            output: combined_output(&output),
            exit_code: output.status.code(),
        })
    }

    fn open_transfer(&mut self) -> SessionResult<Box<dyn Transfer>> {
        Ok(Box::new(SshTransfer::new(self.ssh.clone())))
    }

    fn close(&mut self) -> SessionResult<()> {
        match self.ssh.exit_master() {
            Ok(output) if output.status.success() => Ok(()),
            Ok(output) => {
                // Master already gone (ControlPersist expiry) is not an error.
                warn!(
                    host = self.ssh.host().alias(),
                    stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                    "ssh control master did not exit cleanly"
                );
                Ok(())
            }
            Err(e) => Err(SessionError::Connect(format!(
                "{}: closing session: {}",
                self.ssh.host().address(),
                e
            ))),
        }
    }
}
