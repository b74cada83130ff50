//! Whole-file transfer over ssh
//!
//! Files stream through `cat` on the remote side. Writing into an existing
//! file truncates it in place, so owner and permissions are preserved.

use tracing::debug;

use super::command::{remote_parent, shell_quote, SshCommand};
use crate::domain::ports::{SessionError, SessionResult, Transfer};

/// `test -e` status for a missing path
const ABSENT: i32 = 1;

pub struct SshTransfer {
    ssh: SshCommand,
}

impl SshTransfer {
    pub fn new(ssh: SshCommand) -> Self {
        Self { ssh }
    }
}

impl Transfer for SshTransfer {
    /// Only `test -e` exiting 1 means absent
    ///
    /// Anything else, ssh failing on its own included, reports the file as
    /// present so the backup read fails instead of being skipped.
    fn exists(&mut self, remote_path: &str) -> bool {
        match self.ssh.output(&format!("test -e {}", shell_quote(remote_path))) {
            Ok(output) => output.status.code() != Some(ABSENT),
            Err(e) => {
                debug!(remote_path, error = %e, "existence check could not run");
                true
            }
        }
    }

    fn read_all(&mut self, remote_path: &str) -> SessionResult<Vec<u8>> {
        let output = self
            .ssh
            .output(&format!("cat {}", shell_quote(remote_path)))
            .map_err(|e| SessionError::Transfer(format!("reading {}: {}", remote_path, e)))?;

        if !output.status.success() {
            return Err(SessionError::Transfer(format!(
                "reading {}: {}",
                remote_path,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(output.stdout)
    }

    fn write_all(&mut self, data: &[u8], remote_path: &str) -> SessionResult<()> {
        let target = shell_quote(remote_path);
        let command = match remote_parent(remote_path) {
            Some(dir) => format!("mkdir -p {} && cat > {}", shell_quote(dir), target),
            None => format!("cat > {}", target),
        };

        let output = self
            .ssh
            .output_with_input(&command, data)
            .map_err(|e| SessionError::Transfer(format!("writing {}: {}", remote_path, e)))?;

        if !output.status.success() {
            return Err(SessionError::Transfer(format!(
                "writing {}: {}",
                remote_path,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }

    fn close(&mut self) -> SessionResult<()> {
        Ok(())
    }
}
