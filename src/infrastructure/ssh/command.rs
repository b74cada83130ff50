//! `ssh` invocation builder
//!
//! Every remote operation is one run of the system ssh client multiplexed
//! over a control socket owned by a single session. Password auth goes through `sshpass -e`
//! so the secret never appears on a command line.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::domain::entities::HostTarget;

/// Quote a string for a POSIX shell
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

static SESSION_SEQ: AtomicUsize = AtomicUsize::new(0);

/// Fresh control socket path under `dir`
///
/// Sessions to the same host never share a master, so closing one cannot
/// cut off another's transfer.
pub fn session_control_path(dir: &Path) -> PathBuf {
    let seq = SESSION_SEQ.fetch_add(1, Ordering::Relaxed);
    dir.join(format!("vmconf-{}-{}-%C", std::process::id(), seq))
}

/// Run `command` with its stderr folded into stdout, in write order
pub fn merge_stderr(command: &str) -> String {
    format!("{{ {}\n}} 2>&1", command)
}

/// Connection parameters shared by all commands of one session
#[derive(Debug, Clone)]
pub struct SshCommand {
    host: HostTarget,
    control_path: PathBuf,
    connect_timeout: Duration,
}

impl SshCommand {
    pub fn new(host: HostTarget, control_path: PathBuf, connect_timeout: Duration) -> Self {
        Self {
            host,
            control_path,
            connect_timeout,
        }
    }

    pub fn host(&self) -> &HostTarget {
        &self.host
    }

    /// ssh options without the remote command
    pub fn ssh_args(&self) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            "ControlMaster=auto".to_string(),
            "-o".to_string(),
            format!("ControlPath={}", self.control_path.display()),
            "-o".to_string(),
            "ControlPersist=60".to_string(),
            "-o".to_string(),
            "StrictHostKeyChecking=accept-new".to_string(),
            "-o".to_string(),
            format!("ConnectTimeout={}", self.connect_timeout.as_secs().max(1)),
        ];
        let credentials = self.host.credentials();
        if credentials.password_value().is_none() {
            args.push("-o".to_string());
            args.push("BatchMode=yes".to_string());
        }
        if let Some(key) = credentials.key_path() {
            args.push("-i".to_string());
            args.push(key.display().to_string());
        }
        if let Some(port) = self.host.port() {
            args.push("-p".to_string());
            args.push(port.to_string());
        }
        args
    }

    /// Build the process for `remote` (or for `ssh_extra` control requests)
    fn build(&self, ssh_extra: &[&str], remote: Option<&str>) -> Command {
        let mut cmd = match self.host.credentials().password_value() {
            Some(password) => {
                let mut cmd = Command::new("sshpass");
                cmd.arg("-e").arg("ssh").env("SSHPASS", password);
                cmd
            }
            None => Command::new("ssh"),
        };
        cmd.args(self.ssh_args())
            .args(ssh_extra)
            .arg(self.host.destination());
        if let Some(remote) = remote {
            cmd.arg("--").arg(remote);
        }
        cmd
    }

    /// Run `remote` on the host, capturing stdout and stderr
    pub fn output(&self, remote: &str) -> std::io::Result<Output> {
        self.build(&[], Some(remote))
            .stdin(Stdio::null())
            .output()
    }

    /// Run `remote` with `input` on its stdin
    pub fn output_with_input(&self, remote: &str, input: &[u8]) -> std::io::Result<Output> {
        let mut child = self
            .build(&[], Some(remote))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            // A remote that exits early closes the pipe; its status tells why.
            if let Err(e) = stdin.write_all(input) {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(e);
                }
            }
        }

        child.wait_with_output()
    }

    /// Ask the control master to exit
    pub fn exit_master(&self) -> std::io::Result<Output> {
        self.build(&["-O", "exit"], None)
            .stdin(Stdio::null())
            .output()
    }
}

/// stdout followed by stderr, lossily decoded
///
/// Commands wrapped by [`merge_stderr`] leave only ssh's own diagnostics on
/// stderr.
pub fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text
}

/// Directory part of a remote POSIX path
pub fn remote_parent(path: &str) -> Option<&str> {
    match path.rsplit_once('/') {
        Some(("", _)) => Some("/"),
        Some((dir, _)) => Some(dir),
        None => None,
    }
}
