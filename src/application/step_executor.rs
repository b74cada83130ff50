//! Step Executor
//!
//! Executes one unit of work against one already-open session and turns
//! every failure into a result record. A file push is
//! backup → normalize → upload; the first failing stage ends it.

use std::path::Path;

use tracing::{debug, warn};

use crate::domain::entities::{ExecutionResult, FileAction, Subject, TaskStep};
use crate::domain::ports::{BackupStore, RemoteSession, Transfer};
use crate::domain::services::normalize_file;
use crate::domain::value_objects::Status;
use crate::error::VmconfError;

pub struct StepExecutor<'a, B: BackupStore + ?Sized> {
    backups: &'a B,
}

impl<'a, B: BackupStore + ?Sized> StepExecutor<'a, B> {
    pub fn new(backups: &'a B) -> Self {
        Self { backups }
    }

    /// Back up, normalize and upload one file
    pub fn push_file(
        &self,
        transfer: &mut dyn Transfer,
        alias: &str,
        subject: Subject,
        local: &Path,
        remote: &str,
    ) -> ExecutionResult {
        let backup = match self.backups.create_backup(transfer, remote, alias) {
            Ok(backup) => backup,
            Err(e) => {
                warn!(host = alias, remote, error = %e, "backup failed, upload skipped");
                return ExecutionResult::error(
                    alias,
                    subject,
                    format!("backup failed (aborting): {}", backup_detail(e)),
                );
            }
        };

        let normalized = match normalize_file(local) {
            Ok(data) => data,
            Err(e) => {
                let message = format!("normalization failed: {}", e);
                return ExecutionResult::error(alias, subject, message).with_backup(backup);
            }
        };

        if let Err(e) = transfer.write_all(&normalized, remote) {
            return ExecutionResult::error(alias, subject, format!("upload failed: {}", e))
                .with_backup(backup);
        }

        debug!(host = alias, remote, bytes = normalized.len(), "file uploaded");
        ExecutionResult::ok(alias, subject).with_backup(backup)
    }

    /// Push a manifest file and run its post-action
    ///
    /// A failed post-action downgrades the result to `warning`: the file is
    /// in place but the service may not have picked it up.
    pub fn deploy_file(
        &self,
        session: &mut dyn RemoteSession,
        transfer: &mut dyn Transfer,
        alias: &str,
        action: &FileAction,
    ) -> ExecutionResult {
        let subject = Subject::File(action.remote().to_string());
        let result = self.push_file(transfer, alias, subject, action.local(), action.remote());
        match action.post_action() {
            Some(command) if !result.is_error() => run_post_action(session, alias, command, result),
            _ => result,
        }
    }

    /// Execute one task step
    ///
    /// `transfer` is `None` only for tasks without file steps.
    pub fn run_step(
        &self,
        session: &mut dyn RemoteSession,
        transfer: Option<&mut dyn Transfer>,
        alias: &str,
        step: &TaskStep,
    ) -> ExecutionResult {
        let subject = Subject::Step(step.label());
        match step {
            TaskStep::File { local, remote } => match transfer {
                Some(transfer) => self.push_file(transfer, alias, subject, local, remote),
                None => {
                    let message = "transfer failed: no transfer channel open";
                    ExecutionResult::error(alias, subject, message)
                }
            },
            TaskStep::Exec { command } => exec_command(session, alias, subject, command),
        }
    }
}

/// Run a command and keep its output whatever the outcome
///
/// Successful output is trimmed; failed output is kept verbatim.
pub fn exec_command(
    session: &mut dyn RemoteSession,
    alias: &str,
    subject: Subject,
    command: &str,
) -> ExecutionResult {
    match session.execute(command) {
        Ok(output) => {
            let text = output.output.clone();
            match output.into_result(command) {
                Ok(_) => ExecutionResult::ok(alias, subject).with_output(text.trim()),
                Err(e) => {
                    warn!(host = alias, command, error = %e, "remote command failed");
                    ExecutionResult::error(alias, subject, VmconfError::from(e).to_string())
                        .with_output(text)
                }
            }
        }
        Err(e) => ExecutionResult::error(alias, subject, VmconfError::from(e).to_string()),
    }
}

fn run_post_action(
    session: &mut dyn RemoteSession,
    alias: &str,
    command: &str,
    result: ExecutionResult,
) -> ExecutionResult {
    let (message, output) = match session.execute(command) {
        Ok(out) => {
            let text = out.output.clone();
            match out.into_result(command) {
                Ok(_) => return result,
                Err(e) => (e.to_string(), text),
            }
        }
        Err(e) => (e.to_string(), String::new()),
    };
    warn!(host = alias, command, error = %message, "post-action failed");
    result
        .with_status(Status::Warning)
        .with_error(format!("restart failed: {} (output: {})", message, output))
}

fn backup_detail(err: VmconfError) -> String {
    match err {
        VmconfError::Backup(message) => message,
        other => other.to_string(),
    }
}
