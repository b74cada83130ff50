//! Deploy Use Case
//!
//! Pushes every manifest file to every server. Files are independent: a
//! failed backup or upload of one file does not stop the next file on the
//! same host. Each host gets its own session, released on every exit path.

use std::path::Path;

use tracing::{info, warn};

use crate::application::fanout::for_each_host;
use crate::application::session::SessionGuard;
use crate::application::step_executor::StepExecutor;
use crate::domain::entities::{ExecutionResult, FileAction, HostTarget, Subject};
use crate::domain::ports::{BackupStore, SessionConnector};

use super::options::DeployOptions;
use super::result::DeployResult;

pub struct DeployUseCase<C, B>
where
    C: SessionConnector,
    B: BackupStore,
{
    connector: C,
    backups: B,
}

impl<C, B> DeployUseCase<C, B>
where
    C: SessionConnector,
    B: BackupStore,
{
    pub fn new(connector: C, backups: B) -> Self {
        Self { connector, backups }
    }

    /// Deploy `files` to every server
    pub fn execute(
        &self,
        servers: &[HostTarget],
        files: &[FileAction],
        options: &DeployOptions,
    ) -> DeployResult {
        let per_host = for_each_host(servers, options.parallel, |host| {
            if options.dry_run {
                return files
                    .iter()
                    .map(|f| ExecutionResult::dry_run(host.alias(), file_subject(f.remote())))
                    .collect();
            }
            self.deploy_host(host, files)
        });
        DeployResult::new(per_host.into_iter().flatten().collect())
    }

    /// Push a single file to one host (no post-action)
    pub fn push(
        &self,
        host: &HostTarget,
        local: &Path,
        remote: &str,
        dry_run: bool,
    ) -> ExecutionResult {
        let subject = file_subject(remote);
        if dry_run {
            return ExecutionResult::dry_run(host.alias(), subject);
        }

        let mut session = match SessionGuard::open(&self.connector, host) {
            Ok(session) => session,
            Err(e) => return ExecutionResult::error(host.alias(), subject, e.to_string()),
        };
        let mut transfer = match session.open_transfer() {
            Ok(transfer) => transfer,
            Err(e) => return ExecutionResult::error(host.alias(), subject, e.to_string()),
        };

        StepExecutor::new(&self.backups).push_file(
            transfer.transfer(),
            host.alias(),
            subject,
            local,
            remote,
        )
    }

    fn deploy_host(&self, host: &HostTarget, files: &[FileAction]) -> Vec<ExecutionResult> {
        info!(host = host.alias(), files = files.len(), "deploying");

        let mut session = match SessionGuard::open(&self.connector, host) {
            Ok(session) => session,
            Err(e) => {
                warn!(host = host.alias(), error = %e, "host skipped");
                return fail_all(host, files, &e.to_string());
            }
        };
        let mut transfer = match session.open_transfer() {
            Ok(transfer) => transfer,
            Err(e) => {
                warn!(host = host.alias(), error = %e, "host skipped");
                return fail_all(host, files, &e.to_string());
            }
        };

        let executor = StepExecutor::new(&self.backups);
        let results: Vec<ExecutionResult> = files
            .iter()
            .map(|file| {
                executor.deploy_file(session.session(), transfer.transfer(), host.alias(), file)
            })
            .collect();

        info!(
            host = host.alias(),
            failed = results.iter().filter(|r| r.is_error()).count(),
            "host done"
        );
        results
    }
}

fn file_subject(remote: &str) -> Subject {
    Subject::File(remote.to_string())
}

fn fail_all(host: &HostTarget, files: &[FileAction], message: &str) -> Vec<ExecutionResult> {
    files
        .iter()
        .map(|f| ExecutionResult::error(host.alias(), file_subject(f.remote()), message))
        .collect()
}
