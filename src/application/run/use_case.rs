//! Run Use Case
//!
//! Fans a task out across hosts. Within a host, steps run strictly in
//! order and stop at the first `error`; warnings do not stop a host. The
//! transfer channel is opened only when the task has a file step.

use tracing::{info, warn};

use crate::application::fanout::{for_each_host, HostRef};
use crate::application::session::{SessionGuard, TransferGuard};
use crate::application::step_executor::{exec_command, StepExecutor};
use crate::domain::entities::{ExecutionResult, HostTarget, RunResult, Subject, Task, TaskStep};
use crate::domain::ports::{BackupStore, SessionConnector, Transfer};

use super::options::RunOptions;

pub struct RunUseCase<C, B>
where
    C: SessionConnector,
    B: BackupStore,
{
    connector: C,
    backups: B,
}

impl<C, B> RunUseCase<C, B>
where
    C: SessionConnector,
    B: BackupStore,
{
    pub fn new(connector: C, backups: B) -> Self {
        Self { connector, backups }
    }

    /// Run `task` on every host, results in host order
    pub fn execute(&self, task: &Task, hosts: &[HostRef], options: &RunOptions) -> Vec<RunResult> {
        for_each_host(hosts, options.parallel, |host_ref| {
            let steps = match host_ref {
                HostRef::Unknown { alias, reason } => fail_steps(alias, task.steps(), reason),
                HostRef::Resolved(host) if options.dry_run => task
                    .steps()
                    .iter()
                    .map(|s| ExecutionResult::dry_run(host.alias(), Subject::Step(s.label())))
                    .collect(),
                HostRef::Resolved(host) => self.run_on_host(task, host),
            };
            RunResult::from_steps(host_ref.alias(), task.name(), steps)
        })
    }

    /// Run one ad-hoc command on every host
    ///
    /// Hosts are independent; each yields exactly one result.
    pub fn exec(&self, hosts: &[HostRef], command: &str, parallel: usize) -> Vec<ExecutionResult> {
        let label = TaskStep::exec(command).label();
        for_each_host(hosts, parallel, |host_ref| {
            let subject = Subject::Step(label.clone());
            let host = match host_ref {
                HostRef::Unknown { alias, reason } => {
                    return ExecutionResult::error(alias.as_str(), subject, reason.as_str())
                }
                HostRef::Resolved(host) => host,
            };
            match SessionGuard::open(&self.connector, host) {
                Ok(mut session) => exec_command(session.session(), host.alias(), subject, command),
                Err(e) => ExecutionResult::error(host.alias(), subject, e.to_string()),
            }
        })
    }

    fn run_on_host(&self, task: &Task, host: &HostTarget) -> Vec<ExecutionResult> {
        info!(host = host.alias(), task = task.name(), "running task");

        let mut session = match SessionGuard::open(&self.connector, host) {
            Ok(session) => session,
            Err(e) => {
                warn!(host = host.alias(), error = %e, "host skipped");
                return fail_steps(host.alias(), task.steps(), &e.to_string());
            }
        };
        let mut transfer: Option<TransferGuard> = if task.needs_transfer() {
            match session.open_transfer() {
                Ok(transfer) => Some(transfer),
                Err(e) => {
                    warn!(host = host.alias(), error = %e, "host skipped");
                    return fail_steps(host.alias(), task.steps(), &e.to_string());
                }
            }
        } else {
            None
        };

        let executor = StepExecutor::new(&self.backups);
        let mut results = Vec::with_capacity(task.steps().len());
        for step in task.steps() {
            let channel: Option<&mut dyn Transfer> = transfer.as_mut().map(|t| t.transfer());
            let result = executor.run_step(session.session(), channel, host.alias(), step);
            let failed = result.is_error();
            results.push(result);
            if failed {
                warn!(
                    host = host.alias(),
                    step = %step.label(),
                    "step failed, remaining steps skipped"
                );
                break;
            }
        }
        results
    }
}

fn fail_steps(alias: &str, steps: &[TaskStep], message: &str) -> Vec<ExecutionResult> {
    steps
        .iter()
        .map(|s| ExecutionResult::error(alias, Subject::Step(s.label()), message))
        .collect()
}
