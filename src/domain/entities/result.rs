//! Execution results - the output contract of every orchestration use case
//!
//! One `ExecutionResult` is produced per (host, file) or (host, step). Results
//! are built once and never mutated after they are appended to a collection.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::value_objects::Status;

/// What a result is about: a deployed file or a task step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    /// Remote path of a deployed file
    File(String),
    /// Step label (`file:<remote>` or `exec:<command>`)
    Step(String),
}

impl Subject {
    pub fn name(&self) -> &str {
        match self {
            Subject::File(name) | Subject::Step(name) => name,
        }
    }
}

/// Outcome of one file or step on one host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    server: String,
    #[serde(flatten)]
    subject: Subject,
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    backup: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ExecutionResult {
    pub fn new(server: impl Into<String>, subject: Subject, status: Status) -> Self {
        Self {
            server: server.into(),
            subject,
            status,
            backup: None,
            output: None,
            error: None,
        }
    }

    pub fn ok(server: impl Into<String>, subject: Subject) -> Self {
        Self::new(server, subject, Status::Ok)
    }

    pub fn dry_run(server: impl Into<String>, subject: Subject) -> Self {
        Self::new(server, subject, Status::DryRun)
    }

    pub fn error(server: impl Into<String>, subject: Subject, error: impl Into<String>) -> Self {
        Self::new(server, subject, Status::Error).with_error(error)
    }

    pub fn with_backup(mut self, backup: Option<PathBuf>) -> Self {
        self.backup = backup;
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        let output = output.into();
        self.output = (!output.is_empty()).then_some(output);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Re-classify a result (used to downgrade an upload to a warning)
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn backup(&self) -> Option<&Path> {
        self.backup.as_deref()
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.status.is_error()
    }
}

/// Outcome of a task on one host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    server: String,
    task: String,
    status: Status,
    steps: Vec<ExecutionResult>,
}

impl RunResult {
    /// Summarize step results into a host status
    ///
    /// Any `error` step makes the host `error`. A host whose steps are all
    /// previews is `dry-run`. Otherwise (warnings included) it is `ok`.
    pub fn from_steps(
        server: impl Into<String>,
        task: impl Into<String>,
        steps: Vec<ExecutionResult>,
    ) -> Self {
        let status = if steps.iter().any(ExecutionResult::is_error) {
            Status::Error
        } else if !steps.is_empty() && steps.iter().all(|s| s.status() == Status::DryRun) {
            Status::DryRun
        } else {
            Status::Ok
        };
        Self {
            server: server.into(),
            task: task.into(),
            status,
            steps,
        }
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn steps(&self) -> &[ExecutionResult] {
        &self.steps
    }

    pub fn is_error(&self) -> bool {
        self.status.is_error()
    }
}
