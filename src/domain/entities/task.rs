//! Task entity - a named, ordered list of steps
//!
//! Step order is execution order. A later step may rely on an earlier one
//! having succeeded, which is why a run stops a host at its first failed step.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{VmconfError, VmconfResult};

/// One unit of work inside a task
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TaskStep {
    /// Push a local file to a remote path
    File { local: PathBuf, remote: String },
    /// Run a shell command on the host
    Exec {
        #[serde(rename = "run")]
        command: String,
    },
}

impl TaskStep {
    pub fn file(local: impl Into<PathBuf>, remote: impl Into<String>) -> Self {
        TaskStep::File {
            local: local.into(),
            remote: remote.into(),
        }
    }

    pub fn exec(command: impl Into<String>) -> Self {
        TaskStep::Exec {
            command: command.into(),
        }
    }

    /// Label used in results: `file:<remote>` or `exec:<command>`
    pub fn label(&self) -> String {
        match self {
            TaskStep::File { remote, .. } => format!("file:{}", remote),
            TaskStep::Exec { command } => format!("exec:{}", command),
        }
    }

    /// Whether this step needs a file transfer channel
    pub fn needs_transfer(&self) -> bool {
        matches!(self, TaskStep::File { .. })
    }

    /// Check that the fields this variant carries are non-empty
    pub fn validate(&self) -> Result<(), &'static str> {
        match self {
            TaskStep::File { local, .. } if local.as_os_str().is_empty() => {
                Err("missing local path")
            }
            TaskStep::File { remote, .. } if remote.is_empty() => Err("missing remote path"),
            TaskStep::Exec { command } if command.is_empty() => Err("missing run command"),
            _ => Ok(()),
        }
    }
}

/// A named, non-empty, ordered sequence of steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    name: String,
    steps: Vec<TaskStep>,
}

impl Task {
    pub fn new(name: impl Into<String>, steps: Vec<TaskStep>) -> VmconfResult<Self> {
        let name = name.into();
        if steps.is_empty() {
            return Err(VmconfError::config(format!("task {:?} has no steps", name)));
        }
        for (i, step) in steps.iter().enumerate() {
            step.validate().map_err(|msg| {
                VmconfError::config(format!("task {:?} step[{}] {}", name, i, msg))
            })?;
        }
        Ok(Self { name, steps })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[TaskStep] {
        &self.steps
    }

    pub fn needs_transfer(&self) -> bool {
        self.steps.iter().any(TaskStep::needs_transfer)
    }
}
