//! Deploy Result

use serde::Serialize;

use crate::domain::entities::ExecutionResult;
use crate::domain::value_objects::Status;

/// One record per (host, file), hosts in manifest order
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeployResult {
    pub results: Vec<ExecutionResult>,
}

impl DeployResult {
    pub fn new(results: Vec<ExecutionResult>) -> Self {
        Self { results }
    }

    pub fn has_errors(&self) -> bool {
        self.results.iter().any(ExecutionResult::is_error)
    }

    pub fn count(&self, status: Status) -> usize {
        self.results.iter().filter(|r| r.status() == status).count()
    }
}
