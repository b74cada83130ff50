//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::Path;

use crate::application::{
    BackupsUseCase, DeployUseCase, PingUseCase, RollbackUseCase, RunUseCase,
};
use crate::infrastructure::{FsBackupStore, SshConnector};

/// Type alias for the concrete DeployUseCase with all dependencies
pub type ConcreteDeployUseCase = DeployUseCase<SshConnector, FsBackupStore>;

/// Type alias for the concrete RunUseCase with all dependencies
pub type ConcreteRunUseCase = RunUseCase<SshConnector, FsBackupStore>;

pub type ConcreteRollbackUseCase = RollbackUseCase<SshConnector, FsBackupStore>;

pub type ConcretePingUseCase = PingUseCase<SshConnector>;

pub type ConcreteBackupsUseCase = BackupsUseCase<FsBackupStore>;

/// Create a deploy use case (also serves `push`)
pub fn create_deploy_use_case(backup_dir: &Path) -> ConcreteDeployUseCase {
    DeployUseCase::new(SshConnector::new(), FsBackupStore::new(backup_dir))
}

/// Create a run use case (also serves `exec`)
pub fn create_run_use_case(backup_dir: &Path) -> ConcreteRunUseCase {
    RunUseCase::new(SshConnector::new(), FsBackupStore::new(backup_dir))
}

pub fn create_rollback_use_case(backup_dir: &Path) -> ConcreteRollbackUseCase {
    RollbackUseCase::new(SshConnector::new(), FsBackupStore::new(backup_dir))
}

pub fn create_ping_use_case() -> ConcretePingUseCase {
    PingUseCase::new(SshConnector::new())
}

pub fn create_backups_use_case(backup_dir: &Path) -> ConcreteBackupsUseCase {
    BackupsUseCase::new(FsBackupStore::new(backup_dir))
}
