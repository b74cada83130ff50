//! Rollback Use Case
//!
//! Restores one backup to its original remote path, byte for byte. The
//! backup is resolved and read before any connection is made, so a missing
//! backup never touches the host.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::application::session::SessionGuard;
use crate::domain::entities::HostTarget;
use crate::domain::ports::{BackupStore, SessionConnector};
use crate::domain::value_objects::Status;
use crate::error::VmconfResult;

/// Outcome of a successful (or previewed) rollback
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollbackResult {
    pub server: String,
    pub file: String,
    pub backup: PathBuf,
    pub status: Status,
}

pub struct RollbackUseCase<C, B>
where
    C: SessionConnector,
    B: BackupStore,
{
    connector: C,
    backups: B,
}

impl<C, B> RollbackUseCase<C, B>
where
    C: SessionConnector,
    B: BackupStore,
{
    pub fn new(connector: C, backups: B) -> Self {
        Self { connector, backups }
    }

    /// Restore `backup`, or the latest backup of `(host alias, remote)`
    pub fn execute(
        &self,
        host: &HostTarget,
        remote: &str,
        backup: Option<&Path>,
        dry_run: bool,
    ) -> VmconfResult<RollbackResult> {
        let backup = match backup {
            Some(path) => path.to_path_buf(),
            None => self.backups.find_latest_backup(host.alias(), remote)?,
        };
        let data = self.backups.read_backup(&backup)?;

        let mut result = RollbackResult {
            server: host.alias().to_string(),
            file: remote.to_string(),
            backup,
            status: Status::DryRun,
        };
        if dry_run {
            return Ok(result);
        }

        let mut session = SessionGuard::open(&self.connector, host)?;
        let mut transfer = session.open_transfer()?;
        transfer.transfer().write_all(&data, remote)?;

        info!(
            host = host.alias(),
            remote,
            backup = %result.backup.display(),
            "backup restored"
        );
        result.status = Status::Ok;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VmconfError;
    use crate::infrastructure::FsBackupStore;
    use crate::test_support::{host, MemoryConnector, MemoryHost};

    fn seed(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn restores_latest_backup_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path(), "web1_etc_app.conf_20240101-000000", b"older\r\n");
        let latest = seed(dir.path(), "web1_etc_app.conf_20240301-000000", b"latest\r\n");
        seed(dir.path(), "web1_etc_app.conf.bak_20250101-000000", b"other file");
        let remote = MemoryHost::new().with_file("/etc/app.conf", b"broken").into_shared();
        let connector = MemoryConnector::new().with_host("web1", remote.clone());
        let use_case = RollbackUseCase::new(connector, FsBackupStore::new(dir.path()));

        let result = use_case
            .execute(&host("web1"), "/etc/app.conf", None, false)
            .unwrap();

        assert_eq!(result.status, Status::Ok);
        assert_eq!(result.backup, latest);
        assert_eq!(remote.file("/etc/app.conf").unwrap(), b"latest\r\n");
        assert_eq!(remote.sessions_closed(), 1);
        assert_eq!(remote.transfers_closed(), 1);
    }

    #[test]
    fn explicit_backup_bypasses_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let chosen = seed(dir.path(), "hand-picked.conf", b"known good");
        let remote = MemoryHost::new().into_shared();
        let connector = MemoryConnector::new().with_host("web1", remote.clone());
        let use_case = RollbackUseCase::new(connector, FsBackupStore::new(dir.path().join("none")));

        let result = use_case
            .execute(&host("web1"), "/etc/app.conf", Some(chosen.as_path()), false)
            .unwrap();

        assert_eq!(result.backup, chosen);
        assert_eq!(remote.file("/etc/app.conf").unwrap(), b"known good");
    }

    #[test]
    fn missing_backup_fails_before_connecting() {
        let dir = tempfile::tempdir().unwrap();
        let remote = MemoryHost::new().into_shared();
        let connector = MemoryConnector::new().with_host("web1", remote.clone());
        let use_case = RollbackUseCase::new(connector, FsBackupStore::new(dir.path()));

        let err = use_case
            .execute(&host("web1"), "/etc/app.conf", None, false)
            .unwrap_err();

        assert!(matches!(err, VmconfError::NotFound { .. }));
        assert_eq!(remote.sessions_opened(), 0);
    }

    #[test]
    fn dry_run_resolves_without_connecting() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBackupStore::new(dir.path());
        let latest = seed(dir.path(), "web1_etc_app.conf_20240501-120000", b"x");
        let remote = MemoryHost::new().into_shared();
        let connector = MemoryConnector::new().with_host("web1", remote.clone());
        let use_case = RollbackUseCase::new(connector, store);

        let result = use_case
            .execute(&host("web1"), "/etc/app.conf", None, true)
            .unwrap();

        assert_eq!(result.status, Status::DryRun);
        assert_eq!(result.backup, latest);
        assert_eq!(remote.sessions_opened(), 0);
    }

    #[test]
    fn upload_failure_is_transfer_error() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path(), "web1_etc_app.conf_20240501-120000", b"x");
        let remote = MemoryHost::new().with_unwritable("/etc/app.conf").into_shared();
        let connector = MemoryConnector::new().with_host("web1", remote.clone());
        let use_case = RollbackUseCase::new(connector, FsBackupStore::new(dir.path()));

        let err = use_case
            .execute(&host("web1"), "/etc/app.conf", None, false)
            .unwrap_err();

        assert!(matches!(err, VmconfError::Transfer(_)));
        assert_eq!(remote.sessions_closed(), 1);
    }
}
