//! Backups listing

use crate::domain::ports::{BackupEntry, BackupStore};
use crate::domain::value_objects::BackupKey;
use crate::error::VmconfResult;

pub struct BackupsUseCase<B: BackupStore> {
    backups: B,
}

impl<B: BackupStore> BackupsUseCase<B> {
    pub fn new(backups: B) -> Self {
        Self { backups }
    }

    /// All backups newest first, optionally only those of one key
    pub fn list(&self, key: Option<&BackupKey>) -> VmconfResult<Vec<BackupEntry>> {
        let entries = self.backups.list_backups()?;
        Ok(match key {
            Some(key) => entries
                .into_iter()
                .filter(|entry| entry.stamp_for(key).is_some())
                .collect(),
            None => entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::FsBackupStore;

    fn touch(dir: &std::path::Path, name: &str) {
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn filters_by_exact_key() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "web1_etc_app.conf_20240101-000000");
        touch(dir.path(), "web1_etc_app.conf_20240201-000000");
        touch(dir.path(), "web1_etc_app.conf.bak_20240301-000000");
        touch(dir.path(), "web2_etc_app.conf_20240401-000000");
        let use_case = BackupsUseCase::new(FsBackupStore::new(dir.path()));

        let key = BackupKey::new("web1", "/etc/app.conf");
        let names: Vec<String> = use_case
            .list(Some(&key))
            .unwrap()
            .iter()
            .map(|e| e.file_name().to_string())
            .collect();

        assert_eq!(
            names,
            vec![
                "web1_etc_app.conf_20240201-000000",
                "web1_etc_app.conf_20240101-000000"
            ]
        );
    }

    #[test]
    fn unfiltered_lists_everything_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a_x_20240101-000000");
        touch(dir.path(), "b_y_20250101-000000");
        let use_case = BackupsUseCase::new(FsBackupStore::new(dir.path()));

        let entries = use_case.list(None).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].file_name(), "b_y_20250101-000000");
    }

    #[test]
    fn missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let use_case = BackupsUseCase::new(FsBackupStore::new(dir.path().join("nope")));
        assert!(use_case.list(None).unwrap().is_empty());
    }
}
