//! Backup Store port
//!
//! Keeps a safety copy of every remote file before it is overwritten and
//! answers "what is the latest backup of (alias, remote path)?".

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::domain::ports::Transfer;
use crate::domain::value_objects::{BackupKey, BackupStamp};
use crate::error::VmconfResult;

/// One backup file as seen by a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    pub path: PathBuf,
    /// Timestamp parsed from the file name, or the file's mtime
    pub timestamp: NaiveDateTime,
    /// Same-second sequence number (0 when absent)
    pub seq: u32,
}

impl BackupEntry {
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    /// Stamp of this entry if it belongs to `key`
    pub fn stamp_for(&self, key: &BackupKey) -> Option<BackupStamp> {
        key.stamp_of(self.file_name())
    }
}

/// Storage for remote-file backups
pub trait BackupStore: Send + Sync {
    /// Copy `remote_path` into the store before it gets overwritten
    ///
    /// Returns `None` when the remote file does not exist (nothing to back
    /// up). Any failure is a `VmconfError::Backup` and must stop the upload.
    fn create_backup(
        &self,
        transfer: &mut dyn Transfer,
        remote_path: &str,
        host_alias: &str,
    ) -> VmconfResult<Option<PathBuf>>;

    /// All backups, newest first
    ///
    /// Entries with equal timestamps keep directory iteration order, which is
    /// platform-defined.
    fn list_backups(&self) -> VmconfResult<Vec<BackupEntry>>;

    /// Newest backup of `(host_alias, remote_path)`
    fn find_latest_backup(&self, host_alias: &str, remote_path: &str) -> VmconfResult<PathBuf>;

    /// Raw bytes of a backup file
    fn read_backup(&self, path: &Path) -> VmconfResult<Vec<u8>>;
}
