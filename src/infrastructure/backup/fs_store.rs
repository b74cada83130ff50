//! Filesystem Backup Store
//!
//! Implements the BackupStore port on a flat local directory. The directory
//! has no index file: identity and recency come from the file names (see
//! `BackupKey`) with mtime as a fallback for names that carry no timestamp.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime};
use fs2::FileExt;
use tracing::{debug, info};

use crate::domain::ports::{BackupEntry, BackupStore, Transfer};
use crate::domain::value_objects::{BackupKey, BackupStamp};
use crate::error::{VmconfError, VmconfResult};

/// Backup directory used when none is configured
pub const DEFAULT_BACKUP_DIR: &str = "./backups";

/// Serializes backup creation between concurrent runs sharing a directory
const LOCK_FILE_NAME: &str = ".vmconf.lock";

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Backup store rooted at a local directory
#[derive(Debug, Clone)]
pub struct FsBackupStore {
    dir: PathBuf,
    clock: fn() -> NaiveDateTime,
}

impl FsBackupStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            clock: local_now,
        }
    }

    /// Override the time source (tests)
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn lock(&self) -> VmconfResult<fs::File> {
        let lock_path = self.dir.join(LOCK_FILE_NAME);
        let lock_file = fs::File::create(&lock_path).map_err(|e| {
            VmconfError::Backup(format!("creating lock {}: {}", lock_path.display(), e))
        })?;
        lock_file.lock_exclusive().map_err(|e| {
            VmconfError::Backup(format!("locking {}: {}", lock_path.display(), e))
        })?;
        Ok(lock_file)
    }

    /// Write `data` under the first free name for `key`, never replacing a file
    fn write_new(&self, key: &BackupKey, data: &[u8]) -> VmconfResult<PathBuf> {
        let mut stamp = BackupStamp::new((self.clock)());
        loop {
            let path = self.dir.join(key.file_name(&stamp));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    if let Err(e) = file.write_all(data).and_then(|_| file.sync_all()) {
                        let _ = fs::remove_file(&path);
                        return Err(VmconfError::Backup(format!(
                            "writing backup {}: {}",
                            path.display(),
                            e
                        )));
                    }
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => stamp = stamp.next(),
                Err(e) => {
                    return Err(VmconfError::Backup(format!(
                        "creating backup {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }
    }
}

impl Default for FsBackupStore {
    fn default() -> Self {
        Self::new(DEFAULT_BACKUP_DIR)
    }
}

impl BackupStore for FsBackupStore {
    fn create_backup(
        &self,
        transfer: &mut dyn Transfer,
        remote_path: &str,
        host_alias: &str,
    ) -> VmconfResult<Option<PathBuf>> {
        if !transfer.exists(remote_path) {
            debug!(host = host_alias, remote_path, "remote file absent, no backup needed");
            return Ok(None);
        }

        fs::create_dir_all(&self.dir).map_err(|e| {
            VmconfError::Backup(format!("creating backup directory: {}", e))
        })?;

        let data = transfer.read_all(remote_path).map_err(|e| {
            VmconfError::Backup(format!("downloading backup of {}: {}", remote_path, e))
        })?;

        let lock_file = self.lock()?;
        let result = self.write_new(&BackupKey::new(host_alias, remote_path), &data);
        let _ = lock_file.unlock();

        let path = result?;
        info!(
            host = host_alias,
            remote_path,
            backup = %path.display(),
            bytes = data.len(),
            "backup created"
        );
        Ok(Some(path))
    }

    fn list_backups(&self) -> VmconfResult<Vec<BackupEntry>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(VmconfError::io(
                    format!("reading backup directory {}", self.dir.display()),
                    e,
                ))
            }
        };

        let mut backups = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }

            let (timestamp, seq) = match BackupStamp::from_file_name(name) {
                Some(stamp) => (stamp.time(), stamp.seq()),
                None => match metadata.modified() {
                    Ok(modified) => (DateTime::<Local>::from(modified).naive_local(), 0),
                    Err(_) => continue,
                },
            };

            backups.push(BackupEntry {
                path: entry.path(),
                timestamp,
                seq,
            });
        }

        // Stable sort: equal stamps keep read_dir order.
        backups.sort_by(|a, b| (b.timestamp, b.seq).cmp(&(a.timestamp, a.seq)));
        Ok(backups)
    }

    fn find_latest_backup(&self, host_alias: &str, remote_path: &str) -> VmconfResult<PathBuf> {
        let key = BackupKey::new(host_alias, remote_path);
        self.list_backups()?
            .into_iter()
            .find(|entry| entry.stamp_for(&key).is_some())
            .map(|entry| entry.path)
            .ok_or_else(|| VmconfError::NotFound {
                alias: host_alias.to_string(),
                remote_path: remote_path.to_string(),
            })
    }

    fn read_backup(&self, path: &Path) -> VmconfResult<Vec<u8>> {
        fs::read(path)
            .map_err(|e| VmconfError::io(format!("reading backup {}", path.display()), e))
    }
}
