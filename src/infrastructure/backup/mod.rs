//! Backup Store Implementations
//!
//! Concrete implementations of the BackupStore port.

mod fs_store;

pub use fs_store::{FsBackupStore, DEFAULT_BACKUP_DIR};
