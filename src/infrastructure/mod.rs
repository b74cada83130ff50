//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `backup/` - Backup store on a local directory
//! - `ssh/` - Remote sessions over the system ssh client

pub mod backup;
pub mod ssh;

// Re-export for convenience
pub use backup::{FsBackupStore, DEFAULT_BACKUP_DIR};
pub use ssh::{SshConnector, SshSession, SshTransfer};
