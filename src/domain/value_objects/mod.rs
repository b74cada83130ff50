//! Value Objects
//!
//! Immutable types that are defined by their value, not identity.

mod backup_key;
mod status;

pub use backup_key::{sanitize_remote_path, BackupKey, BackupStamp, TIMESTAMP_FORMAT};
pub use status::Status;
