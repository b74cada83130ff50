//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod backup_store;
pub mod remote_session;

pub use backup_store::{BackupEntry, BackupStore};
pub use remote_session::{
    CommandOutput, RemoteSession, SessionConnector, SessionError, SessionResult, Transfer,
};
