//! Remote Session implementation on the system ssh client
//!
//! Requires `ssh` on PATH, and `sshpass` for hosts that authenticate with a
//! password.

mod command;
mod session;
mod transfer;

pub use command::shell_quote;
pub use session::{SshConnector, SshSession};
pub use transfer::SshTransfer;
