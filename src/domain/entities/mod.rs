//! Domain entities

mod file_action;
mod host;
mod result;
mod task;

pub use file_action::FileAction;
pub use host::{Credentials, HostTarget};
pub use result::{ExecutionResult, RunResult, Subject};
pub use task::{Task, TaskStep};
