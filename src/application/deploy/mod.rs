//! Deploy Module
//!
//! Manifest deploy (every file to every server) and single-file push.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`DeployOptions`)
//! - `result` - Result types (`DeployResult`)
//! - `use_case` - Core use case logic (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use vmconf::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(SshConnector::new(), FsBackupStore::new(dir));
//! let result = use_case.execute(&servers, &files, &DeployOptions::new());
//! ```

mod options;
mod result;
mod use_case;

pub use options::DeployOptions;
pub use result::DeployResult;
pub use use_case::DeployUseCase;
