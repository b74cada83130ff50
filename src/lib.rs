//! vmconf - remote configuration deployment over SSH
//!
//! vmconf pushes local configuration files and multi-step tasks to a fleet of
//! hosts. Every remote file is backed up locally before it is overwritten, so
//! any push can be rolled back.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use error::{VmconfError, VmconfResult};
