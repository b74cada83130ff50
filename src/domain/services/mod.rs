//! Domain Services
//!
//! Stateless transforms applied to content on its way to a remote host.

mod normalizer;

pub use normalizer::{normalize_file, normalize_line_endings};
