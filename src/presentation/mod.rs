//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/JSON)
//!
//! ## Structure
//!
//! - `cli` - Argument definitions
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Output rendering abstractions
//!
//! ## Usage
//!
//! ```ignore
//! use vmconf::presentation::factory;
//!
//! let use_case = factory::create_deploy_use_case(&backup_dir);
//! let result = use_case.execute(&servers, &files, &options);
//! ```

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{Cli, Commands};
pub use factory::create_deploy_use_case;
pub use output::{create_renderer, OutputFormat, ResultRenderer};
