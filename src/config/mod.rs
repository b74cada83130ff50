//! Configuration module for vmconf
//!
//! Two files feed the orchestrator:
//! 1. Deploy manifest (`deploy --manifest`): servers and files
//! 2. Client config (`--config`, `VMCONF_CONFIG`, `~/.config/vmconf/config.json`):
//!    named hosts and named tasks
//!
//! Both are validated on load; the core trusts what comes out of here.

mod loader;
mod types;

pub use loader::{
    backup_dir, client_config_path, default_client_config_path, expand_home, load_client_config,
    load_manifest, BACKUP_DIR_ENV, CONFIG_ENV,
};
pub use types::{ClientConfig, ConfigWarning, FileConfig, Manifest, ServerConfig};
