//! Configuration loading
//!
//! Both files are JSON unless the extension is `.toml`. Unknown keys do not
//! fail the load; they come back as warnings.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{VmconfError, VmconfResult};
use crate::infrastructure::DEFAULT_BACKUP_DIR;

use super::types::{ClientConfig, ConfigWarning, Manifest};

/// Environment variable overriding the client config path
pub const CONFIG_ENV: &str = "VMCONF_CONFIG";

/// Environment variable overriding the backup directory
pub const BACKUP_DIR_ENV: &str = "VMCONF_BACKUP_DIR";

/// Load and validate a deploy manifest
pub fn load_manifest(path: &Path) -> VmconfResult<(Manifest, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)
        .map_err(|e| VmconfError::io(format!("reading manifest {}", path.display()), e))?;
    let (manifest, warnings) = parse::<Manifest>(path, &content)
        .map_err(|e| VmconfError::config(format!("parsing manifest: {}", e)))?;
    manifest.validate()?;
    Ok((manifest, warnings))
}

/// Load and validate the client configuration
pub fn load_client_config(path: &Path) -> VmconfResult<(ClientConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)
        .map_err(|e| VmconfError::io(format!("reading config {}", path.display()), e))?;
    let (config, warnings) = parse::<ClientConfig>(path, &content)
        .map_err(|e| VmconfError::config(format!("parsing config: {}", e)))?;
    config.validate()?;
    Ok((config, warnings))
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"))
}

fn parse<T: DeserializeOwned>(
    path: &Path,
    content: &str,
) -> Result<(T, Vec<ConfigWarning>), String> {
    let mut unknown_paths: Vec<String> = Vec::new();

    let value: T = if is_toml(path) {
        let deserializer = toml::de::Deserializer::new(content);
        serde_ignored::deserialize(deserializer, |p| unknown_paths.push(p.to_string()))
            .map_err(|e| e.to_string())?
    } else {
        let mut deserializer = serde_json::Deserializer::from_str(content);
        let value = serde_ignored::deserialize(&mut deserializer, |p| {
            unknown_paths.push(p.to_string())
        })
        .map_err(|e| e.to_string())?;
        deserializer.end().map_err(|e| e.to_string())?;
        value
    };

    let warnings = unknown_paths
        .into_iter()
        .map(|key| ConfigWarning {
            key,
            file: path.to_path_buf(),
        })
        .collect();
    Ok((value, warnings))
}

/// Expand a leading `~/` to the user's home directory
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// `<config_dir>/vmconf/config.json`
pub fn default_client_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vmconf").join("config.json"))
}

/// Client config path: flag, then `VMCONF_CONFIG`, then the default location
pub fn client_config_path(flag: Option<&Path>) -> VmconfResult<PathBuf> {
    pick_path(flag, std::env::var_os(CONFIG_ENV).map(PathBuf::from))
        .or_else(default_client_config_path)
        .ok_or_else(|| {
            VmconfError::config(
                "cannot determine config directory; pass --config or set VMCONF_CONFIG",
            )
        })
}

/// Backup directory: flag, then `VMCONF_BACKUP_DIR`, then `./backups`
pub fn backup_dir(flag: Option<&Path>) -> PathBuf {
    pick_path(flag, std::env::var_os(BACKUP_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BACKUP_DIR))
}

fn pick_path(flag: Option<&Path>, env: Option<PathBuf>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .or(env)
        .filter(|p| !p.as_os_str().is_empty())
}
