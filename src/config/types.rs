//! Configuration type definitions

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::entities::{Credentials, FileAction, HostTarget, Task, TaskStep};
use crate::error::{VmconfError, VmconfResult};

use super::loader::expand_home;

/// Non-fatal configuration warning surfaced to CLI users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted path of the unknown key
    pub key: String,
    pub file: PathBuf,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key `{}` in {}", self.key, self.file.display())
    }
}

/// Connection details for one host
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub password: String,
    /// Name used in results and backups (manifest only; defaults to `host`)
    #[serde(default)]
    pub alias: Option<String>,
}

impl ServerConfig {
    fn missing_field(&self) -> Option<&'static str> {
        if self.host.is_empty() {
            Some("missing host")
        } else if self.user.is_empty() {
            Some("missing user")
        } else if self.key.is_empty() && self.password.is_empty() {
            Some("missing key or password")
        } else {
            None
        }
    }

    /// Resolve into a host target named `alias`
    pub fn to_target(&self, alias: &str) -> VmconfResult<HostTarget> {
        let key = (!self.key.is_empty()).then(|| expand_home(&self.key));
        let password = (!self.password.is_empty()).then(|| self.password.clone());
        let credentials = Credentials::new(key, password)?;
        Ok(HostTarget::new(alias, &self.host, &self.user, credentials))
    }
}

/// One file of a manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub local: String,
    #[serde(default)]
    pub remote: String,
    /// Command to run after a successful push
    #[serde(default)]
    pub restart: String,
}

/// Deploy manifest: every file goes to every server
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub servers: Vec<ServerConfig>,
    #[serde(default)]
    pub files: Vec<FileConfig>,
}

impl Manifest {
    pub fn validate(&self) -> VmconfResult<()> {
        if self.servers.is_empty() {
            return Err(VmconfError::config("manifest: no servers defined"));
        }
        if self.files.is_empty() {
            return Err(VmconfError::config("manifest: no files defined"));
        }
        for (i, server) in self.servers.iter().enumerate() {
            if let Some(problem) = server.missing_field() {
                return Err(VmconfError::config(format!(
                    "manifest: server[{}] {}",
                    i, problem
                )));
            }
        }
        for (i, file) in self.files.iter().enumerate() {
            if file.local.is_empty() {
                return Err(VmconfError::config(format!(
                    "manifest: file[{}] missing local path",
                    i
                )));
            }
            if file.remote.is_empty() {
                return Err(VmconfError::config(format!(
                    "manifest: file[{}] missing remote path",
                    i
                )));
            }
        }
        Ok(())
    }

    /// Servers as host targets, in manifest order
    pub fn host_targets(&self) -> VmconfResult<Vec<HostTarget>> {
        self.servers
            .iter()
            .map(|s| s.to_target(s.alias.as_deref().unwrap_or(&s.host)))
            .collect()
    }

    pub fn file_actions(&self) -> Vec<FileAction> {
        self.files
            .iter()
            .map(|f| FileAction::new(&f.local, &f.remote).with_post_action(&f.restart))
            .collect()
    }
}

/// Client configuration: named hosts and named tasks
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub hosts: BTreeMap<String, ServerConfig>,
    #[serde(default)]
    pub tasks: BTreeMap<String, Vec<TaskStep>>,
}

impl ClientConfig {
    pub fn validate(&self) -> VmconfResult<()> {
        if self.hosts.is_empty() {
            return Err(VmconfError::config("config: no hosts defined"));
        }
        if self.tasks.is_empty() {
            return Err(VmconfError::config("config: no tasks defined"));
        }
        for (name, host) in &self.hosts {
            let problem = match host.missing_field() {
                Some("missing host") => "missing host address",
                Some(other) => other,
                None => continue,
            };
            return Err(VmconfError::config(format!(
                "config: host {:?} {}",
                name, problem
            )));
        }
        for (name, steps) in &self.tasks {
            Task::new(name.as_str(), steps.clone())
                .map_err(|e| VmconfError::config(format!("config: {}", e)))?;
        }
        Ok(())
    }

    /// Host target for `alias`, key path `~` expanded
    pub fn resolve_host(&self, alias: &str) -> VmconfResult<HostTarget> {
        self.hosts
            .get(alias)
            .ok_or_else(|| VmconfError::config(format!("unknown host alias: {}", alias)))?
            .to_target(alias)
    }

    pub fn resolve_task(&self, name: &str) -> VmconfResult<Task> {
        let steps = self
            .tasks
            .get(name)
            .ok_or_else(|| VmconfError::config(format!("unknown task: {}", name)))?;
        Task::new(name, steps.clone())
    }
}
