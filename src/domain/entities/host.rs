//! HostTarget entity - a resolved remote machine
//!
//! Host targets are built from configuration before a run starts and are
//! read-only afterwards. The alias names the host in results and backup
//! file names.

use std::path::{Path, PathBuf};

use crate::error::{VmconfError, VmconfResult};

/// Authentication material for one host
///
/// At least one of key path or password is present. Both may be set, in
/// which case the key is tried first.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key_path: Option<PathBuf>,
    password: Option<String>,
}

impl Credentials {
    pub fn new(key_path: Option<PathBuf>, password: Option<String>) -> VmconfResult<Self> {
        let key_path = key_path.filter(|p| !p.as_os_str().is_empty());
        let password = password.filter(|p| !p.is_empty());
        if key_path.is_none() && password.is_none() {
            return Err(VmconfError::config(
                "no auth method provided (need key or password)",
            ));
        }
        Ok(Self { key_path, password })
    }

    pub fn key(path: impl Into<PathBuf>) -> Self {
        Self {
            key_path: Some(path.into()),
            password: None,
        }
    }

    pub fn password(password: impl Into<String>) -> Self {
        Self {
            key_path: None,
            password: Some(password.into()),
        }
    }

    pub fn key_path(&self) -> Option<&Path> {
        self.key_path.as_deref()
    }

    pub fn password_value(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key_path", &self.key_path)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A remote host to push to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostTarget {
    alias: String,
    address: String,
    user: String,
    credentials: Credentials,
}

impl HostTarget {
    pub fn new(
        alias: impl Into<String>,
        address: impl Into<String>,
        user: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        Self {
            alias: alias.into(),
            address: address.into(),
            user: user.into(),
            credentials,
        }
    }

    /// Name used in results and backup file names
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// `host` or `host:port`
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Host name without any `:port` suffix
    pub fn hostname(&self) -> &str {
        self.split_address().0
    }

    /// Explicit port, if the address carries one
    pub fn port(&self) -> Option<u16> {
        self.split_address().1
    }

    fn split_address(&self) -> (&str, Option<u16>) {
        match self.address.rsplit_once(':') {
            Some((host, port)) if !host.contains(':') => match port.parse() {
                Ok(port) => (host, Some(port)),
                Err(_) => (self.address.as_str(), None),
            },
            _ => (self.address.as_str(), None),
        }
    }

    /// `user@host` as understood by ssh
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.hostname())
    }
}
