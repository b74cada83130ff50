//! Shared helpers for CLI integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// `vmconf` with config and backup locations isolated under `dir`
pub fn vmconf(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vmconf"));
    cmd.current_dir(dir)
        .env_remove("VMCONF_CONFIG")
        .env_remove("VMCONF_LOG")
        .env("VMCONF_BACKUP_DIR", dir.join("backups"))
        .env("HOME", dir.join("home"))
        .env("XDG_CONFIG_HOME", dir.join("home/.config"));
    cmd
}

pub fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!("stdout is not JSON ({e}):\n{}", stdout(output));
    })
}
