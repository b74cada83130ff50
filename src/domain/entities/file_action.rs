//! FileAction entity - one file to push in a manifest deploy

use std::path::{Path, PathBuf};

/// A local file, its remote destination, and an optional follow-up command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAction {
    local: PathBuf,
    remote: String,
    post_action: Option<String>,
}

impl FileAction {
    pub fn new(local: impl Into<PathBuf>, remote: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            remote: remote.into(),
            post_action: None,
        }
    }

    /// Command to run after a successful upload (e.g. a service restart)
    pub fn with_post_action(mut self, command: impl Into<String>) -> Self {
        let command = command.into();
        self.post_action = (!command.is_empty()).then_some(command);
        self
    }

    pub fn local(&self) -> &Path {
        &self.local
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    pub fn post_action(&self) -> Option<&str> {
        self.post_action.as_deref()
    }
}
