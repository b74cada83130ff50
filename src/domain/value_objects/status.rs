//! Status value object - outcome class of one execution result
//!
//! - `Ok`: the file was deployed or the step succeeded
//! - `DryRun`: nothing was executed, the result is a preview
//! - `Warning`: the file was deployed but its post-action failed
//! - `Error`: the unit of work failed and was not (fully) applied

use serde::{Deserialize, Serialize};

/// Status of an execution result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Ok,
    DryRun,
    Warning,
    Error,
}

impl Status {
    /// Returns true if this status counts as a failure
    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error)
    }

    /// Wire/display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::DryRun => "dry-run",
            Status::Warning => "warning",
            Status::Error => "error",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Status::DryRun).unwrap(),
            "\"dry-run\""
        );
        assert_eq!(serde_json::to_string(&Status::Ok).unwrap(), "\"ok\"");
    }

    #[test]
    fn status_display_matches_serialized_form() {
        for status in [Status::Ok, Status::DryRun, Status::Warning, Status::Error] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json.trim_matches('"'), status.to_string());
        }
    }

    #[test]
    fn only_error_is_error() {
        assert!(Status::Error.is_error());
        assert!(!Status::Warning.is_error());
        assert!(!Status::DryRun.is_error());
        assert!(!Status::Ok.is_error());
    }
}
