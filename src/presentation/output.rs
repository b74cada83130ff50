//! Output Rendering
//!
//! Provides a unified interface for rendering results to different formats.
//! Renderers return the text; commands decide where it goes.

use serde::Serialize;
use serde_json::json;

use crate::application::{PingResult, RollbackResult};
use crate::domain::entities::{ExecutionResult, RunResult};
use crate::domain::ports::BackupEntry;
use crate::domain::value_objects::Status;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Icons for output rendering
struct Icons {
    write: &'static str,
    bullet: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            write: "→",
            bullet: "•",
        }
    }

    fn ascii() -> Self {
        Self {
            write: "->",
            bullet: "-",
        }
    }
}

/// Fixed-width status tag, e.g. `[OK]     `
fn tag(status: Status) -> String {
    let label = match status {
        Status::Ok => "[OK]",
        Status::DryRun => "[DRY-RUN]",
        Status::Warning => "[WARN]",
        Status::Error => "[ERROR]",
    };
    format!("{:<9}", label)
}

/// Trait for rendering command results
pub trait ResultRenderer {
    /// Per-file or per-host results (deploy, push, exec)
    fn results(&self, results: &[ExecutionResult]) -> String;

    /// Per-host task results
    fn runs(&self, runs: &[RunResult]) -> String;

    fn rollback(&self, result: &RollbackResult) -> String;

    fn ping(&self, result: &PingResult) -> String;

    fn backups(&self, entries: &[BackupEntry]) -> String;

    /// Terminal failure of a command (`{:#}` of the error chain)
    fn error(&self, message: &str) -> String;
}

/// Text renderer
pub struct TextRenderer {
    /// Whether to use unicode arrows
    pub unicode: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { unicode: true }
    }
}

impl TextRenderer {
    fn icons(&self) -> Icons {
        if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        }
    }

    fn line(&self, out: &mut String, indent: &str, result: &ExecutionResult) {
        let icons = self.icons();
        out.push_str(&format!(
            "{}{} {} {} {}",
            indent,
            tag(result.status()),
            result.subject().name(),
            icons.write,
            result.server()
        ));
        if let Some(error) = result.error_message() {
            out.push_str(&format!(": {}", error));
        }
        out.push('\n');

        let pad = format!("{}{:<9} ", indent, "");
        if let Some(backup) = result.backup() {
            out.push_str(&format!("{}backup: {}\n", pad, backup.display()));
        }
        if let Some(output) = result.output() {
            for text in output.lines() {
                out.push_str(&format!("{}{}\n", pad, text));
            }
        }
    }

    fn summary(&self, out: &mut String, results: &[ExecutionResult]) {
        let count = |status: Status| results.iter().filter(|r| r.status() == status).count();
        let dry_run = count(Status::DryRun);
        out.push('\n');
        if dry_run > 0 {
            out.push_str(&format!("Summary: {} would be applied (dry run)\n", dry_run));
        } else {
            out.push_str(&format!(
                "Summary: {} ok, {} warnings, {} errors\n",
                count(Status::Ok),
                count(Status::Warning),
                count(Status::Error)
            ));
        }
    }
}

impl ResultRenderer for TextRenderer {
    fn results(&self, results: &[ExecutionResult]) -> String {
        let mut out = String::new();
        for result in results {
            self.line(&mut out, "", result);
        }
        self.summary(&mut out, results);
        out
    }

    fn runs(&self, runs: &[RunResult]) -> String {
        let icons = self.icons();
        let mut out = String::new();
        for run in runs {
            out.push_str(&format!(
                "{} {} task {} [{}]\n",
                icons.bullet,
                run.server(),
                run.task(),
                run.status()
            ));
            for step in run.steps() {
                self.line(&mut out, "  ", step);
            }
        }
        let failed = runs.iter().filter(|r| r.is_error()).count();
        out.push('\n');
        out.push_str(&format!(
            "Summary: {} hosts, {} failed\n",
            runs.len(),
            failed
        ));
        out
    }

    fn rollback(&self, result: &RollbackResult) -> String {
        let verb = match result.status {
            Status::DryRun => "would restore from",
            _ => "restored from",
        };
        format!(
            "{} {} {} {}\n{:<9} {} {}\n",
            tag(result.status),
            result.file,
            self.icons().write,
            result.server,
            "",
            verb,
            result.backup.display()
        )
    }

    fn ping(&self, result: &PingResult) -> String {
        format!(
            "{} {}@{} (hostname: {})\n",
            tag(Status::Ok),
            result.user,
            result.host,
            result.hostname
        )
    }

    fn backups(&self, entries: &[BackupEntry]) -> String {
        if entries.is_empty() {
            return "No backups found\n".to_string();
        }
        let mut out = String::new();
        for entry in entries {
            out.push_str(&format!(
                "{}  {}\n",
                entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                entry.path.display()
            ));
        }
        out
    }

    fn error(&self, message: &str) -> String {
        format!("Error: {}\n", message)
    }
}

/// JSON renderer
pub struct JsonRenderer;

fn pretty<T: Serialize>(value: &T) -> String {
    let mut text = serde_json::to_string_pretty(value).unwrap_or_default();
    text.push('\n');
    text
}

impl ResultRenderer for JsonRenderer {
    fn results(&self, results: &[ExecutionResult]) -> String {
        pretty(&json!({ "results": results }))
    }

    fn runs(&self, runs: &[RunResult]) -> String {
        pretty(&json!({ "results": runs }))
    }

    fn rollback(&self, result: &RollbackResult) -> String {
        pretty(&json!({
            "success": true,
            "server": result.server,
            "file": result.file,
            "backup": result.backup,
            "status": result.status,
        }))
    }

    fn ping(&self, result: &PingResult) -> String {
        pretty(result)
    }

    fn backups(&self, entries: &[BackupEntry]) -> String {
        let backups: Vec<_> = entries
            .iter()
            .map(|e| {
                json!({
                    "path": e.path,
                    "timestamp": e.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
                })
            })
            .collect();
        pretty(&json!({ "success": true, "backups": backups }))
    }

    fn error(&self, message: &str) -> String {
        pretty(&json!({ "success": false, "error": message }))
    }
}

/// Create a renderer based on format
pub fn create_renderer(format: OutputFormat, unicode: bool) -> Box<dyn ResultRenderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer { unicode }),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}
