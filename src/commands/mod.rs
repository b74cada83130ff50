//! Subcommand handlers
//!
//! Each handler loads what it needs, calls one use case, and prints through
//! the renderer picked from `--json`. Handlers return `Outcome::Failed` when
//! any result has status `error`; terminal failures come back as `Err`.

mod backups;
mod deploy;
mod exec;
mod ping;
mod push;
mod rollback;
mod run;

use std::path::PathBuf;

use anyhow::Result;
use is_terminal::IsTerminal;
use tracing::warn;

use vmconf::application::HostRef;
use vmconf::config::{self, ClientConfig, ConfigWarning};
use vmconf::presentation::{create_renderer, Cli, Commands, OutputFormat, ResultRenderer};

pub use backups::cmd_backups;
pub use deploy::cmd_deploy;
pub use exec::cmd_exec;
pub use ping::cmd_ping;
pub use push::cmd_push;
pub use rollback::cmd_rollback;
pub use run::cmd_run;

/// Process result of a handler that did not fail outright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed,
}

impl Outcome {
    pub fn from_errors(has_errors: bool) -> Self {
        if has_errors {
            Outcome::Failed
        } else {
            Outcome::Success
        }
    }
}

/// Global flags every handler sees
pub struct Context {
    pub json: bool,
    pub parallel: usize,
    pub config: Option<PathBuf>,
    pub backup_dir: PathBuf,
    pub renderer: Box<dyn ResultRenderer>,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Self {
        let format = OutputFormat::from_json_flag(cli.json);
        Self {
            json: cli.json,
            parallel: cli.parallel.max(1),
            config: cli.config.clone(),
            backup_dir: config::backup_dir(cli.backup_dir.as_deref()),
            renderer: create_renderer(format, std::io::stdout().is_terminal()),
        }
    }

    pub fn print(&self, text: String) {
        print!("{}", text);
    }

    /// Load the client config named by `--config` / `VMCONF_CONFIG`
    pub fn client_config(&self) -> Result<ClientConfig> {
        let path = config::client_config_path(self.config.as_deref())?;
        let (client, warnings) = config::load_client_config(&path)?;
        log_warnings(&warnings);
        Ok(client)
    }
}

pub fn log_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        warn!("{}", warning);
    }
}

/// Resolve requested aliases; unknown ones stay in place as failures
pub fn host_refs(client: &ClientConfig, aliases: &[String]) -> Vec<HostRef> {
    aliases
        .iter()
        .map(|alias| match client.resolve_host(alias) {
            Ok(host) => HostRef::Resolved(host),
            Err(e) => HostRef::unknown(alias.as_str(), e.to_string()),
        })
        .collect()
}

pub fn dispatch(ctx: &Context, command: Commands) -> Result<Outcome> {
    match command {
        Commands::Ping {
            host,
            user,
            key,
            password,
            alias,
        } => cmd_ping(ctx, host, user, key, password, alias),
        Commands::Deploy { manifest, dry_run } => cmd_deploy(ctx, &manifest, dry_run),
        Commands::Run {
            task,
            hosts,
            dry_run,
        } => cmd_run(ctx, &task, &hosts, dry_run),
        Commands::Push {
            alias,
            local,
            remote,
            dry_run,
        } => cmd_push(ctx, &alias, &local, &remote, dry_run),
        Commands::Exec { hosts, command } => cmd_exec(ctx, &hosts, &command),
        Commands::Rollback {
            file,
            server,
            alias,
            key,
            password,
            backup,
            dry_run,
        } => cmd_rollback(
            ctx,
            &file,
            rollback::Target {
                server,
                alias,
                key,
                password,
            },
            backup.as_deref(),
            dry_run,
        ),
        Commands::Backups { alias, file } => cmd_backups(ctx, alias, file),
    }
}
