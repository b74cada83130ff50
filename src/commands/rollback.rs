use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _, Result};

use vmconf::domain::entities::{Credentials, HostTarget};
use vmconf::presentation::factory::create_rollback_use_case;

use super::{Context, Outcome};

/// Who to roll back: `--server user@host` with credentials, or `--alias`
pub struct Target {
    pub server: Option<String>,
    pub alias: Option<String>,
    pub key: Option<PathBuf>,
    pub password: Option<String>,
}

/// Split `user@host` (host may carry `:port`)
pub fn parse_server(server: &str) -> Result<(&str, &str)> {
    match server.split_once('@') {
        Some((user, host)) if !user.is_empty() && !host.is_empty() => Ok((user, host)),
        _ => Err(anyhow!("expected user@host format, got: {}", server)),
    }
}

fn resolve(ctx: &Context, target: Target) -> Result<HostTarget> {
    if let Some(alias) = target.alias {
        let client = ctx.client_config()?;
        return Ok(client.resolve_host(&alias)?);
    }
    let server = target
        .server
        .ok_or_else(|| anyhow!("pass --server or --alias"))?;
    let (user, host) = parse_server(&server)?;
    let credentials = Credentials::new(target.key, target.password)?;
    Ok(HostTarget::new(host, host, user, credentials))
}

/// Restore `file` from its latest backup (or `--backup`)
pub fn cmd_rollback(
    ctx: &Context,
    file: &str,
    target: Target,
    backup: Option<&Path>,
    dry_run: bool,
) -> Result<Outcome> {
    let host = resolve(ctx, target).context("Rollback failed")?;

    let result = create_rollback_use_case(&ctx.backup_dir)
        .execute(&host, file, backup, dry_run)
        .context("Rollback failed")?;

    ctx.print(ctx.renderer.rollback(&result));
    Ok(Outcome::Success)
}
