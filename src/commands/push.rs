use std::path::Path;

use anyhow::{Context as _, Result};

use vmconf::presentation::factory::create_deploy_use_case;

use super::{Context, Outcome};

/// Push one file to one configured host (no post-action)
pub fn cmd_push(
    ctx: &Context,
    alias: &str,
    local: &Path,
    remote: &str,
    dry_run: bool,
) -> Result<Outcome> {
    let client = ctx.client_config().context("Push failed")?;
    let host = client.resolve_host(alias).context("Push failed")?;

    let result = create_deploy_use_case(&ctx.backup_dir).push(&host, local, remote, dry_run);

    let failed = result.is_error();
    ctx.print(ctx.renderer.results(std::slice::from_ref(&result)));
    Ok(Outcome::from_errors(failed))
}
