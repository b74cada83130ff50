use std::path::Path;

use anyhow::{Context as _, Result};
use tracing::info;

use vmconf::application::DeployOptions;
use vmconf::config;
use vmconf::presentation::factory::create_deploy_use_case;

use super::{log_warnings, Context, Outcome};

/// Deploy every manifest file to every manifest server
pub fn cmd_deploy(ctx: &Context, manifest: &Path, dry_run: bool) -> Result<Outcome> {
    let (manifest, warnings) = config::load_manifest(manifest).context("Deploy failed")?;
    log_warnings(&warnings);

    let servers = manifest.host_targets().context("Deploy failed")?;
    let files = manifest.file_actions();
    info!(servers = servers.len(), files = files.len(), dry_run, "deploying");

    let options = DeployOptions::new()
        .with_dry_run(dry_run)
        .with_parallel(ctx.parallel);
    let result = create_deploy_use_case(&ctx.backup_dir).execute(&servers, &files, &options);

    ctx.print(ctx.renderer.results(&result.results));
    Ok(Outcome::from_errors(result.has_errors()))
}
