use anyhow::{Context as _, Result};

use vmconf::application::RunOptions;
use vmconf::presentation::factory::create_run_use_case;

use super::{host_refs, Context, Outcome};

/// Run a named task on each listed host
pub fn cmd_run(ctx: &Context, task: &str, aliases: &[String], dry_run: bool) -> Result<Outcome> {
    let client = ctx.client_config().context("Run failed")?;
    let task = client.resolve_task(task).context("Run failed")?;
    let hosts = host_refs(&client, aliases);

    let options = RunOptions::new()
        .with_dry_run(dry_run)
        .with_parallel(ctx.parallel);
    let runs = create_run_use_case(&ctx.backup_dir).execute(&task, &hosts, &options);

    ctx.print(ctx.renderer.runs(&runs));
    Ok(Outcome::from_errors(runs.iter().any(|r| r.is_error())))
}
