use anyhow::{bail, Context as _, Result};

use vmconf::presentation::factory::create_run_use_case;

use super::{host_refs, Context, Outcome};

/// Run an ad-hoc command on each listed host
pub fn cmd_exec(ctx: &Context, aliases: &[String], command: &[String]) -> Result<Outcome> {
    let command = command.join(" ");
    if command.trim().is_empty() {
        bail!("Exec failed: empty command");
    }
    let client = ctx.client_config().context("Exec failed")?;
    let hosts = host_refs(&client, aliases);

    let results = create_run_use_case(&ctx.backup_dir).exec(&hosts, &command, ctx.parallel);

    ctx.print(ctx.renderer.results(&results));
    Ok(Outcome::from_errors(results.iter().any(|r| r.is_error())))
}
