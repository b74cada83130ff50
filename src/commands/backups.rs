use anyhow::{Context as _, Result};

use vmconf::domain::value_objects::BackupKey;
use vmconf::presentation::factory::create_backups_use_case;

use super::{Context, Outcome};

/// List backups newest first, optionally for one (alias, remote path)
pub fn cmd_backups(ctx: &Context, alias: Option<String>, file: Option<String>) -> Result<Outcome> {
    let key = match (alias, file) {
        (Some(alias), Some(file)) => Some(BackupKey::new(alias, file)),
        _ => None,
    };

    let entries = create_backups_use_case(&ctx.backup_dir)
        .list(key.as_ref())
        .context("Listing backups failed")?;

    ctx.print(ctx.renderer.backups(&entries));
    Ok(Outcome::Success)
}
