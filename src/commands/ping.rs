use std::path::PathBuf;

use anyhow::{anyhow, Context as _, Result};

use vmconf::domain::entities::{Credentials, HostTarget};
use vmconf::presentation::factory::create_ping_use_case;

use super::{Context, Outcome};

pub fn cmd_ping(
    ctx: &Context,
    host: Option<String>,
    user: Option<String>,
    key: Option<PathBuf>,
    password: Option<String>,
    alias: Option<String>,
) -> Result<Outcome> {
    let target = match (alias, host) {
        (Some(alias), _) => {
            let client = ctx.client_config().context("Ping failed")?;
            client.resolve_host(&alias).context("Ping failed")?
        }
        (None, Some(host)) => {
            let user = user
                .filter(|u| !u.is_empty())
                .ok_or_else(|| anyhow!("Ping failed: --user is required with --host"))?;
            let credentials = Credentials::new(key, password).context("Ping failed")?;
            HostTarget::new(host.as_str(), host.as_str(), user, credentials)
        }
        (None, None) => return Err(anyhow!("Ping failed: pass --alias or --host")),
    };

    let result = create_ping_use_case()
        .execute(&target)
        .context("Ping failed")?;

    ctx.print(ctx.renderer.ping(&result));
    Ok(Outcome::Success)
}
