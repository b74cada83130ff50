//! vmconf CLI - push configuration files and tasks to remote hosts
//!
//! Usage: vmconf <COMMAND>
//!
//! Commands:
//!   ping      Check that a host accepts a session
//!   deploy    Deploy every manifest file to every manifest server
//!   run       Run a named task on one or more hosts
//!   push      Push a single file to one host
//!   exec      Run an ad-hoc command on one or more hosts
//!   rollback  Restore a remote file from a backup
//!   backups   List backups, newest first

mod commands;

use clap::Parser;

use commands::{Context, Outcome};
use vmconf::logging;
use vmconf::presentation::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let ctx = Context::from_cli(&cli);
    match commands::dispatch(&ctx, cli.command) {
        Ok(Outcome::Success) => {}
        Ok(Outcome::Failed) => std::process::exit(1),
        Err(e) => {
            let rendered = ctx.renderer.error(&format!("{:#}", e));
            if ctx.json {
                print!("{}", rendered);
            } else {
                eprint!("{}", rendered);
            }
            std::process::exit(1);
        }
    }
}
