//! Tracing setup for the binary
//!
//! Logs go to stderr so stdout stays clean for `--json` output.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter (`vmconf=debug`, `info`, ...)
pub const LOG_ENV: &str = "VMCONF_LOG";

/// Default filter directive for a `-v` count
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn filter(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level_for(verbose)))
}

/// Install the global subscriber; a second call is a no-op
pub fn init(verbose: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
