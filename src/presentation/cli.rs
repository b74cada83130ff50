//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --verbose, --config, --backup-dir, --parallel) are
//!   inherited by all subcommands
//! - Host lists are comma separated (`--hosts web1,web2`)

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// vmconf - push configuration files and tasks to remote hosts over SSH
#[derive(Parser, Debug)]
#[command(name = "vmconf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Client config file (hosts and tasks)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding backups of overwritten remote files
    #[arg(long, global = true, value_name = "DIR")]
    pub backup_dir: Option<PathBuf>,

    /// Number of hosts processed concurrently
    #[arg(long, global = true, default_value_t = 1, value_name = "N")]
    pub parallel: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that a host accepts a session
    Ping {
        /// Host address (host or host:port)
        #[arg(long, conflicts_with = "alias", required_unless_present = "alias")]
        host: Option<String>,

        /// Remote user
        #[arg(long, requires = "host")]
        user: Option<String>,

        /// Private key file
        #[arg(long)]
        key: Option<PathBuf>,

        /// Password (uses sshpass)
        #[arg(long)]
        password: Option<String>,

        /// Host alias from the client config
        #[arg(long)]
        alias: Option<String>,
    },

    /// Deploy every manifest file to every manifest server
    Deploy {
        /// Manifest file (JSON, or TOML by extension)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Show what would be deployed without connecting
        #[arg(long)]
        dry_run: bool,
    },

    /// Run a named task on one or more hosts
    Run {
        /// Task name from the client config
        task: String,

        /// Host aliases (comma separated)
        #[arg(long, value_delimiter = ',', required = true)]
        hosts: Vec<String>,

        /// Show the steps without connecting
        #[arg(long)]
        dry_run: bool,
    },

    /// Push a single file to one host
    Push {
        /// Host alias from the client config
        #[arg(long)]
        alias: String,

        /// Local file
        #[arg(long)]
        local: PathBuf,

        /// Remote path
        #[arg(long)]
        remote: String,

        /// Show what would be pushed without connecting
        #[arg(long)]
        dry_run: bool,
    },

    /// Run an ad-hoc command on one or more hosts
    Exec {
        /// Host aliases (comma separated)
        #[arg(long, value_delimiter = ',', required = true)]
        hosts: Vec<String>,

        /// Command to run (after `--`)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        command: Vec<String>,
    },

    /// Restore a remote file from a backup
    Rollback {
        /// Remote path to restore
        #[arg(long)]
        file: String,

        /// Target as user@host
        #[arg(long, conflicts_with = "alias", required_unless_present = "alias")]
        server: Option<String>,

        /// Host alias from the client config
        #[arg(long)]
        alias: Option<String>,

        /// Private key file (with --server)
        #[arg(long)]
        key: Option<PathBuf>,

        /// Password (with --server)
        #[arg(long)]
        password: Option<String>,

        /// Backup file to restore instead of the latest one
        #[arg(long)]
        backup: Option<PathBuf>,

        /// Resolve the backup without connecting
        #[arg(long)]
        dry_run: bool,
    },

    /// List backups, newest first
    Backups {
        /// Only backups of this host alias (requires --file)
        #[arg(long, requires = "file")]
        alias: Option<String>,

        /// Only backups of this remote path (requires --alias)
        #[arg(long, requires = "alias")]
        file: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_deploy() {
        let cli =
            Cli::try_parse_from(["vmconf", "deploy", "-m", "deploy.json", "--dry-run"]).unwrap();
        if let Commands::Deploy { manifest, dry_run } = cli.command {
            assert_eq!(manifest, PathBuf::from("deploy.json"));
            assert!(dry_run);
        } else {
            panic!("Expected Deploy command");
        }
    }

    #[test]
    fn test_cli_parse_run_hosts_comma_separated() {
        let cli = Cli::try_parse_from(["vmconf", "run", "nginx", "--hosts", "web1,web2"]).unwrap();
        if let Commands::Run { task, hosts, dry_run } = cli.command {
            assert_eq!(task, "nginx");
            assert_eq!(hosts, vec!["web1", "web2"]);
            assert!(!dry_run);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_parse_exec_trailing_command() {
        let cli = Cli::try_parse_from([
            "vmconf", "exec", "--hosts", "web1", "--", "systemctl", "status", "-l", "nginx",
        ])
        .unwrap();
        if let Commands::Exec { hosts, command } = cli.command {
            assert_eq!(hosts, vec!["web1"]);
            assert_eq!(command, vec!["systemctl", "status", "-l", "nginx"]);
        } else {
            panic!("Expected Exec command");
        }
    }

    #[test]
    fn test_cli_parse_rollback_server() {
        let cli = Cli::try_parse_from([
            "vmconf", "rollback", "--file", "/etc/app.conf", "--server", "root@10.0.0.5",
        ])
        .unwrap();
        if let Commands::Rollback { file, server, alias, dry_run, .. } = cli.command {
            assert_eq!(file, "/etc/app.conf");
            assert_eq!(server.as_deref(), Some("root@10.0.0.5"));
            assert!(alias.is_none());
            assert!(!dry_run);
        } else {
            panic!("Expected Rollback command");
        }
    }

    #[test]
    fn test_cli_rollback_needs_a_target() {
        assert!(Cli::try_parse_from(["vmconf", "rollback", "--file", "/etc/app.conf"]).is_err());
    }

    #[test]
    fn test_cli_rollback_server_alias_conflict() {
        let result = Cli::try_parse_from([
            "vmconf", "rollback", "--file", "/a", "--server", "u@h", "--alias", "web1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_backups_filter_needs_both() {
        assert!(Cli::try_parse_from(["vmconf", "backups", "--alias", "web1"]).is_err());
        assert!(Cli::try_parse_from(["vmconf", "backups"]).is_ok());
    }

    #[test]
    fn test_cli_ping_alias_or_host() {
        assert!(Cli::try_parse_from(["vmconf", "ping", "--alias", "web1"]).is_ok());
        assert!(Cli::try_parse_from(["vmconf", "ping"]).is_err());
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "vmconf", "backups", "--json", "-vv", "--backup-dir", "/tmp/b", "--parallel", "4",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.backup_dir, Some(PathBuf::from("/tmp/b")));
        assert_eq!(cli.parallel, 4);
    }

    #[test]
    fn test_cli_parallel_defaults_to_sequential() {
        let cli = Cli::try_parse_from(["vmconf", "backups"]).unwrap();
        assert_eq!(cli.parallel, 1);
        assert!(!cli.json);
    }
}
