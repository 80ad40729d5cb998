// src/cli/mod.rs
//! CLI definitions for the plugin installer
//!
//! This module contains the command-line interface definitions using clap.
//! The command implementations are in the `commands` module.
//!
//! - `install` - Install plugin(s) into the host tool's environment
//! - `paths` - Show where plugins, scripts and the lock file live

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "plugin-installer")]
#[command(author = "Plugin Installer Contributors")]
#[command(version)]
#[command(about = "Install plugins into a package manager's own environment", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install one or more plugins
    Install {
        /// Plugin identifiers (name, name==1.0, name@latest, git URL, path)
        #[arg(required = true, num_args = 1..)]
        plugins: Vec<String>,

        /// Show the planned operations without applying them
        #[arg(long)]
        dry_run: bool,

        /// Manifest of the environment to install into
        #[arg(short, long, default_value = "environment.json")]
        environment: String,

        /// Package index file (repeatable)
        #[arg(short, long = "index")]
        indexes: Vec<String>,

        /// Name of the host tool's own package
        #[arg(long, default_value = "poetry")]
        host_package: String,

        /// Directory holding the lock file (default: POETRY_HOME or the platform data directory)
        #[arg(long)]
        data_dir: Option<String>,
    },

    /// Show the plugin home and data directories
    Paths,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_install() {
        let cli = Cli::try_parse_from([
            "plugin-installer",
            "install",
            "demo==1.0",
            "other",
            "--dry-run",
            "-i",
            "a.json",
            "--index",
            "b.json",
        ])
        .unwrap();

        match cli.command {
            Commands::Install {
                plugins,
                dry_run,
                environment,
                indexes,
                host_package,
                data_dir,
            } => {
                assert_eq!(plugins, vec!["demo==1.0", "other"]);
                assert!(dry_run);
                assert_eq!(environment, "environment.json");
                assert_eq!(indexes, vec!["a.json", "b.json"]);
                assert_eq!(host_package, "poetry");
                assert!(data_dir.is_none());
            }
            Commands::Paths => panic!("expected install"),
        }
    }

    #[test]
    fn test_install_requires_a_plugin() {
        assert!(Cli::try_parse_from(["plugin-installer", "install"]).is_err());
    }
}
