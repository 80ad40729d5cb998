// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use plugin_installer::config::HOME_ENV_VAR;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let home_override = std::env::var(HOME_ENV_VAR).ok();

    match cli.command {
        Commands::Install {
            plugins,
            dry_run,
            environment,
            indexes,
            host_package,
            data_dir,
        } => {
            let args = commands::InstallArgs {
                plugins,
                dry_run,
                environment,
                indexes,
                host_package,
                data_dir,
            };
            let status = commands::cmd_plugin_install(&args, home_override.as_deref())?;
            if status != 0 {
                std::process::exit(status);
            }
            Ok(())
        }
        Commands::Paths => commands::cmd_paths(home_override.as_deref()),
    }
}
