// src/commands/plugin.rs

//! Plugin commands
//!
//! Wires the file-backed collaborators (environment manifest, index files,
//! TOML lock) into a `PluginInstaller` and reports the outcome.

use anyhow::{Context, Result};
use plugin_installer::{
    Collaborators, ConsoleOutput, DefaultEngineFactory, Environment, Factory, FileEnvironmentReader,
    FileIndex, HomeLayout, InstallerConfig, PluginInstaller, Pool, TomlLocker,
};
use std::io::IsTerminal;
use std::path::Path;
use tracing::info;

/// Arguments of `install`
#[derive(Debug, Clone)]
pub struct InstallArgs {
    pub plugins: Vec<String>,
    pub dry_run: bool,
    pub environment: String,
    pub indexes: Vec<String>,
    pub host_package: String,
    pub data_dir: Option<String>,
}

/// Install plugins, returning the process exit status
///
/// `home_override` is the value of `POETRY_HOME`, read once by `main`.
pub fn cmd_plugin_install(args: &InstallArgs, home_override: Option<&str>) -> Result<i32> {
    let config = match &args.data_dir {
        Some(dir) => InstallerConfig::new(dir),
        None => InstallerConfig::resolve(home_override)
            .context("Failed to determine the data directory")?,
    }
    .with_host_package(&args.host_package)
    .with_dry_run(args.dry_run);

    let env = Environment::open(Path::new(&args.environment))
        .with_context(|| format!("Failed to open environment {}", args.environment))?;

    let factory = Factory;
    let mut pool = Pool::new();
    for path in &args.indexes {
        let index = FileIndex::load(Path::new(path), &factory)
            .with_context(|| format!("Failed to load index {}", path))?;
        pool.add_repository(Box::new(index));
    }

    let reader = FileEnvironmentReader::new(&factory);
    let locker = TomlLocker::new(config.lock_path());
    let engines = DefaultEngineFactory::new(std::io::stdout().is_terminal());
    let output = ConsoleOutput;

    info!(
        "Installing {} into {} (lock: {})",
        args.plugins.join(", "),
        env.manifest_path().display(),
        config.lock_path().display()
    );

    let installer = PluginInstaller::new(
        Collaborators {
            reader: &reader,
            factory: &factory,
            locker: &locker,
            pool: &pool,
            engines: &engines,
            output: &output,
        },
        config,
    );

    match installer.install(&env, &args.plugins) {
        Ok(status) => Ok(status),
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(e.exit_code())
        }
    }
}

/// Print the plugin home layout and data directory
pub fn cmd_paths(home_override: Option<&str>) -> Result<()> {
    let layout =
        HomeLayout::resolve(home_override).context("Failed to determine the home directory")?;
    let config =
        InstallerConfig::resolve(home_override).context("Failed to determine the data directory")?;

    println!("Home:      {}", layout.home().display());
    println!("Scripts:   {}", layout.bin().display());
    println!("Libraries: {}", layout.lib().display());
    println!("Plugins:   {}", layout.plugins().display());
    println!("Lock file: {}", config.lock_path().display());
    Ok(())
}
