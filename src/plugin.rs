// src/plugin.rs

//! Plugin installation
//!
//! Installing a plugin means adding a dependency to the host tool's own
//! environment without disturbing anything else in it. The steps run strictly
//! in sequence and any failure stops the whole operation:
//!
//! 1. parse the requested identifiers
//! 2. snapshot what is installed, with declared dependencies
//! 3. build the synthetic root project and companion repository
//! 4. seed a lock from the environment if none exists
//! 5. configure and run an installation engine
//!
//! Every collaborator is injected, so nothing here touches the process
//! environment or constructs a concrete engine itself.

use crate::config::InstallerConfig;
use crate::environment::{Environment, EnvironmentReader};
use crate::error::Result;
use crate::installer::{EngineContext, EngineFactory, InstallationEngine};
use crate::lockfile::{LockGuardOutcome, Locker, ensure_locked};
use crate::output::Output;
use crate::package::DependencyFactory;
use crate::project::ProjectBuilder;
use crate::repository::Pool;
use crate::requirement::parse_plugin_requirements;
use tracing::{debug, info, warn};

/// The services plugin installation depends on
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub reader: &'a dyn EnvironmentReader,
    pub factory: &'a dyn DependencyFactory,
    pub locker: &'a dyn Locker,
    pub pool: &'a Pool,
    pub engines: &'a dyn EngineFactory,
    pub output: &'a dyn Output,
}

pub struct PluginInstaller<'a> {
    collaborators: Collaborators<'a>,
    config: InstallerConfig,
}

impl<'a> PluginInstaller<'a> {
    pub fn new(collaborators: Collaborators<'a>, config: InstallerConfig) -> Self {
        Self {
            collaborators,
            config,
        }
    }

    /// Install plugins into `env`, returning the engine's exit status
    ///
    /// Errors are returned for everything that happens before the engine is
    /// built; once it runs, failures are reported through its status.
    pub fn install<S: AsRef<str>>(&self, env: &Environment, plugins: &[S]) -> Result<i32> {
        let c = self.collaborators;

        let requirements = parse_plugin_requirements(plugins)?;
        if requirements.is_empty() {
            warn!("No plugins requested");
        }

        let installed = c.reader.snapshot(env, true)?;
        debug!("Environment snapshot has {} packages", installed.len());

        let project = ProjectBuilder::new(&self.config.host_package, c.factory).build(
            installed,
            env.runtime_version(),
            requirements,
        )?;

        match ensure_locked(c.locker, &project.root, &project.repository)? {
            LockGuardOutcome::AlreadyLocked => {
                debug!("Using existing lock {}", c.locker.lock_path().display())
            }
            LockGuardOutcome::Seeded { packages } => info!(
                "Created lock {} from {} installed packages",
                c.locker.lock_path().display(),
                packages
            ),
        }

        let plugin_names = project.plugin_names;
        let ctx = EngineContext {
            output: c.output,
            env,
            root: project.root,
            locker: c.locker,
            pool: c.pool,
            config: &self.config,
            repository: project.repository,
        };

        let mut engine = c.engines.create(ctx);
        Ok(drive_installation(engine.as_mut(), &plugin_names, self.config.dry_run))
    }
}

/// Configure an engine for a non-destructive plugin install and run it
///
/// Only the named plugins may change, installed packages count as satisfied,
/// and nothing is ever uninstalled.
pub fn drive_installation(
    engine: &mut dyn InstallationEngine,
    plugin_names: &[String],
    dry_run: bool,
) -> i32 {
    engine.dry_run(dry_run);
    engine.whitelist(plugin_names);
    engine.update(true);
    engine.remove_untracked(false);

    let status = engine.run();
    debug!("Installation engine exited with status {}", status);
    status
}
