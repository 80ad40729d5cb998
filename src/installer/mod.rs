// src/installer/mod.rs

//! Installation engine
//!
//! The engine takes a synthetic root project plus everything that is already
//! installed, resolves the root's dependencies and brings the environment in
//! line with the result. It is configured through four mode-setting calls
//! before `run()`:
//!
//! - `dry_run`: plan only, change nothing
//! - `whitelist`: the only names allowed to be added or changed
//! - `update`: prefer newer releases for whitelisted names
//! - `remove_untracked`: uninstall packages missing from the resolution
//!
//! `run()` returns a process exit status rather than a `Result`; diagnostics
//! are written to the engine's output before it returns.

mod executor;
mod operation;
mod solver;

pub use executor::{Executor, ManifestExecutor, RecordingExecutor};
pub use operation::{Operation, OperationSummary, plan_operations};
pub use solver::{Resolution, Solver};

use crate::config::InstallerConfig;
use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::lockfile::Locker;
use crate::output::Output;
use crate::package::PackageRecord;
use crate::progress::{CliProgress, LogProgress, ProgressTracker};
use crate::project::ProjectPackage;
use crate::repository::{Pool, Repository};
use tracing::{debug, error, info};

/// Mode switches for one engine run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallerFlags {
    pub dry_run: bool,
    pub whitelist: Vec<String>,
    pub update: bool,
    pub remove_untracked: bool,
}

/// Configurable engine that resolves and applies a root project
pub trait InstallationEngine {
    fn dry_run(&mut self, dry_run: bool);

    fn whitelist(&mut self, names: &[String]);

    fn update(&mut self, update: bool);

    fn remove_untracked(&mut self, remove_untracked: bool);

    /// Resolve and apply; 0 on success
    fn run(&mut self) -> i32;
}

/// Everything an engine is bound to
pub struct EngineContext<'a> {
    pub output: &'a dyn Output,
    pub env: &'a Environment,
    pub root: ProjectPackage,
    pub locker: &'a dyn Locker,
    pub pool: &'a Pool,
    pub config: &'a InstallerConfig,
    /// Installed packages other than the root
    pub repository: Repository,
}

/// Constructs engines
///
/// The orchestrator only asks for an engine once every earlier step has
/// succeeded, so a factory that is never called proves nothing was installed.
pub trait EngineFactory {
    fn create<'a>(&self, ctx: EngineContext<'a>) -> Box<dyn InstallationEngine + 'a>;
}

/// Reference engine: greedy solver, operation planner and an [`Executor`]
pub struct Installer<'a> {
    ctx: EngineContext<'a>,
    executor: Box<dyn Executor + 'a>,
    flags: InstallerFlags,
}

impl<'a> Installer<'a> {
    pub fn new(ctx: EngineContext<'a>, executor: Box<dyn Executor + 'a>) -> Self {
        Self {
            ctx,
            executor,
            flags: InstallerFlags::default(),
        }
    }

    pub fn flags(&self) -> &InstallerFlags {
        &self.flags
    }

    /// Resolve, plan and (unless dry-running) apply
    pub fn try_run(&mut self) -> Result<Vec<Operation>> {
        let ctx = &self.ctx;
        debug!(
            "Running installer for {} (data dir {}, flags {:?})",
            ctx.root,
            ctx.config.data_dir.display(),
            self.flags
        );

        ctx.output.write_line(if self.flags.update {
            "Updating dependencies"
        } else {
            "Installing dependencies"
        });
        ctx.output.write_line("Resolving dependencies...");

        let locked = ctx.locker.locked_packages()?;
        let resolution = Solver::new(&ctx.root, &ctx.repository, &locked, ctx.pool)
            .with_whitelist(&self.flags.whitelist)
            .with_update(self.flags.update)
            .solve()?;

        let operations = plan_operations(
            &resolution.packages,
            &ctx.repository,
            ctx.root.name(),
            self.flags.remove_untracked,
        );

        if operations.is_empty() {
            ctx.output.write_line("No dependencies to install or update");
        } else {
            ctx.output.write_line(&format!(
                "Package operations: {}",
                OperationSummary::of(&operations)
            ));
        }

        if self.flags.dry_run {
            for operation in &operations {
                ctx.output.write_line(&format!("  - {}", operation.describe_planned()));
            }
            info!("Dry run: {} operations planned, none applied", operations.len());
            return Ok(operations);
        }

        if !operations.is_empty() {
            self.executor.execute(&operations)?;
        }

        let locked_set = self.lock_set(&resolution, &operations);
        let ctx = &self.ctx;
        ctx.locker
            .set_lock_data(&ctx.root, &locked_set, true)
            .map_err(|e| Error::ExecutionFailure(format!("cannot update the lock file: {}", e)))?;
        ctx.output.write_line("Writing lock file");

        Ok(operations)
    }

    /// Packages recorded in the lock after a real run
    ///
    /// Resolved packages plus whatever stays installed outside the resolution.
    fn lock_set(&self, resolution: &Resolution, operations: &[Operation]) -> Vec<PackageRecord> {
        let mut packages = resolution.packages.clone();
        for package in self.ctx.repository.packages() {
            let resolved = resolution.package(package.name()).is_some();
            let removed = operations
                .iter()
                .any(|op| matches!(op, Operation::Uninstall(p) if p.name() == package.name()));
            if !resolved && !removed {
                packages.push(package.clone());
            }
        }
        packages
    }
}

impl InstallationEngine for Installer<'_> {
    fn dry_run(&mut self, dry_run: bool) {
        self.flags.dry_run = dry_run;
    }

    fn whitelist(&mut self, names: &[String]) {
        self.flags.whitelist = names.to_vec();
    }

    fn update(&mut self, update: bool) {
        self.flags.update = update;
    }

    fn remove_untracked(&mut self, remove_untracked: bool) {
        self.flags.remove_untracked = remove_untracked;
    }

    fn run(&mut self) -> i32 {
        match self.try_run() {
            Ok(_) => 0,
            Err(e) => {
                error!("Installation of {} failed: {}", self.ctx.root, e);
                self.ctx.output.write_line(&e.to_string());
                e.exit_code()
            }
        }
    }
}

/// Builds [`Installer`]s that apply operations to the environment manifest
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEngineFactory {
    /// Show a progress bar instead of logging progress
    pub interactive: bool,
}

impl DefaultEngineFactory {
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }
}

impl EngineFactory for DefaultEngineFactory {
    fn create<'a>(&self, ctx: EngineContext<'a>) -> Box<dyn InstallationEngine + 'a> {
        let progress: Box<dyn ProgressTracker> = if self.interactive {
            Box::new(CliProgress::new("Installing"))
        } else {
            Box::new(LogProgress::new("install"))
        };
        let executor = ManifestExecutor::new(ctx.env.manifest_path(), progress, ctx.output);
        Box::new(Installer::new(ctx, Box::new(executor)))
    }
}
