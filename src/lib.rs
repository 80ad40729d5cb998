// src/lib.rs

//! Plugin installer
//!
//! Installs plugins into the environment a packaging tool runs from. The
//! tool's installed package becomes the root of a synthetic project, the
//! requested plugins are added as its dependencies, and an installation
//! engine resolves and applies only those additions.
//!
//! # Architecture
//!
//! - Requirements: plugin identifiers parsed into names and attributes
//! - Environment: snapshot of what is installed, read through a trait
//! - Project: synthetic root plus a companion repository of installed packages
//! - Lock: seeded from the environment on first use, never overwritten by the guard
//! - Installer: whitelist/update-mode engine that only ever adds or upgrades

pub mod config;
pub mod environment;
mod error;
pub mod installer;
pub mod lockfile;
pub mod output;
pub mod package;
pub mod plugin;
pub mod progress;
pub mod project;
pub mod repository;
pub mod requirement;
pub mod version;

pub use config::{HomeLayout, InstallerConfig};
pub use environment::{Environment, EnvironmentReader, FileEnvironmentReader};
pub use error::{Error, Result};
pub use installer::{
    DefaultEngineFactory, EngineContext, EngineFactory, InstallationEngine, Installer,
    InstallerFlags,
};
pub use lockfile::{LockGuardOutcome, Locker, Lockfile, TomlLocker, ensure_locked};
pub use output::{ConsoleOutput, Output};
pub use package::{Dependency, DependencyFactory, Factory, PackageRecord};
pub use plugin::{Collaborators, PluginInstaller, drive_installation};
pub use progress::{CliProgress, LogProgress, ProgressTracker, SilentProgress};
pub use project::{ProjectBuilder, ProjectPackage, SyntheticProject};
pub use repository::{FileIndex, PackageSource, Pool, Repository};
pub use requirement::{PluginRequirement, parse_plugin_requirements};
pub use version::{RuntimeVersion, Version, VersionConstraint};
