// src/environment/mod.rs

//! Target runtime environment and snapshots of what is installed in it

mod manifest;

pub use manifest::{Manifest, ManifestPackage};

use crate::error::Result;
use crate::package::{DependencyFactory, PackageRecord};
use crate::version::RuntimeVersion;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The environment plugins are installed into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Manifest listing the installed packages
    manifest_path: PathBuf,
    runtime_version: RuntimeVersion,
}

impl Environment {
    pub fn new(manifest_path: impl Into<PathBuf>, runtime_version: RuntimeVersion) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            runtime_version,
        }
    }

    /// Open the environment described by a manifest file
    pub fn open(manifest_path: &Path) -> Result<Self> {
        let manifest = Manifest::from_file(manifest_path)?;
        let runtime_version = match manifest.runtime_version.as_deref() {
            Some(raw) => RuntimeVersion::parse(raw)?,
            None => {
                return Err(crate::Error::Environment(format!(
                    "{} does not declare a runtime_version",
                    manifest_path.display()
                )));
            }
        };
        Ok(Self::new(manifest_path, runtime_version))
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    pub fn runtime_version(&self) -> &RuntimeVersion {
        &self.runtime_version
    }
}

/// Enumerates the packages installed in an environment
pub trait EnvironmentReader {
    /// Installed packages in a stable order; declared dependencies are only
    /// populated when `with_dependencies` is set
    fn snapshot(&self, env: &Environment, with_dependencies: bool) -> Result<Vec<PackageRecord>>;
}

/// Reads the environment's JSON manifest
pub struct FileEnvironmentReader<'a> {
    factory: &'a dyn DependencyFactory,
}

impl<'a> FileEnvironmentReader<'a> {
    pub fn new(factory: &'a dyn DependencyFactory) -> Self {
        Self { factory }
    }
}

impl EnvironmentReader for FileEnvironmentReader<'_> {
    fn snapshot(&self, env: &Environment, with_dependencies: bool) -> Result<Vec<PackageRecord>> {
        let manifest = Manifest::from_file(env.manifest_path())?;
        let records = manifest.records(self.factory, with_dependencies)?;
        debug!(
            "Read {} installed packages from {}",
            records.len(),
            env.manifest_path().display()
        );
        Ok(records)
    }
}
