// src/lockfile/locker.rs

//! Access to the lock file at a fixed path

use super::{LockedPackage, Lockfile};
use crate::error::Result;
use crate::package::PackageRecord;
use crate::project::ProjectPackage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads and writes the lock state
pub trait Locker {
    /// Path of the lock file this locker manages
    fn lock_path(&self) -> &Path;

    /// Whether a lock record exists
    fn is_locked(&self) -> Result<bool>;

    /// Locked packages, empty when unlocked
    fn locked_packages(&self) -> Result<Vec<LockedPackage>>;

    /// Replace the lock with the given root and package set
    fn set_lock_data(
        &self,
        root: &ProjectPackage,
        packages: &[PackageRecord],
        fresh: bool,
    ) -> Result<()>;

    /// Write the initial lock mirroring the installed packages
    fn seed(&self, root: &ProjectPackage, packages: &[PackageRecord]) -> Result<()> {
        self.set_lock_data(root, packages, false)
    }
}

/// Locker backed by a TOML file
#[derive(Debug, Clone)]
pub struct TomlLocker {
    path: PathBuf,
}

impl TomlLocker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the current lock, if any
    pub fn load(&self) -> Result<Option<Lockfile>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        Ok(Some(Lockfile::from_file(&self.path)?))
    }
}

impl Locker for TomlLocker {
    fn lock_path(&self) -> &Path {
        &self.path
    }

    fn is_locked(&self) -> Result<bool> {
        Ok(self.path.is_file())
    }

    fn locked_packages(&self) -> Result<Vec<LockedPackage>> {
        Ok(self.load()?.map(|lock| lock.packages).unwrap_or_default())
    }

    fn set_lock_data(
        &self,
        root: &ProjectPackage,
        packages: &[PackageRecord],
        fresh: bool,
    ) -> Result<()> {
        let mut lockfile = Lockfile::from_packages(root, packages);
        if fresh {
            lockfile.set_content_hash(root);
        }
        lockfile.write_to_file(&self.path)?;
        debug!("Wrote {} locked packages to {}", packages.len(), self.path.display());
        Ok(())
    }
}
