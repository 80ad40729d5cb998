// src/lockfile/guard.rs

//! Makes sure a lock baseline exists before installing
//!
//! Without a lock the installer would see every installed package as
//! untracked. When none exists, the current environment becomes the lock:
//! the companion repository's packages under the synthetic root, with no
//! content hash attached.

use super::Locker;
use crate::error::Result;
use crate::project::ProjectPackage;
use crate::repository::Repository;
use tracing::info;

/// What [`ensure_locked`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockGuardOutcome {
    /// A lock already existed and was left untouched
    AlreadyLocked,
    /// A lock was seeded from the installed packages
    Seeded { packages: usize },
}

pub fn ensure_locked(
    locker: &dyn Locker,
    root: &ProjectPackage,
    repository: &Repository,
) -> Result<LockGuardOutcome> {
    if locker.is_locked()? {
        return Ok(LockGuardOutcome::AlreadyLocked);
    }

    locker.seed(root, repository.packages())?;
    info!(
        "Seeded lock file {} with {} installed packages",
        locker.lock_path().display(),
        repository.len()
    );

    Ok(LockGuardOutcome::Seeded {
        packages: repository.len(),
    })
}
