// src/repository/mod.rs

//! Package repositories
//!
//! A [`Repository`] is an in-memory, ordered set of package records. The
//! plugin installer uses one as the companion repository (everything already
//! installed), and a [`Pool`] stacks it together with the configured indexes
//! when the installer looks for candidates.

mod index;
mod pool;

pub use index::FileIndex;
pub use pool::Pool;

use crate::error::Result;
use crate::package::{Dependency, PackageRecord, canonicalize_name};

/// Something that can answer "which releases satisfy this dependency?"
pub trait PackageSource {
    fn name(&self) -> &str;

    /// Releases matching the dependency's name and constraint
    fn find_packages(&self, dependency: &Dependency) -> Result<Vec<PackageRecord>>;
}

/// Mutable in-memory collection of packages, unique by name and version
#[derive(Debug, Clone, Default)]
pub struct Repository {
    name: String,
    packages: Vec<PackageRecord>,
}

impl Repository {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            packages: Vec::new(),
        }
    }

    /// Add a package, replacing an existing record of the same release
    pub fn add_package(&mut self, package: PackageRecord) {
        if let Some(existing) = self.packages.iter_mut().find(|p| p.same_release(&package)) {
            *existing = package;
        } else {
            self.packages.push(package);
        }
    }

    pub fn packages(&self) -> &[PackageRecord] {
        &self.packages
    }

    /// First record with the given name
    pub fn package(&self, name: &str) -> Option<&PackageRecord> {
        let name = canonicalize_name(name);
        self.packages.iter().find(|p| p.name() == name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl PackageSource for Repository {
    fn name(&self) -> &str {
        &self.name
    }

    fn find_packages(&self, dependency: &Dependency) -> Result<Vec<PackageRecord>> {
        Ok(self
            .packages
            .iter()
            .filter(|p| dependency.is_satisfied_by(p))
            .cloned()
            .collect())
    }
}
