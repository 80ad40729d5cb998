// src/repository/pool.rs

//! Ordered stack of package sources searched together

use super::PackageSource;
use crate::error::Result;
use crate::package::{Dependency, PackageRecord};

/// Ordered collection of package sources
///
/// When two sources offer the same release, the one added first wins.
#[derive(Default)]
pub struct Pool {
    sources: Vec<Box<dyn PackageSource>>,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_repository(&mut self, source: Box<dyn PackageSource>) {
        self.sources.push(source);
    }

    /// Names of the sources in search order
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn find_packages(&self, dependency: &Dependency) -> Result<Vec<PackageRecord>> {
        let mut found: Vec<PackageRecord> = Vec::new();
        for source in &self.sources {
            for package in source.find_packages(dependency)? {
                if !found.iter().any(|p| p.same_release(&package)) {
                    found.push(package);
                }
            }
        }
        Ok(found)
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("sources", &self.source_names())
            .finish()
    }
}
