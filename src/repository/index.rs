// src/repository/index.rs

//! Package index backed by a local JSON file
//!
//! Uses the same `packages` list as the environment manifest. Stands in for a
//! remote index: the installer only needs "which releases exist and what do
//! they require".

use super::{PackageSource, Repository};
use crate::environment::Manifest;
use crate::error::Result;
use crate::package::{Dependency, DependencyFactory, PackageRecord};
use std::path::Path;
use tracing::info;

pub struct FileIndex {
    repository: Repository,
}

impl FileIndex {
    pub fn load(path: &Path, factory: &dyn DependencyFactory) -> Result<Self> {
        let manifest = Manifest::from_file(path)?;
        let mut repository = Repository::new(&path.display().to_string());
        for record in manifest.records(factory, true)? {
            repository.add_package(record);
        }
        info!("Loaded {} releases from index {}", repository.len(), path.display());
        Ok(Self { repository })
    }

    pub fn len(&self) -> usize {
        self.repository.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repository.is_empty()
    }
}

impl PackageSource for FileIndex {
    fn name(&self) -> &str {
        self.repository.name()
    }

    fn find_packages(&self, dependency: &Dependency) -> Result<Vec<PackageRecord>> {
        self.repository.find_packages(dependency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::Factory;
    use crate::version::VersionConstraint;
    use std::fs;

    #[test]
    fn test_load_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(
            &path,
            r#"{ "packages": [
                { "name": "demo", "version": "1.0" },
                { "name": "demo", "version": "2.0", "requires": ["cleo (^1.0)"] }
            ] }"#,
        )
        .unwrap();

        let index = FileIndex::load(&path, &Factory).unwrap();
        assert_eq!(index.len(), 2);

        let found = index
            .find_packages(&Dependency::new("demo", VersionConstraint::parse(">=2").unwrap()))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].requires()[0].name(), "cleo");
    }
}
