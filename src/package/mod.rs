// src/package/mod.rs

//! Package and dependency records
//!
//! A [`PackageRecord`] describes one installed or available distribution: its
//! canonical name, version, and the requirements it declares. Records are
//! immutable once built; readers assemble them with [`PackageRecord::with_requires`].

mod dependency;
mod factory;
mod marker;

pub use dependency::{Dependency, DependencySource};
pub use factory::{DependencyFactory, Factory, RequirementAttributes};
pub use marker::{MarkerEnvironment, MarkerOp, MarkerTree, MarkerValue};

use crate::version::Version;
use std::fmt;

/// Canonical form of a package name
///
/// Lowercases the name and collapses every run of `-`, `_` and `.` into a
/// single `-`, so `Poetry_Plugin.Export` and `poetry-plugin-export` compare equal.
pub fn canonicalize_name(name: &str) -> String {
    let mut canonical = String::with_capacity(name.len());
    let mut in_separator = false;

    for c in name.trim().chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                canonical.push('-');
                in_separator = true;
            }
        } else {
            canonical.push(c.to_ascii_lowercase());
            in_separator = false;
        }
    }

    canonical
}

/// An installed or available package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    name: String,
    pretty_name: String,
    version: Version,
    requires: Vec<Dependency>,
}

impl PackageRecord {
    pub fn new(name: &str, version: Version) -> Self {
        Self {
            name: canonicalize_name(name),
            pretty_name: name.trim().to_string(),
            version,
            requires: Vec::new(),
        }
    }

    /// Builder: set declared dependencies
    pub fn with_requires(mut self, requires: Vec<Dependency>) -> Self {
        self.requires = requires;
        self
    }

    /// Canonical name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name as it was published
    pub fn pretty_name(&self) -> &str {
        &self.pretty_name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn requires(&self) -> &[Dependency] {
        &self.requires
    }

    /// Whether this record has the same identity (name and version) as another
    pub fn same_release(&self, other: &PackageRecord) -> bool {
        self.name == other.name && self.version == other.version
    }
}

impl fmt::Display for PackageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.pretty_name, self.version)
    }
}
