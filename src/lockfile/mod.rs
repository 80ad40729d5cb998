// src/lockfile/mod.rs

//! Lock file for the plugin environment
//!
//! The lock file (`poetry.lock` in the data directory) records the package set
//! the plugin environment was last resolved to. It is the baseline the
//! installer diffs against, so that installing one plugin leaves every other
//! locked package where it is.
//!
//! # Format
//!
//! ```toml
//! [metadata]
//! version = 1
//! generated = "2024-01-15T10:30:00Z"
//! generator = "plugin-installer 0.1.0"
//! root = "poetry"
//! root_version = "1.2.0"
//! runtime_versions = "3.11.4"
//! content_hash = "sha256:..."
//!
//! [[packages]]
//! name = "cleo"
//! version = "1.0.0"
//! requires = ["pylev (>=1.3)"]
//! ```
//!
//! A lock seeded from the current environment has no `content_hash`: it
//! mirrors what is installed and says nothing about the root's requirements.

mod guard;
mod locker;

pub use guard::{LockGuardOutcome, ensure_locked};
pub use locker::{Locker, TomlLocker};

use crate::environment::ManifestPackage;
use crate::package::PackageRecord;
use crate::project::ProjectPackage;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Current lockfile format version
pub const LOCKFILE_VERSION: u32 = 1;

/// Default lockfile name
pub const LOCKFILE_NAME: &str = "poetry.lock";

#[derive(Error, Debug)]
pub enum LockfileError {
    #[error("Failed to access lockfile: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse lockfile: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize lockfile: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Failed to replace lockfile: {0}")]
    PersistError(#[from] tempfile::PersistError),

    #[error("Lockfile version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Lockfile root structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lockfile {
    pub metadata: LockfileMetadata,

    #[serde(default)]
    pub packages: Vec<LockedPackage>,
}

/// Lockfile metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockfileMetadata {
    /// Lockfile format version
    pub version: u32,

    /// When the lockfile was generated (RFC 3339)
    pub generated: String,

    /// Tool that generated the lockfile
    pub generator: String,

    /// Root project name
    pub root: String,

    pub root_version: String,

    pub runtime_versions: String,

    /// Hash of the root's dependency list, absent for a seeded lock
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

/// A locked package release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedPackage {
    pub name: String,
    pub version: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<String>,
}

impl LockedPackage {
    pub fn from_record(record: &PackageRecord) -> Self {
        let entry = ManifestPackage::from_record(record);
        Self {
            name: record.name().to_string(),
            version: entry.version,
            requires: entry.requires,
        }
    }
}

impl Lockfile {
    /// Create a lock for a root project with no packages
    pub fn new(root: &ProjectPackage) -> Self {
        Self {
            metadata: LockfileMetadata {
                version: LOCKFILE_VERSION,
                generated: Utc::now().to_rfc3339(),
                generator: format!("plugin-installer {}", env!("CARGO_PKG_VERSION")),
                root: root.name().to_string(),
                root_version: root.version().to_string(),
                runtime_versions: root.runtime_versions().to_string(),
                content_hash: None,
            },
            packages: Vec::new(),
        }
    }

    /// Lock a root project and a package set
    pub fn from_packages(root: &ProjectPackage, packages: &[PackageRecord]) -> Self {
        let mut lockfile = Self::new(root);
        for package in packages {
            lockfile.add_package(LockedPackage::from_record(package));
        }
        lockfile
    }

    /// Load lockfile from a path
    pub fn from_file(path: &Path) -> Result<Self, LockfileError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse lockfile from TOML string
    pub fn parse(content: &str) -> Result<Self, LockfileError> {
        let lockfile: Lockfile = toml::from_str(content)?;

        if lockfile.metadata.version > LOCKFILE_VERSION {
            return Err(LockfileError::VersionMismatch {
                expected: LOCKFILE_VERSION,
                found: lockfile.metadata.version,
            });
        }

        Ok(lockfile)
    }

    /// Write lockfile to a path
    ///
    /// The content goes to a temporary file next to the target which is then
    /// renamed over it, so readers see either the old lock or the new one.
    pub fn write_to_file(&self, path: &Path) -> Result<(), LockfileError> {
        let content = self.to_toml()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(content.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(path)?;
        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String, LockfileError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Add a package, replacing an existing entry with the same name
    pub fn add_package(&mut self, package: LockedPackage) {
        if let Some(existing) = self.packages.iter_mut().find(|p| p.name == package.name) {
            *existing = package;
        } else {
            self.packages.push(package);
        }
    }

    pub fn get_package(&self, name: &str) -> Option<&LockedPackage> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Record the hash of the root's dependency list
    pub fn set_content_hash(&mut self, root: &ProjectPackage) {
        self.metadata.content_hash = Some(content_hash(root));
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// `sha256:<hex>` over the root's dependencies and runtime version
pub fn content_hash(root: &ProjectPackage) -> String {
    let mut hasher = Sha256::new();
    for dependency in root.dependencies() {
        hasher.update(dependency.to_string().as_bytes());
        hasher.update(b"\n");
    }
    hasher.update(root.runtime_versions().as_bytes());
    format!("sha256:{}", hex::encode(hasher.finalize()))
}
