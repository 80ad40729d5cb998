// src/environment/manifest.rs

//! JSON manifest describing installed (or installable) packages
//!
//! ```json
//! {
//!   "runtime_version": "3.11.4",
//!   "packages": [
//!     { "name": "poetry", "version": "1.2.0", "requires": ["cleo (>=1.0)"] },
//!     { "name": "cleo", "version": "1.0.0" }
//!   ]
//! }
//! ```
//!
//! Index files share the `packages` list and omit `runtime_version`.

use crate::error::{Error, Result};
use crate::package::{Dependency, DependencyFactory, DependencySource, PackageRecord};
use crate::requirement::parse_requirement;
use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

/// On-disk manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_version: Option<String>,

    #[serde(default)]
    pub packages: Vec<ManifestPackage>,
}

/// One package entry in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestPackage {
    pub name: String,
    pub version: String,

    /// Requirement strings in the same syntax users give on the command line
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<String>,
}

impl Manifest {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Environment(format!("cannot read manifest {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Write atomically: temp file in the same directory, then rename
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let dir = path.parent().unwrap_or(Path::new("."));
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, self)?;
        file.write_all(b"\n")?;
        file.persist(path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }

    /// Convert every entry into a package record
    pub fn records(
        &self,
        factory: &dyn DependencyFactory,
        with_dependencies: bool,
    ) -> Result<Vec<PackageRecord>> {
        self.packages
            .iter()
            .map(|entry| entry.to_record(factory, with_dependencies))
            .collect()
    }
}

impl ManifestPackage {
    pub fn to_record(
        &self,
        factory: &dyn DependencyFactory,
        with_dependencies: bool,
    ) -> Result<PackageRecord> {
        let version = Version::parse(&self.version)?;
        let requires = if with_dependencies {
            self.requires
                .iter()
                .map(|raw| {
                    let (name, attributes) = parse_requirement(raw)?.into_parts();
                    factory.create_dependency(&name, &attributes)
                })
                .collect::<Result<Vec<_>>>()?
        } else {
            Vec::new()
        };

        Ok(PackageRecord::new(&self.name, version).with_requires(requires))
    }

    pub fn from_record(record: &PackageRecord) -> Self {
        Self {
            name: record.pretty_name().to_string(),
            version: record.version().to_string(),
            requires: record.requires().iter().map(requirement_string).collect(),
        }
    }
}

/// Requirement string that [`parse_requirement`] reads back to the same dependency
fn requirement_string(dep: &Dependency) -> String {
    let mut out = match &dep.source {
        Some(DependencySource::Git { url, reference }) => match reference {
            Some(r) => format!("git+{}@{}", url, r),
            None => format!("git+{}", url),
        },
        Some(source) => source.to_string(),
        None => {
            let mut s = dep.pretty_name().to_string();
            if !dep.extras.is_empty() {
                s.push_str(&format!("[{}]", dep.extras.join(",")));
            }
            if !dep.constraint.is_any() {
                s.push_str(&format!(" ({})", dep.constraint));
            }
            s
        }
    };
    if let Some(markers) = &dep.markers {
        out.push_str("; ");
        out.push_str(markers);
    }
    out
}
