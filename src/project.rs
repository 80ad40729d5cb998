// src/project.rs

//! Synthetic root project for plugin installation
//!
//! Plugins live in the host tool's own environment, which has no project file
//! of its own. The builder reconstructs one from what is installed:
//!
//! - the host tool's installed package becomes the root, keeping its declared
//!   dependencies
//! - every other installed package goes into the companion repository, the
//!   pool of releases the installer treats as already present
//! - bootstrap packages the host needs to function (pip, setuptools, ...) are
//!   hidden from both
//!
//! Requested plugins are then added to the root's dependencies.

use crate::error::{Error, Result};
use crate::package::{Dependency, DependencyFactory, PackageRecord, canonicalize_name};
use crate::repository::Repository;
use crate::requirement::PluginRequirement;
use crate::version::{RuntimeVersion, Version};
use std::fmt;
use tracing::{debug, info, warn};

/// Packages never treated as ordinary dependencies
pub const UNSAFE_PACKAGES: &[&str] = &["setuptools", "distribute", "pip", "wheel"];

/// Name of the host tool's own package
pub const DEFAULT_HOST_PACKAGE: &str = "poetry";

/// Whether a package is one of the protected bootstrap packages
pub fn is_unsafe_package(name: &str) -> bool {
    let name = canonicalize_name(name);
    UNSAFE_PACKAGES.contains(&name.as_str())
}

/// Root of the resolution: the host tool plus requested plugins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPackage {
    name: String,
    pretty_name: String,
    version: Version,
    dependencies: Vec<Dependency>,
    /// Runtime version the environment runs, as `major.minor.patch`
    runtime_versions: String,
}

impl ProjectPackage {
    pub fn new(name: &str, version: Version) -> Self {
        Self {
            name: canonicalize_name(name),
            pretty_name: name.to_string(),
            version,
            dependencies: Vec::new(),
            runtime_versions: "*".to_string(),
        }
    }

    /// Append a dependency as declared, even when its name is already present
    ///
    /// Declared requirements may repeat a name under different markers
    /// (`x (<2.0); python_version < "3.8"` next to `x (>=2.0)`); all of them are kept.
    pub fn push_dependency(&mut self, dependency: Dependency) {
        self.dependencies.push(dependency);
    }

    /// Add a dependency, replacing every existing one with the same name
    ///
    /// The replacement takes the position of the first entry it displaces.
    pub fn add_dependency(&mut self, dependency: Dependency) {
        let Some(position) = self
            .dependencies
            .iter()
            .position(|d| d.name() == dependency.name())
        else {
            self.dependencies.push(dependency);
            return;
        };

        debug!(
            "Replacing root dependency {} with {}",
            self.dependencies[position], dependency
        );
        self.dependencies[position] = dependency;
        let name = self.dependencies[position].name().to_string();
        let mut index = 0;
        self.dependencies.retain(|d| {
            let keep = index <= position || d.name() != name;
            index += 1;
            keep
        });
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pretty_name(&self) -> &str {
        &self.pretty_name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn dependency(&self, name: &str) -> Option<&Dependency> {
        let name = canonicalize_name(name);
        self.dependencies.iter().find(|d| d.name() == name)
    }

    pub fn runtime_versions(&self) -> &str {
        &self.runtime_versions
    }

    pub fn set_runtime_versions(&mut self, runtime: &RuntimeVersion) {
        self.runtime_versions = runtime.to_string();
    }
}

impl fmt::Display for ProjectPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.pretty_name, self.version)
    }
}

/// Output of [`ProjectBuilder::build`]
#[derive(Debug, Clone)]
pub struct SyntheticProject {
    pub root: ProjectPackage,
    /// Everything installed except the root and unsafe packages
    pub repository: Repository,
    /// Requested plugin names in request order, without duplicates
    pub plugin_names: Vec<String>,
}

/// Builds the synthetic root project from an environment snapshot
pub struct ProjectBuilder<'a> {
    host_package: String,
    factory: &'a dyn DependencyFactory,
}

impl<'a> ProjectBuilder<'a> {
    pub fn new(host_package: &str, factory: &'a dyn DependencyFactory) -> Self {
        Self {
            host_package: canonicalize_name(host_package),
            factory,
        }
    }

    pub fn build(
        &self,
        installed: Vec<PackageRecord>,
        runtime: &RuntimeVersion,
        plugins: Vec<PluginRequirement>,
    ) -> Result<SyntheticProject> {
        let mut repository = Repository::new("installed");
        let mut root: Option<ProjectPackage> = None;

        for package in installed {
            if is_unsafe_package(package.name()) {
                debug!("Skipping unsafe package {}", package);
                continue;
            }

            if package.name() == self.host_package {
                if let Some(existing) = &root {
                    warn!("Ignoring duplicate host package {} (using {})", package, existing);
                    continue;
                }
                let mut project =
                    ProjectPackage::new(package.pretty_name(), package.version().clone());
                for dependency in package.requires() {
                    project.push_dependency(dependency.clone());
                }
                root = Some(project);
                continue;
            }

            repository.add_package(package);
        }

        let mut root = root.ok_or_else(|| Error::HostPackageNotFound(self.host_package.clone()))?;

        let mut plugin_names: Vec<String> = Vec::new();
        for plugin in plugins {
            let (name, attributes) = plugin.into_parts();
            let dependency = self.factory.create_dependency(&name, &attributes)?;
            root.add_dependency(dependency);

            let canonical = canonicalize_name(&name);
            if !plugin_names.iter().any(|n| canonicalize_name(n) == canonical) {
                plugin_names.push(name);
            }
        }

        root.set_runtime_versions(runtime);

        info!(
            "Root project {} with {} dependencies, {} installed packages available",
            root,
            root.dependencies().len(),
            repository.len()
        );

        Ok(SyntheticProject {
            root,
            repository,
            plugin_names,
        })
    }
}
