// src/installer/solver.rs

//! Whitelist-aware dependency selection
//!
//! A single forward pass over the root's dependencies, breadth first. This
//! is not a backtracking solver: the first release chosen for a name is final
//! and any later requirement it does not satisfy is reported as a conflict.
//!
//! Selection rules per name:
//! - installed and not whitelisted: keep the installed release
//! - locked but not installed and not whitelisted: prefer the locked release
//! - whitelisted, update mode: newest matching release from the pool or the
//!   installed packages
//! - whitelisted, install mode: keep a matching installed release, otherwise
//!   the newest matching one
//! - not installed at all: newest matching release
//!
//! Dependencies whose environment markers do not hold for the root's runtime
//! are skipped. Index releases never stand in for a git, URL or path
//! requirement; such a requirement that is not already installed fails.

use crate::error::{Error, Result};
use crate::lockfile::LockedPackage;
use crate::package::{
    Dependency, MarkerEnvironment, MarkerTree, PackageRecord, canonicalize_name,
};
use crate::project::{ProjectPackage, is_unsafe_package};
use crate::repository::{PackageSource, Pool, Repository};
use crate::version::{RuntimeVersion, Version};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Releases chosen for the root's dependency graph, in discovery order
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub packages: Vec<PackageRecord>,
}

impl Resolution {
    pub fn package(&self, name: &str) -> Option<&PackageRecord> {
        let name = canonicalize_name(name);
        self.packages.iter().find(|p| p.name() == name)
    }
}

pub struct Solver<'a> {
    root: &'a ProjectPackage,
    installed: &'a Repository,
    locked: &'a [LockedPackage],
    pool: &'a Pool,
    whitelist: HashSet<String>,
    update: bool,
    /// `None` when the root carries no runtime version; markers then always hold
    markers: Option<MarkerEnvironment>,
}

impl<'a> Solver<'a> {
    pub fn new(
        root: &'a ProjectPackage,
        installed: &'a Repository,
        locked: &'a [LockedPackage],
        pool: &'a Pool,
    ) -> Self {
        Self {
            root,
            installed,
            locked,
            pool,
            whitelist: HashSet::new(),
            update: false,
            markers: RuntimeVersion::parse(root.runtime_versions())
                .ok()
                .map(|runtime| MarkerEnvironment::for_runtime(&runtime)),
        }
    }

    /// Builder: names allowed to change
    pub fn with_whitelist(mut self, names: &[String]) -> Self {
        self.whitelist = names.iter().map(|n| canonicalize_name(n)).collect();
        self
    }

    /// Builder: prefer the newest release for whitelisted names
    pub fn with_update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    pub fn solve(&self) -> Result<Resolution> {
        let mut chosen: HashMap<String, PackageRecord> = HashMap::new();
        let mut order: Vec<String> = Vec::new();
        // (requirement, who required it, extras active for its markers)
        let mut queue: VecDeque<(Dependency, String, Vec<String>)> = self
            .root
            .dependencies()
            .iter()
            .map(|d| (d.clone(), self.root.pretty_name().to_string(), Vec::new()))
            .collect();

        while let Some((dependency, required_by, extras)) = queue.pop_front() {
            if dependency.name() == self.root.name() || is_unsafe_package(dependency.name()) {
                continue;
            }
            if !self.markers_hold(&dependency, &extras)? {
                debug!(
                    "Skipping {} (required by {}): markers do not match",
                    dependency, required_by
                );
                continue;
            }

            if let Some(existing) = chosen.get(dependency.name()) {
                if !dependency.constraint.satisfies(existing.version()) {
                    return Err(Error::ResolutionFailure(format!(
                        "{} requires {}, but {} was already selected",
                        required_by, dependency, existing
                    )));
                }
                continue;
            }

            let package = self.select(&dependency, &required_by)?;
            debug!("Selected {} for {} (required by {})", package, dependency, required_by);

            for requirement in package.requires() {
                queue.push_back((
                    requirement.clone(),
                    package.pretty_name().to_string(),
                    dependency.extras.clone(),
                ));
            }
            order.push(package.name().to_string());
            chosen.insert(package.name().to_string(), package);
        }

        let packages = order
            .iter()
            .filter_map(|name| chosen.remove(name))
            .collect();
        Ok(Resolution { packages })
    }

    fn select(&self, dependency: &Dependency, required_by: &str) -> Result<PackageRecord> {
        let name = dependency.name();
        let whitelisted = self.whitelist.contains(name);
        let installed = self.installed.package(name);

        if !whitelisted && let Some(current) = installed {
            if dependency.constraint.satisfies(current.version()) {
                return Ok(current.clone());
            }
            return Err(Error::ResolutionFailure(format!(
                "{} requires {}, but {} is installed and is not allowed to change",
                required_by, dependency, current
            )));
        }

        if let Some(source) = &dependency.source {
            return Err(Error::ResolutionFailure(format!(
                "{} requires {}, but {} sources are not supported by this engine",
                required_by,
                dependency,
                source.kind()
            )));
        }

        if whitelisted
            && !self.update
            && let Some(current) = installed
            && dependency.constraint.satisfies(current.version())
        {
            return Ok(current.clone());
        }

        let mut candidates = self.pool.find_packages(dependency)?;
        for package in self.installed.find_packages(dependency)? {
            if !candidates.iter().any(|c| c.same_release(&package)) {
                candidates.push(package);
            }
        }

        if !whitelisted
            && let Some(locked) = self.locked_version(name)
            && let Some(package) = candidates.iter().find(|c| *c.version() == locked)
        {
            return Ok(package.clone());
        }

        newest(candidates).ok_or_else(|| {
            Error::ResolutionFailure(format!(
                "{} requires {}, which doesn't match any versions",
                required_by, dependency
            ))
        })
    }

    fn markers_hold(&self, dependency: &Dependency, extras: &[String]) -> Result<bool> {
        let (Some(markers), Some(env)) = (&dependency.markers, &self.markers) else {
            return Ok(true);
        };
        let tree: MarkerTree = markers.parse()?;
        Ok(tree.evaluate(&env.with_extras(extras)))
    }

    fn locked_version(&self, name: &str) -> Option<Version> {
        self.locked
            .iter()
            .find(|p| canonicalize_name(&p.name) == name)
            .and_then(|p| Version::parse(&p.version).ok())
    }
}

/// Newest release, preferring final releases over pre-releases
fn newest(candidates: Vec<PackageRecord>) -> Option<PackageRecord> {
    let has_final = candidates.iter().any(|c| !c.version().is_prerelease());
    candidates
        .into_iter()
        .filter(|c| !has_final || !c.version().is_prerelease())
        .max_by(|a, b| a.version().cmp(b.version()))
}
