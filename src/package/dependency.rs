// src/package/dependency.rs

//! Declared requirements on other packages

use super::{PackageRecord, canonicalize_name};
use crate::version::VersionConstraint;
use std::fmt;
use std::path::PathBuf;

/// Where a dependency is fetched from when it is not a plain index release
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencySource {
    /// A git repository, optionally pinned to a branch, tag or revision
    Git { url: String, reference: Option<String> },
    /// A direct archive URL
    Url(String),
    /// A local directory or archive
    Path(PathBuf),
}

impl DependencySource {
    /// Short name of the source type
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Git { .. } => "git",
            Self::Url(_) => "url",
            Self::Path(_) => "path",
        }
    }
}

impl fmt::Display for DependencySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Git { url, reference: Some(r) } => write!(f, "git+{}@{}", url, r),
            Self::Git { url, reference: None } => write!(f, "git+{}", url),
            Self::Url(url) => write!(f, "{}", url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A requirement on another package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    name: String,
    pretty_name: String,
    pub constraint: VersionConstraint,
    pub extras: Vec<String>,
    pub source: Option<DependencySource>,
    /// Environment markers, kept verbatim
    pub markers: Option<String>,
    pub optional: bool,
}

impl Dependency {
    pub fn new(name: &str, constraint: VersionConstraint) -> Self {
        Self {
            name: canonicalize_name(name),
            pretty_name: name.trim().to_string(),
            constraint,
            extras: Vec::new(),
            source: None,
            markers: None,
            optional: false,
        }
    }

    /// Canonical name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pretty_name(&self) -> &str {
        &self.pretty_name
    }

    /// Builder: set extras
    pub fn with_extras(mut self, extras: Vec<String>) -> Self {
        self.extras = extras;
        self
    }

    /// Builder: set source
    pub fn with_source(mut self, source: DependencySource) -> Self {
        self.source = Some(source);
        self
    }

    /// Builder: set environment markers
    pub fn with_markers(mut self, markers: &str) -> Self {
        self.markers = Some(markers.to_string());
        self
    }

    /// Whether a package fulfils this requirement
    pub fn is_satisfied_by(&self, package: &PackageRecord) -> bool {
        package.name() == self.name && self.constraint.satisfies(package.version())
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pretty_name)?;
        if !self.extras.is_empty() {
            write!(f, "[{}]", self.extras.join(","))?;
        }
        match &self.source {
            Some(source) => write!(f, " @ {}", source)?,
            None => write!(f, " ({})", self.constraint)?,
        }
        if let Some(markers) = &self.markers {
            write!(f, "; {}", markers)?;
        }
        Ok(())
    }
}
