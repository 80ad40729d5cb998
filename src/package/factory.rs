// src/package/factory.rs

//! Turns a package name plus loose attributes into a [`Dependency`]

use super::{Dependency, DependencySource};
use crate::error::{Error, Result};
use crate::version::VersionConstraint;
use std::path::PathBuf;

/// Installation attributes that accompany a requirement name
///
/// Everything a user can say about a plugin except its name: the version
/// constraint, requested extras, an alternative source, and environment markers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementAttributes {
    pub version: Option<String>,
    pub extras: Vec<String>,
    pub git: Option<String>,
    /// Branch, tag or revision for `git` sources
    pub reference: Option<String>,
    pub url: Option<String>,
    pub path: Option<PathBuf>,
    pub markers: Option<String>,
}

/// Builds dependencies from a name and its attributes
pub trait DependencyFactory {
    fn create_dependency(
        &self,
        name: &str,
        attributes: &RequirementAttributes,
    ) -> Result<Dependency>;
}

/// Default factory
#[derive(Debug, Clone, Copy, Default)]
pub struct Factory;

impl DependencyFactory for Factory {
    fn create_dependency(
        &self,
        name: &str,
        attributes: &RequirementAttributes,
    ) -> Result<Dependency> {
        let constraint = match attributes.version.as_deref() {
            Some(raw) => VersionConstraint::parse(raw)?,
            None => VersionConstraint::Any,
        };

        let source = match (&attributes.git, &attributes.url, &attributes.path) {
            (Some(git), None, None) => Some(DependencySource::Git {
                url: git.clone(),
                reference: attributes.reference.clone(),
            }),
            (None, Some(url), None) => Some(DependencySource::Url(url.clone())),
            (None, None, Some(path)) => Some(DependencySource::Path(path.clone())),
            (None, None, None) => None,
            _ => {
                return Err(Error::InvalidRequirementSyntax {
                    input: name.to_string(),
                    reason: "only one of git, url or path may be given".to_string(),
                });
            }
        };

        let mut dependency =
            Dependency::new(name, constraint).with_extras(attributes.extras.clone());
        if let Some(source) = source {
            dependency = dependency.with_source(source);
        }
        if let Some(markers) = &attributes.markers {
            dependency = dependency.with_markers(markers);
        }

        Ok(dependency)
    }
}
