// src/requirement.rs

//! Plugin requirement parsing
//!
//! Turns the identifiers a user types (`poetry-plugin-export`,
//! `demo==1.0`, `demo@^2.1`, `demo[extra] (>=1.0)`, git URLs, archive URLs,
//! local paths) into a name plus [`RequirementAttributes`]. Input order is
//! preserved so the resulting whitelist and log output are reproducible.

use crate::error::{Error, Result};
use crate::package::RequirementAttributes;
use crate::version::VersionConstraint;
use std::path::{Path, PathBuf};

/// Archive suffixes stripped when deriving a name from a file name
const ARCHIVE_SUFFIXES: &[&str] = &[".tar.gz", ".tar.bz2", ".tar.xz", ".tgz", ".zip", ".whl"];

/// A parsed plugin identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginRequirement {
    pub name: String,
    pub attributes: RequirementAttributes,
}

impl PluginRequirement {
    /// Split into the primary key and the remaining attributes
    pub fn into_parts(self) -> (String, RequirementAttributes) {
        (self.name, self.attributes)
    }
}

/// Parse every identifier, failing on the first invalid one
pub fn parse_plugin_requirements<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<PluginRequirement>> {
    inputs.iter().map(|s| parse_requirement(s.as_ref())).collect()
}

/// Parse a single requirement identifier
pub fn parse_requirement(input: &str) -> Result<PluginRequirement> {
    let fail = |reason: &str| Error::InvalidRequirementSyntax {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(fail("empty requirement"));
    }

    let (body, markers) = match trimmed.split_once(';') {
        Some((body, markers)) => {
            let markers = markers.trim();
            if markers.is_empty() {
                return Err(fail("empty environment marker"));
            }
            (body.trim(), Some(markers.to_string()))
        }
        None => (trimmed, None),
    };

    let mut requirement = if let Some(url) = body.strip_prefix("git+") {
        parse_git(url).ok_or_else(|| fail("cannot derive a package name from git URL"))?
    } else if body.starts_with("http://") || body.starts_with("https://") {
        parse_url(body).ok_or_else(|| fail("cannot derive a package name from URL"))?
    } else if is_path_like(body) {
        parse_path(body).ok_or_else(|| fail("cannot derive a package name from path"))?
    } else {
        parse_named(body).map_err(|reason| fail(&reason))?
    };

    if !is_valid_name(&requirement.name) {
        return Err(fail("invalid package name"));
    }

    requirement.attributes.markers = markers;
    Ok(requirement)
}

fn is_valid_name(name: &str) -> bool {
    let first_last_ok = |c: Option<char>| c.is_some_and(|c| c.is_ascii_alphanumeric());
    first_last_ok(name.chars().next())
        && first_last_ok(name.chars().last())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

fn is_path_like(s: &str) -> bool {
    s.starts_with("./") || s.starts_with("../") || s.starts_with('/') || s.starts_with("~/")
}

/// `name[extras] constraint`, `name@constraint`, `name (constraint)`
fn parse_named(body: &str) -> std::result::Result<PluginRequirement, String> {
    let name_end = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        .unwrap_or(body.len());
    let (name, mut rest) = body.split_at(name_end);
    if name.is_empty() {
        return Err("missing package name".to_string());
    }

    let mut attributes = RequirementAttributes::default();

    if let Some(after) = rest.strip_prefix('[') {
        let close = after
            .find(']')
            .ok_or_else(|| "unterminated '['".to_string())?;
        let inner = after[..close].trim();
        rest = &after[close + 1..];

        // `name[>=1.0]` carries a constraint rather than extras
        if inner.starts_with(is_constraint_start) {
            attributes.version = Some(inner.to_string());
        } else {
            attributes.extras = parse_extras(inner)?;
        }
    }

    let rest = rest.trim();
    let constraint = if rest.is_empty() {
        None
    } else if let Some(at) = rest.strip_prefix('@') {
        match at.trim() {
            "" => return Err("missing version after '@'".to_string()),
            "latest" => None,
            version => Some(version.to_string()),
        }
    } else if let Some(paren) = rest.strip_prefix('(') {
        let inner = paren
            .strip_suffix(')')
            .ok_or_else(|| "unterminated '('".to_string())?;
        Some(inner.trim().to_string())
    } else if rest.starts_with(is_constraint_start) {
        Some(rest.to_string())
    } else {
        return Err(format!("unexpected '{}' after package name", rest));
    };

    if let Some(constraint) = constraint {
        if attributes.version.is_some() {
            return Err("version constraint given twice".to_string());
        }
        attributes.version = Some(constraint);
    }

    if let Some(version) = &attributes.version {
        VersionConstraint::parse(version).map_err(|e| e.to_string())?;
    }

    Ok(PluginRequirement {
        name: name.to_string(),
        attributes,
    })
}

fn is_constraint_start(c: char) -> bool {
    matches!(c, '=' | '<' | '>' | '!' | '~' | '^' | '*') || c.is_ascii_digit()
}

fn parse_extras(inner: &str) -> std::result::Result<Vec<String>, String> {
    let extras: Vec<String> = inner
        .split(',')
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect();
    if extras.is_empty() {
        return Err("empty extras list".to_string());
    }
    if let Some(bad) = extras.iter().find(|e| !is_valid_name(e)) {
        return Err(format!("invalid extra '{}'", bad));
    }
    Ok(extras)
}

/// `https://host/owner/repo.git@ref`
fn parse_git(url: &str) -> Option<PluginRequirement> {
    let path_start = url.find("://").map_or(0, |i| i + 3);
    let first_slash = url[path_start..].find('/').map(|i| i + path_start)?;

    let (repo_url, reference) = match url[first_slash..].rfind('@') {
        Some(at) => {
            let at = first_slash + at;
            (&url[..at], Some(url[at + 1..].to_string()))
        }
        None => (url, None),
    };

    let last = repo_url.trim_end_matches('/').rsplit('/').next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);

    Some(PluginRequirement {
        name: name.to_string(),
        attributes: RequirementAttributes {
            git: Some(repo_url.to_string()),
            reference: reference.filter(|r| !r.is_empty()),
            ..Default::default()
        },
    })
}

/// `https://host/files/name-1.0.tar.gz`
fn parse_url(url: &str) -> Option<PluginRequirement> {
    let without_fragment = url.split(['#', '?']).next()?;
    let file_name = without_fragment.trim_end_matches('/').rsplit('/').next()?;
    let name = name_from_file(file_name)?;

    Some(PluginRequirement {
        name,
        attributes: RequirementAttributes {
            url: Some(url.to_string()),
            ..Default::default()
        },
    })
}

fn parse_path(path: &str) -> Option<PluginRequirement> {
    let path_buf = PathBuf::from(path);
    let file_name = Path::new(path.trim_end_matches('/')).file_name()?.to_str()?;
    let name = name_from_file(file_name)?;

    Some(PluginRequirement {
        name,
        attributes: RequirementAttributes {
            path: Some(path_buf),
            ..Default::default()
        },
    })
}

/// Name portion of a distribution file name (`demo_plugin-1.0-py3-none-any.whl` → `demo_plugin`)
fn name_from_file(file_name: &str) -> Option<String> {
    let stem = ARCHIVE_SUFFIXES
        .iter()
        .find_map(|suffix| file_name.strip_suffix(suffix))
        .unwrap_or(file_name);

    let mut parts = Vec::new();
    for part in stem.split('-') {
        if part.starts_with(|c: char| c.is_ascii_digit()) && !parts.is_empty() {
            break;
        }
        parts.push(part);
    }

    let name = parts.join("-");
    (!name.is_empty()).then_some(name)
}
