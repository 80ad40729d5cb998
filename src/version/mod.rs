// src/version/mod.rs

//! Version handling and constraint satisfaction for package dependencies
//!
//! Versions follow the shape published by Python package indexes:
//! `[epoch!]release[{a|b|rc}N][.postN][.devN]`, where `release` is any number of
//! dot-separated integers and `-N` is shorthand for `.postN`. Constraints accept
//! the usual comparison operators plus caret (`^`), tilde (`~`),
//! compatible-release (`~=`) and wildcard (`==1.2.*`, `!=1.2.*`) forms, combined
//! with `,` (and) or `||` (or).

use crate::error::{Error, Result};
use semver::Version as SemVersion;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Pre-release phase, ordered alpha < beta < release candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreRelease {
    Alpha(u64),
    Beta(u64),
    Candidate(u64),
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alpha(n) => write!(f, "a{}", n),
            Self::Beta(n) => write!(f, "b{}", n),
            Self::Candidate(n) => write!(f, "rc{}", n),
        }
    }
}

/// A parsed package version
#[derive(Debug, Clone)]
pub struct Version {
    pub epoch: u64,
    pub release: Vec<u64>,
    pub pre: Option<PreRelease>,
    pub post: Option<u64>,
    pub dev: Option<u64>,
}

impl Version {
    /// Build a plain release version from its numeric parts
    pub fn from_parts(release: &[u64]) -> Self {
        Self {
            epoch: 0,
            release: release.to_vec(),
            pre: None,
            post: None,
            dev: None,
        }
    }

    /// Parse a version string
    ///
    /// Examples:
    /// - "1.2.3" → release=[1, 2, 3]
    /// - "2!1.0" → epoch=2, release=[1, 0]
    /// - "1.0rc1" → release=[1, 0], pre=rc1
    /// - "1.0.post2.dev1" → release=[1, 0], post=2, dev=1
    pub fn parse(s: &str) -> Result<Self> {
        let input = s.trim();
        let invalid = |reason: &str| Error::InvalidVersion {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        // Fast path: plain semver strings like "1.2.3"
        if let Ok(v) = SemVersion::parse(input)
            && v.pre.is_empty()
        {
            return Ok(Self::from_parts(&[v.major, v.minor, v.patch]));
        }

        let lowered = input.to_ascii_lowercase();
        let lowered = lowered.strip_prefix('v').unwrap_or(&lowered);
        // Local version labels ("+cpu") do not take part in ordering
        let lowered = lowered.split('+').next().unwrap_or_default();

        let (epoch, rest) = match lowered.split_once('!') {
            Some((e, r)) => {
                let epoch = e
                    .parse::<u64>()
                    .map_err(|_| invalid("epoch is not a number"))?;
                (epoch, r)
            }
            None => (0, lowered),
        };

        let release_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (release_str, mut suffix) = rest.split_at(release_end);
        let release_str = release_str.trim_end_matches('.');
        if release_str.is_empty() {
            return Err(invalid("missing release number"));
        }

        let release = release_str
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|_| invalid("release segment is empty or out of range"))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut version = Self {
            epoch,
            release,
            pre: None,
            post: None,
            dev: None,
        };

        while !suffix.is_empty() {
            // Implicit post-release: "1.0-1"
            if let Some(rest) = suffix.strip_prefix('-')
                && rest.starts_with(|c: char| c.is_ascii_digit())
            {
                let (_, number, rest) = split_tag(rest).map_err(|_| invalid(NUMBER_RANGE))?;
                version.post = Some(number);
                suffix = rest;
                continue;
            }

            suffix = suffix.trim_start_matches(['.', '-', '_']);
            if suffix.is_empty() {
                break;
            }
            let (tag, number, rest) = split_tag(suffix).map_err(|_| invalid(NUMBER_RANGE))?;
            match tag {
                "a" | "alpha" => version.pre = Some(PreRelease::Alpha(number)),
                "b" | "beta" => version.pre = Some(PreRelease::Beta(number)),
                "rc" | "c" | "pre" | "preview" => version.pre = Some(PreRelease::Candidate(number)),
                "post" | "rev" | "r" => version.post = Some(number),
                "dev" => version.dev = Some(number),
                _ => return Err(invalid("unknown version suffix")),
            }
            suffix = rest;
        }

        Ok(version)
    }

    /// Release segment at `index`, zero when absent
    fn segment(&self, index: usize) -> u64 {
        self.release.get(index).copied().unwrap_or(0)
    }

    /// Release segments with trailing zeros removed, used for equality
    fn trimmed_release(&self) -> &[u64] {
        let end = self
            .release
            .iter()
            .rposition(|&n| n != 0)
            .map_or(0, |i| i + 1);
        &self.release[..end]
    }

    /// Whether the release starts with `prefix`'s segments (`1.2.7` has prefix `1.2`)
    fn has_prefix(&self, prefix: &Version) -> bool {
        self.epoch == prefix.epoch
            && (0..prefix.release.len()).all(|i| self.segment(i) == prefix.segment(i))
    }

    /// Whether this version is a pre-release or development build
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some() || self.dev.is_some()
    }

    /// Convert to a semver::Version using the first three release segments
    pub fn to_semver(&self) -> SemVersion {
        SemVersion::new(self.segment(0), self.segment(1), self.segment(2))
    }

    /// Compare two versions
    pub fn compare(&self, other: &Version) -> Ordering {
        match self.epoch.cmp(&other.epoch) {
            Ordering::Equal => {}
            ord => return ord,
        }

        let len = self.release.len().max(other.release.len());
        for i in 0..len {
            match self.segment(i).cmp(&other.segment(i)) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }

        // A dev build of a final release sorts before its pre-releases
        let pre_key = |v: &Version| match (v.pre, v.post, v.dev) {
            (None, None, Some(_)) => (0u8, None),
            (Some(pre), _, _) => (1, Some(pre)),
            _ => (2, None),
        };
        match pre_key(self).cmp(&pre_key(other)) {
            Ordering::Equal => {}
            ord => return ord,
        }

        match self.post.cmp(&other.post) {
            Ordering::Equal => {}
            ord => return ord,
        }

        // Some(dev) sorts before None
        match (self.dev, other.dev) {
            (None, None) => Ordering::Equal,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(a), Some(b)) => a.cmp(&b),
        }
    }

    /// Next version that breaks caret compatibility (`^1.2.3` → 2.0.0)
    fn caret_upper(&self) -> Version {
        let digits = self.release.len().max(1);
        let first_nonzero = (0..digits).find(|&i| self.segment(i) != 0);
        let index = match first_nonzero {
            Some(i) => i,
            None => digits - 1,
        };
        bump(self, index)
    }

    /// Next version that breaks tilde compatibility (`~1.2.3` → 1.3.0)
    fn tilde_upper(&self) -> Version {
        let index = if self.release.len() > 1 { 1 } else { 0 };
        bump(self, index)
    }

    /// Next version that breaks `~=` compatibility (`~=1.4.2` → 1.5)
    fn compatible_upper(&self) -> Version {
        let index = self.release.len().saturating_sub(2);
        bump(self, index)
    }
}

const NUMBER_RANGE: &str = "suffix number out of range";

/// Split "rc1.dev2" into ("rc", 1, ".dev2"); a missing number is zero
fn split_tag(s: &str) -> std::result::Result<(&str, u64, &str), std::num::ParseIntError> {
    let tag_end = s
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(s.len());
    let (tag, rest) = s.split_at(tag_end);
    let rest = rest.trim_start_matches(['.', '-', '_']);
    let num_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (num, rest) = rest.split_at(num_end);
    let number = if num.is_empty() { 0 } else { num.parse()? };
    Ok((tag, number, rest))
}

fn bump(version: &Version, index: usize) -> Version {
    let mut release: Vec<u64> = (0..=index).map(|i| version.segment(i)).collect();
    release[index] += 1;
    Version {
        epoch: version.epoch,
        release,
        pre: None,
        post: None,
        dev: None,
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch > 0 {
            write!(f, "{}!", self.epoch)?;
        }
        let release: Vec<String> = self.release.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", release.join("."))?;
        if let Some(pre) = self.pre {
            write!(f, "{}", pre)?;
        }
        if let Some(post) = self.post {
            write!(f, ".post{}", post)?;
        }
        if let Some(dev) = self.dev {
            write!(f, ".dev{}", dev)?;
        }
        Ok(())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.epoch.hash(state);
        self.trimmed_release().hash(state);
        self.pre.hash(state);
        self.post.hash(state);
        self.dev.hash(state);
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Version constraint operators
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VersionConstraint {
    /// Any version is acceptable
    #[default]
    Any,
    /// Exact version match
    Exact(Version),
    /// Prefix match (`==1.2.*`)
    Wildcard(Version),
    GreaterThan(Version),
    GreaterOrEqual(Version),
    LessThan(Version),
    LessOrEqual(Version),
    NotEqual(Version),
    /// Prefix exclusion (`!=1.2.*`)
    NotWildcard(Version),
    /// `^1.2.3`: same left-most non-zero segment
    Caret(Version),
    /// `~1.2.3`: same major and minor
    Tilde(Version),
    /// `~=1.4.2`: compatible release
    Compatible(Version),
    /// Every constraint must be satisfied (">=1.0,<2.0")
    And(Vec<VersionConstraint>),
    /// At least one constraint must be satisfied ("^1.0 || ^2.0")
    Or(Vec<VersionConstraint>),
}

impl VersionConstraint {
    /// Parse a version constraint string
    ///
    /// Examples:
    /// - ">= 1.2.3" → GreaterOrEqual(1.2.3)
    /// - "^1.2" → Caret(1.2)
    /// - ">=1.0,<2.0" → And([>=1.0, <2.0])
    /// - "1.5" → Exact(1.5)
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "*" {
            return Ok(VersionConstraint::Any);
        }

        if s.contains("||") {
            let parts = s
                .split("||")
                .map(Self::parse)
                .collect::<Result<Vec<_>>>()?;
            return Ok(VersionConstraint::Or(parts));
        }

        if s.contains(',') {
            let parts = s
                .split(',')
                .filter(|p| !p.trim().is_empty())
                .map(Self::parse)
                .collect::<Result<Vec<_>>>()?;
            return Ok(match parts.len() {
                1 => parts.into_iter().next().unwrap_or_default(),
                _ => VersionConstraint::And(parts),
            });
        }

        let version = |rest: &str| {
            Version::parse(rest.trim()).map_err(|e| Error::InvalidConstraint {
                input: s.to_string(),
                reason: e.to_string(),
            })
        };

        if let Some(rest) = s.strip_prefix("~=") {
            Ok(VersionConstraint::Compatible(version(rest)?))
        } else if let Some(rest) = s.strip_prefix("===") {
            Ok(VersionConstraint::Exact(version(rest)?))
        } else if let Some(rest) = s.strip_prefix("==") {
            let rest = rest.trim();
            match rest.strip_suffix(".*") {
                Some(prefix) => Ok(VersionConstraint::Wildcard(version(prefix)?)),
                None => Ok(VersionConstraint::Exact(version(rest)?)),
            }
        } else if let Some(rest) = s.strip_prefix(">=") {
            Ok(VersionConstraint::GreaterOrEqual(version(rest)?))
        } else if let Some(rest) = s.strip_prefix("<=") {
            Ok(VersionConstraint::LessOrEqual(version(rest)?))
        } else if let Some(rest) = s.strip_prefix("!=") {
            let rest = rest.trim();
            match rest.strip_suffix(".*") {
                Some(prefix) => Ok(VersionConstraint::NotWildcard(version(prefix)?)),
                None => Ok(VersionConstraint::NotEqual(version(rest)?)),
            }
        } else if let Some(rest) = s.strip_prefix('>') {
            Ok(VersionConstraint::GreaterThan(version(rest)?))
        } else if let Some(rest) = s.strip_prefix('<') {
            Ok(VersionConstraint::LessThan(version(rest)?))
        } else if let Some(rest) = s.strip_prefix('^') {
            Ok(VersionConstraint::Caret(version(rest)?))
        } else if let Some(rest) = s.strip_prefix('~') {
            Ok(VersionConstraint::Tilde(version(rest)?))
        } else if let Some(rest) = s.strip_prefix('=') {
            Ok(VersionConstraint::Exact(version(rest)?))
        } else if let Some(prefix) = s.strip_suffix(".*") {
            Ok(VersionConstraint::Wildcard(version(prefix)?))
        } else {
            // No operator means exact match
            Ok(VersionConstraint::Exact(version(s)?))
        }
    }

    /// Check if a version satisfies this constraint
    pub fn satisfies(&self, version: &Version) -> bool {
        match self {
            VersionConstraint::Any => true,
            VersionConstraint::Exact(v) => version == v,
            VersionConstraint::Wildcard(prefix) => version.has_prefix(prefix),
            VersionConstraint::NotWildcard(prefix) => !version.has_prefix(prefix),
            VersionConstraint::GreaterThan(v) => version > v,
            VersionConstraint::GreaterOrEqual(v) => version >= v,
            VersionConstraint::LessThan(v) => version < v,
            VersionConstraint::LessOrEqual(v) => version <= v,
            VersionConstraint::NotEqual(v) => version != v,
            VersionConstraint::Caret(v) => version >= v && *version < v.caret_upper(),
            VersionConstraint::Tilde(v) => version >= v && *version < v.tilde_upper(),
            VersionConstraint::Compatible(v) => version >= v && *version < v.compatible_upper(),
            VersionConstraint::And(parts) => parts.iter().all(|c| c.satisfies(version)),
            VersionConstraint::Or(parts) => parts.iter().any(|c| c.satisfies(version)),
        }
    }

    /// Whether this constraint accepts every version
    pub fn is_any(&self) -> bool {
        matches!(self, VersionConstraint::Any)
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionConstraint::Any => write!(f, "*"),
            VersionConstraint::Exact(v) => write!(f, "=={}", v),
            VersionConstraint::Wildcard(v) => write!(f, "=={}.*", v),
            VersionConstraint::GreaterThan(v) => write!(f, ">{}", v),
            VersionConstraint::GreaterOrEqual(v) => write!(f, ">={}", v),
            VersionConstraint::LessThan(v) => write!(f, "<{}", v),
            VersionConstraint::LessOrEqual(v) => write!(f, "<={}", v),
            VersionConstraint::NotEqual(v) => write!(f, "!={}", v),
            VersionConstraint::NotWildcard(v) => write!(f, "!={}.*", v),
            VersionConstraint::Caret(v) => write!(f, "^{}", v),
            VersionConstraint::Tilde(v) => write!(f, "~{}", v),
            VersionConstraint::Compatible(v) => write!(f, "~={}", v),
            VersionConstraint::And(parts) => {
                let parts: Vec<String> = parts.iter().map(|p| p.to_string()).collect();
                write!(f, "{}", parts.join(","))
            }
            VersionConstraint::Or(parts) => {
                let parts: Vec<String> = parts.iter().map(|p| p.to_string()).collect();
                write!(f, "{}", parts.join(" || "))
            }
        }
    }
}

/// Three-part version of the runtime that hosts the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeVersion(SemVersion);

impl RuntimeVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(SemVersion::new(major, minor, patch))
    }

    /// Parse "3.11.4", "3.11" or "3.11.4rc1"; missing parts default to zero
    pub fn parse(s: &str) -> Result<Self> {
        let version = Version::parse(s)?;
        Ok(Self(version.to_semver()))
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.0.major, self.0.minor, self.0.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_version_parse_simple() {
        let version = v("1.2.3");
        assert_eq!(version.epoch, 0);
        assert_eq!(version.release, vec![1, 2, 3]);
        assert_eq!(version.pre, None);
    }

    #[test]
    fn test_version_parse_with_epoch() {
        let version = v("2!1.0");
        assert_eq!(version.epoch, 2);
        assert_eq!(version.release, vec![1, 0]);
    }

    #[test]
    fn test_version_parse_suffixes() {
        let version = v("1.0rc1");
        assert_eq!(version.pre, Some(PreRelease::Candidate(1)));

        let version = v("1.0.post2.dev1");
        assert_eq!(version.post, Some(2));
        assert_eq!(version.dev, Some(1));
    }

    #[test]
    fn test_version_parse_implicit_post_release() {
        let version = v("1.0-1");
        assert_eq!(version.release, vec![1, 0]);
        assert_eq!(version.post, Some(1));
        assert_eq!(version, v("1.0.post1"));
        assert_eq!(v("1.0rc1-2").post, Some(2));
    }

    #[test]
    fn test_version_parse_rejects_out_of_range_numbers() {
        for input in [
            "1.0rc99999999999999999999",
            "1.0-99999999999999999999",
            "99999999999999999999",
        ] {
            assert!(
                matches!(Version::parse(input), Err(Error::InvalidVersion { .. })),
                "{} parsed",
                input
            );
        }
        assert_eq!(v("1.0.post").post, Some(0));
    }

    #[test]
    fn test_version_parse_rejects_garbage() {
        assert!(Version::parse("").is_err());
        assert!(Version::parse("abc").is_err());
        assert!(Version::parse("1.0foo").is_err());
    }

    #[test]
    fn test_version_equality_ignores_trailing_zeros() {
        assert_eq!(v("1.0"), v("1.0.0"));
        assert_ne!(v("1.0"), v("1.0.1"));
    }

    #[test]
    fn test_version_compare_epochs() {
        assert!(v("1!1.0.0") > v("2.0.0")); // Higher epoch wins even with lower version
    }

    #[test]
    fn test_version_compare_prereleases() {
        assert!(v("1.0a1") < v("1.0b1"));
        assert!(v("1.0b1") < v("1.0rc1"));
        assert!(v("1.0rc1") < v("1.0"));
        assert!(v("1.0") < v("1.0.post1"));
        assert!(v("1.0.dev1") < v("1.0a1"));
    }

    #[test]
    fn test_version_display() {
        assert_eq!(v("1.2.3").to_string(), "1.2.3");
        assert_eq!(v("2!1.0rc1.post3").to_string(), "2!1.0rc1.post3");
    }

    #[test]
    fn test_constraint_parse_exact() {
        let c = VersionConstraint::parse("==1.2.3").unwrap();
        assert!(c.satisfies(&v("1.2.3")));
        assert!(!c.satisfies(&v("1.2.4")));

        let bare = VersionConstraint::parse("1.2.3").unwrap();
        assert_eq!(bare, c);
    }

    #[test]
    fn test_constraint_greater_or_equal() {
        let c = VersionConstraint::parse(">= 1.2.0").unwrap();
        assert!(c.satisfies(&v("1.2.0")));
        assert!(c.satisfies(&v("1.3.0")));
        assert!(!c.satisfies(&v("1.1.0")));
    }

    #[test]
    fn test_constraint_and() {
        let c = VersionConstraint::parse(">=1.0,<2.0").unwrap();
        assert!(c.satisfies(&v("1.5")));
        assert!(!c.satisfies(&v("2.0")));
        assert!(!c.satisfies(&v("0.9")));
    }

    #[test]
    fn test_constraint_or() {
        let c = VersionConstraint::parse("^1.0 || ^3.0").unwrap();
        assert!(c.satisfies(&v("1.4")));
        assert!(!c.satisfies(&v("2.1")));
        assert!(c.satisfies(&v("3.0.1")));
    }

    #[test]
    fn test_constraint_caret() {
        let c = VersionConstraint::parse("^1.2.3").unwrap();
        assert!(c.satisfies(&v("1.9.0")));
        assert!(!c.satisfies(&v("2.0.0")));
        assert!(!c.satisfies(&v("1.2.2")));

        let zero = VersionConstraint::parse("^0.2.3").unwrap();
        assert!(zero.satisfies(&v("0.2.9")));
        assert!(!zero.satisfies(&v("0.3.0")));
    }

    #[test]
    fn test_constraint_tilde_and_compatible() {
        let tilde = VersionConstraint::parse("~1.2.3").unwrap();
        assert!(tilde.satisfies(&v("1.2.9")));
        assert!(!tilde.satisfies(&v("1.3.0")));

        let compatible = VersionConstraint::parse("~=1.4.2").unwrap();
        assert!(compatible.satisfies(&v("1.4.9")));
        assert!(!compatible.satisfies(&v("1.5")));

        let compatible = VersionConstraint::parse("~=1.4").unwrap();
        assert!(compatible.satisfies(&v("1.9")));
        assert!(!compatible.satisfies(&v("2.0")));
    }

    #[test]
    fn test_constraint_wildcard() {
        let c = VersionConstraint::parse("==1.2.*").unwrap();
        assert!(c.satisfies(&v("1.2.7")));
        assert!(!c.satisfies(&v("1.3.0")));
    }

    #[test]
    fn test_constraint_not_wildcard() {
        let c = VersionConstraint::parse("!=1.2.*").unwrap();
        assert!(!c.satisfies(&v("1.2.0")));
        assert!(!c.satisfies(&v("1.2.7")));
        assert!(c.satisfies(&v("1.3.0")));
        assert!(c.satisfies(&v("1.1")));
        assert_eq!(c.to_string(), "!=1.2.*");

        let combined = VersionConstraint::parse(">=1.0,!=1.2.*").unwrap();
        assert!(combined.satisfies(&v("1.3")));
        assert!(!combined.satisfies(&v("1.2.1")));
    }

    #[test]
    fn test_constraint_any() {
        let c = VersionConstraint::parse("*").unwrap();
        assert!(c.is_any());
        assert!(c.satisfies(&v("99.99.99")));
    }

    #[test]
    fn test_constraint_invalid() {
        assert!(matches!(
            VersionConstraint::parse(">=banana"),
            Err(Error::InvalidConstraint { .. })
        ));
    }

    #[test]
    fn test_constraint_display() {
        assert_eq!(VersionConstraint::parse(">= 1.2.0").unwrap().to_string(), ">=1.2.0");
        assert_eq!(
            VersionConstraint::parse(">=1.0, <2.0").unwrap().to_string(),
            ">=1.0,<2.0"
        );
    }

    #[test]
    fn test_runtime_version() {
        assert_eq!(RuntimeVersion::parse("3.11.4").unwrap().to_string(), "3.11.4");
        assert_eq!(RuntimeVersion::parse("3.12").unwrap().to_string(), "3.12.0");
        assert_eq!(RuntimeVersion::new(3, 8, 10).minor(), 8);
    }
}
