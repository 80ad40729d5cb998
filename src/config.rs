// src/config.rs

//! Installer configuration
//!
//! Process-wide settings (the `POETRY_HOME` override, platform directories) are
//! resolved once by the binary and passed in as an [`InstallerConfig`]; nothing
//! below the command layer reads the process environment.

use crate::error::{Error, Result};
use crate::lockfile::LOCKFILE_NAME;
use crate::project::DEFAULT_HOST_PACKAGE;
use std::path::{Path, PathBuf};

/// Environment variable overriding the home/data directory
pub const HOME_ENV_VAR: &str = "POETRY_HOME";

/// Directory under the platform data directory used when no override is set
pub const DATA_DIR_NAME: &str = "pypoetry";

/// Settings for one plugin installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerConfig {
    /// Directory holding the lock file
    pub data_dir: PathBuf,
    /// Name of the host tool's own package
    pub host_package: String,
    /// Plan only; do not change the environment or lock file
    pub dry_run: bool,
}

impl InstallerConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            host_package: DEFAULT_HOST_PACKAGE.to_string(),
            dry_run: false,
        }
    }

    /// Resolve the data directory from an optional override
    ///
    /// `home_override` is the value of [`HOME_ENV_VAR`]; empty counts as unset.
    pub fn resolve(home_override: Option<&str>) -> Result<Self> {
        match home_override.filter(|v| !v.is_empty()) {
            Some(home) => Ok(Self::new(home)),
            None => default_data_dir().map(Self::new).ok_or_else(|| {
                Error::Environment(format!(
                    "cannot determine a data directory; set {}",
                    HOME_ENV_VAR
                ))
            }),
        }
    }

    /// Builder: set the host package name
    pub fn with_host_package(mut self, name: &str) -> Self {
        self.host_package = name.to_string();
        self
    }

    /// Builder: set dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn lock_path(&self) -> PathBuf {
        self.data_dir.join(LOCKFILE_NAME)
    }
}

/// Platform data directory for the tool (`~/.local/share/pypoetry` on Linux)
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(DATA_DIR_NAME))
}

/// Installation home: where the tool keeps its scripts, libraries and plugins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeLayout {
    home: PathBuf,
}

impl HomeLayout {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// `home_override` wins; otherwise `~/.poetry`
    pub fn resolve(home_override: Option<&str>) -> Result<Self> {
        if let Some(home) = home_override.filter(|v| !v.is_empty()) {
            return Ok(Self::new(expand_home(home)));
        }
        dirs::home_dir()
            .map(|h| Self::new(h.join(".poetry")))
            .ok_or_else(|| Error::Environment("cannot determine the home directory".to_string()))
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn bin(&self) -> PathBuf {
        self.home.join("bin")
    }

    pub fn lib(&self) -> PathBuf {
        self.home.join("lib")
    }

    pub fn plugins(&self) -> PathBuf {
        self.home.join("plugins")
    }
}

/// Expand a leading `~/`
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let config = InstallerConfig::resolve(Some("/opt/poetry")).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/opt/poetry"));
        assert_eq!(config.lock_path(), PathBuf::from("/opt/poetry/poetry.lock"));
        assert_eq!(config.host_package, "poetry");
        assert!(!config.dry_run);
    }

    #[test]
    fn test_empty_override_is_unset() {
        if let Some(default) = default_data_dir() {
            let config = InstallerConfig::resolve(Some("")).unwrap();
            assert_eq!(config.data_dir, default);
        }
    }

    #[test]
    fn test_builders() {
        let config = InstallerConfig::new("/tmp/data")
            .with_host_package("mytool")
            .with_dry_run(true);
        assert_eq!(config.host_package, "mytool");
        assert!(config.dry_run);
    }

    #[test]
    fn test_home_layout() {
        let layout = HomeLayout::resolve(Some("/opt/poetry")).unwrap();
        assert_eq!(layout.home(), Path::new("/opt/poetry"));
        assert_eq!(layout.bin(), PathBuf::from("/opt/poetry/bin"));
        assert_eq!(layout.lib(), PathBuf::from("/opt/poetry/lib"));
        assert_eq!(layout.plugins(), PathBuf::from("/opt/poetry/plugins"));
    }

    #[test]
    fn test_expand_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/.poetry"), home.join(".poetry"));
        }
        assert_eq!(expand_home("/abs"), PathBuf::from("/abs"));
    }
}
