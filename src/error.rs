// src/error.rs

//! Error types for plugin installation

use crate::lockfile::LockfileError;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A plugin identifier could not be split into name and constraint
    #[error("Invalid requirement '{input}': {reason}")]
    InvalidRequirementSyntax { input: String, reason: String },

    /// The environment does not contain the host tool's own package
    #[error("Package '{0}' is not installed in the target environment")]
    HostPackageNotFound(String),

    /// No compatible set of versions honors the requested changes
    #[error("Dependency resolution failed: {0}")]
    ResolutionFailure(String),

    /// Applying an operation to the environment failed
    #[error("Installation failed: {0}")]
    ExecutionFailure(String),

    #[error("Invalid version '{input}': {reason}")]
    InvalidVersion { input: String, reason: String },

    #[error("Invalid version constraint '{input}': {reason}")]
    InvalidConstraint { input: String, reason: String },

    #[error("Invalid environment marker '{input}': {reason}")]
    InvalidMarker { input: String, reason: String },

    /// The environment manifest is unreadable or malformed
    #[error("Environment error: {0}")]
    Environment(String),

    #[error("Lock file error: {0}")]
    Lockfile(#[from] LockfileError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Process exit status used when this error ends a command
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ExecutionFailure(_) => 2,
            _ => 1,
        }
    }
}
