// src/installer/executor.rs

//! Applying planned operations to the environment

use super::operation::Operation;
use crate::environment::{Manifest, ManifestPackage};
use crate::error::{Error, Result};
use crate::output::Output;
use crate::package::canonicalize_name;
use crate::progress::ProgressTracker;
use std::path::PathBuf;
use tracing::{debug, info};

/// Performs operations against a target environment
pub trait Executor {
    /// Apply every operation or none of them
    fn execute(&mut self, operations: &[Operation]) -> Result<()>;
}

/// Applies operations to the environment's JSON manifest
///
/// All changes are made to an in-memory copy which is then written back in one
/// atomic rename, so a failure part way leaves the manifest untouched.
pub struct ManifestExecutor<'a> {
    manifest_path: PathBuf,
    progress: Box<dyn ProgressTracker + 'a>,
    output: &'a dyn Output,
}

impl<'a> ManifestExecutor<'a> {
    pub fn new(
        manifest_path: impl Into<PathBuf>,
        progress: Box<dyn ProgressTracker + 'a>,
        output: &'a dyn Output,
    ) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            progress,
            output,
        }
    }

    fn apply(&self, manifest: &mut Manifest, operation: &Operation) -> Result<()> {
        let name = operation.package().name();
        let position = manifest
            .packages
            .iter()
            .position(|entry| canonicalize_name(&entry.name) == name);

        match (operation, position) {
            (Operation::Install(package), None) => {
                manifest.packages.push(ManifestPackage::from_record(package));
            }
            (Operation::Install(package), Some(index))
            | (Operation::Update { to: package, .. }, Some(index)) => {
                manifest.packages[index] = ManifestPackage::from_record(package);
            }
            (Operation::Uninstall(_), Some(index)) => {
                manifest.packages.remove(index);
            }
            (Operation::Update { .. } | Operation::Uninstall(_), None) => {
                return Err(Error::ExecutionFailure(format!(
                    "{} is not installed in {}",
                    operation.package(),
                    self.manifest_path.display()
                )));
            }
        }
        Ok(())
    }
}

impl Executor for ManifestExecutor<'_> {
    fn execute(&mut self, operations: &[Operation]) -> Result<()> {
        let mut manifest = Manifest::from_file(&self.manifest_path)
            .map_err(|e| Error::ExecutionFailure(e.to_string()))?;

        self.progress.set_length(operations.len() as u64);
        for operation in operations {
            self.output.write_line(&format!("  - {}", operation));
            self.progress.set_message(&operation.to_string());
            if let Err(e) = self.apply(&mut manifest, operation) {
                self.progress.finish_with_error(&e.to_string());
                return Err(e);
            }
            self.progress.increment(1);
        }

        manifest.write_to_file(&self.manifest_path).map_err(|e| {
            self.progress.finish_with_error(&e.to_string());
            Error::ExecutionFailure(format!(
                "cannot write {}: {}",
                self.manifest_path.display(),
                e
            ))
        })?;

        self.progress
            .finish_with_message(&format!("Applied {} operations", operations.len()));
        info!(
            "Applied {} operations to {}",
            operations.len(),
            self.manifest_path.display()
        );
        Ok(())
    }
}

/// Records operations without touching anything
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    pub executed: Vec<Operation>,
}

impl Executor for RecordingExecutor {
    fn execute(&mut self, operations: &[Operation]) -> Result<()> {
        debug!("Recording {} operations", operations.len());
        self.executed.extend_from_slice(operations);
        Ok(())
    }
}
