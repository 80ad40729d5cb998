// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use plugin_installer::{
    EngineContext, EngineFactory, Environment, EnvironmentReader, InstallationEngine,
    PackageRecord, Result,
};
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

/// Host v1.0 depending on a>=1.0, with a 1.2 and the bootstrap packages installed
pub const HOST_ENVIRONMENT: &str = r#"{
    "runtime_version": "3.11.4",
    "packages": [
        { "name": "pip", "version": "23.1" },
        { "name": "poetry", "version": "1.0", "requires": ["a (>=1.0)"] },
        { "name": "a", "version": "1.2" },
        { "name": "setuptools", "version": "67.0" },
        { "name": "wheel", "version": "0.40" }
    ]
}"#;

/// Same environment without the host package
pub const HOSTLESS_ENVIRONMENT: &str = r#"{
    "runtime_version": "3.11.4",
    "packages": [
        { "name": "a", "version": "1.2" }
    ]
}"#;

/// Releases available for installation
pub const INDEX: &str = r#"{
    "packages": [
        { "name": "a", "version": "1.2" },
        { "name": "a", "version": "1.5" },
        { "name": "b", "version": "1.0" },
        { "name": "b", "version": "2.0", "requires": ["c (^1.0)"] },
        { "name": "b", "version": "3.0", "requires": ["a (>=2.0)"] },
        { "name": "c", "version": "1.1" },
        { "name": "c", "version": "2.0" }
    ]
}"#;

/// Scratch directory with an environment manifest and a data directory
pub struct Workspace {
    pub dir: TempDir,
    pub manifest: PathBuf,
    pub data_dir: PathBuf,
}

impl Workspace {
    pub fn new(manifest_json: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("environment.json");
        fs::write(&manifest, manifest_json).unwrap();
        let data_dir = dir.path().join("data");
        Self {
            dir,
            manifest,
            data_dir,
        }
    }

    pub fn write_index(&self, index_json: &str) -> PathBuf {
        let path = self.dir.path().join("index.json");
        fs::write(&path, index_json).unwrap();
        path
    }

    pub fn lock_path(&self) -> PathBuf {
        self.data_dir.join("poetry.lock")
    }

    pub fn environment(&self) -> Environment {
        Environment::open(&self.manifest).unwrap()
    }

    pub fn manifest_contents(&self) -> String {
        read(&self.manifest)
    }
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

/// What a recording engine saw
#[derive(Debug, Default)]
pub struct EngineRecord {
    pub calls: Vec<String>,
    pub root_dependencies: Vec<String>,
    pub repository: Vec<String>,
    pub runtime_versions: String,
}

/// Engine that records its configuration and returns a fixed status
pub struct RecordingEngine {
    record: Rc<RefCell<EngineRecord>>,
    status: i32,
}

impl RecordingEngine {
    fn call(&self, call: String) {
        self.record.borrow_mut().calls.push(call);
    }
}

impl InstallationEngine for RecordingEngine {
    fn dry_run(&mut self, dry_run: bool) {
        self.call(format!("dry_run({})", dry_run));
    }

    fn whitelist(&mut self, names: &[String]) {
        self.call(format!("whitelist({})", names.join(",")));
    }

    fn update(&mut self, update: bool) {
        self.call(format!("update({})", update));
    }

    fn remove_untracked(&mut self, remove_untracked: bool) {
        self.call(format!("remove_untracked({})", remove_untracked));
    }

    fn run(&mut self) -> i32 {
        self.call("run".to_string());
        self.status
    }
}

/// Factory handing out [`RecordingEngine`]s and counting constructions
#[derive(Default)]
pub struct RecordingEngines {
    pub record: Rc<RefCell<EngineRecord>>,
    pub created: Cell<usize>,
    pub status: i32,
}

impl RecordingEngines {
    pub fn with_status(status: i32) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.record.borrow().calls.clone()
    }
}

impl EngineFactory for RecordingEngines {
    fn create<'a>(&self, ctx: EngineContext<'a>) -> Box<dyn InstallationEngine + 'a> {
        self.created.set(self.created.get() + 1);
        {
            let mut record = self.record.borrow_mut();
            record.root_dependencies =
                ctx.root.dependencies().iter().map(|d| d.to_string()).collect();
            record.repository = ctx
                .repository
                .packages()
                .iter()
                .map(|p| format!("{}=={}", p.name(), p.version()))
                .collect();
            record.runtime_versions = ctx.root.runtime_versions().to_string();
        }
        Box::new(RecordingEngine {
            record: Rc::clone(&self.record),
            status: self.status,
        })
    }
}

/// Reader wrapper counting snapshots
pub struct CountingReader<R> {
    pub inner: R,
    pub snapshots: Cell<usize>,
}

impl<R> CountingReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            snapshots: Cell::new(0),
        }
    }
}

impl<R: EnvironmentReader> EnvironmentReader for CountingReader<R> {
    fn snapshot(&self, env: &Environment, with_dependencies: bool) -> Result<Vec<PackageRecord>> {
        self.snapshots.set(self.snapshots.get() + 1);
        self.inner.snapshot(env, with_dependencies)
    }
}
