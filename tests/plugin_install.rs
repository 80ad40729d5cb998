// tests/plugin_install.rs

//! End-to-end plugin installation tests against file-backed collaborators.

mod common;

use common::{
    CountingReader, HOST_ENVIRONMENT, HOSTLESS_ENVIRONMENT, INDEX, RecordingEngines, Workspace,
    read,
};
use plugin_installer::environment::Manifest;
use plugin_installer::output::BufferedOutput;
use plugin_installer::{
    Collaborators, DefaultEngineFactory, EngineFactory, Error, Factory, FileEnvironmentReader,
    FileIndex, InstallerConfig, Lockfile, PluginInstaller, Pool, Result, TomlLocker,
};
use std::fs;

/// Run an installation with the file-backed reader, index and locker
fn install(
    ws: &Workspace,
    engines: &dyn EngineFactory,
    output: &BufferedOutput,
    plugins: &[&str],
    dry_run: bool,
) -> Result<i32> {
    let factory = Factory;
    let reader = FileEnvironmentReader::new(&factory);
    let locker = TomlLocker::new(ws.lock_path());
    let mut pool = Pool::new();
    pool.add_repository(Box::new(FileIndex::load(&ws.write_index(INDEX), &factory)?));

    let installer = PluginInstaller::new(
        Collaborators {
            reader: &reader,
            factory: &factory,
            locker: &locker,
            pool: &pool,
            engines,
            output,
        },
        InstallerConfig::new(&ws.data_dir).with_dry_run(dry_run),
    );
    installer.install(&ws.environment(), plugins)
}

fn installed_versions(ws: &Workspace) -> Vec<String> {
    Manifest::from_file(&ws.manifest)
        .unwrap()
        .packages
        .iter()
        .map(|p| format!("{}=={}", p.name, p.version))
        .collect()
}

#[test]
fn test_single_plugin_scenario() {
    let ws = Workspace::new(HOST_ENVIRONMENT);
    let engines = RecordingEngines::default();
    let output = BufferedOutput::new();

    let status = install(&ws, &engines, &output, &["B"], true).unwrap();

    assert_eq!(status, 0);
    assert_eq!(engines.created.get(), 1);
    let record = engines.record.borrow();
    assert_eq!(record.root_dependencies, vec!["a (>=1.0)", "B (*)"]);
    assert_eq!(record.repository, vec!["a==1.2"]);
    assert_eq!(record.runtime_versions, "3.11.4");
    assert_eq!(
        record.calls,
        vec![
            "dry_run(true)",
            "whitelist(B)",
            "update(true)",
            "remove_untracked(false)",
            "run"
        ]
    );
}

#[test]
fn test_dry_run_flag_forwarded_verbatim() {
    let ws = Workspace::new(HOST_ENVIRONMENT);
    let engines = RecordingEngines::default();
    let output = BufferedOutput::new();

    install(&ws, &engines, &output, &["B"], false).unwrap();

    assert_eq!(engines.calls()[0], "dry_run(false)");
}

#[test]
fn test_missing_host_package() {
    let ws = Workspace::new(HOSTLESS_ENVIRONMENT);
    let engines = RecordingEngines::default();
    let output = BufferedOutput::new();

    let err = install(&ws, &engines, &output, &["B"], false).unwrap_err();

    assert!(matches!(err, Error::HostPackageNotFound(ref name) if name == "poetry"));
    assert_ne!(err.exit_code(), 0);
    assert_eq!(engines.created.get(), 0);
    assert!(!ws.lock_path().exists());
}

#[test]
fn test_duplicate_plugins_last_wins() {
    let ws = Workspace::new(HOST_ENVIRONMENT);
    let engines = RecordingEngines::default();
    let output = BufferedOutput::new();

    install(&ws, &engines, &output, &["B==2.0", "B==3.0"], false).unwrap();

    let record = engines.record.borrow();
    assert_eq!(record.root_dependencies, vec!["a (>=1.0)", "B (==3.0)"]);
    assert_eq!(engines.calls()[1], "whitelist(B)");
}

#[test]
fn test_invalid_requirement_stops_before_snapshot() {
    let ws = Workspace::new(HOST_ENVIRONMENT);
    let factory = Factory;
    let reader = CountingReader::new(FileEnvironmentReader::new(&factory));
    let locker = TomlLocker::new(ws.lock_path());
    let pool = Pool::new();
    let engines = RecordingEngines::default();
    let output = BufferedOutput::new();

    let installer = PluginInstaller::new(
        Collaborators {
            reader: &reader,
            factory: &factory,
            locker: &locker,
            pool: &pool,
            engines: &engines,
            output: &output,
        },
        InstallerConfig::new(&ws.data_dir),
    );
    let result = installer.install(&ws.environment(), &["good", "bad[extra"]);

    assert!(matches!(result, Err(Error::InvalidRequirementSyntax { .. })));
    assert_eq!(reader.snapshots.get(), 0);
    assert_eq!(engines.created.get(), 0);
    assert!(!ws.lock_path().exists());
}

#[test]
fn test_lock_seeded_from_companion_repository() {
    let ws = Workspace::new(HOST_ENVIRONMENT);
    let engines = RecordingEngines::default();
    let output = BufferedOutput::new();

    install(&ws, &engines, &output, &["B"], true).unwrap();

    let lock = Lockfile::from_file(&ws.lock_path()).unwrap();
    let locked: Vec<String> = lock
        .packages
        .iter()
        .map(|p| format!("{}=={}", p.name, p.version))
        .collect();
    assert_eq!(locked, engines.record.borrow().repository);
    assert_eq!(lock.metadata.root, "poetry");
    assert!(lock.metadata.content_hash.is_none());
}

#[test]
fn test_existing_lock_left_byte_identical() {
    let ws = Workspace::new(HOST_ENVIRONMENT);
    let engines = RecordingEngines::default();
    let output = BufferedOutput::new();

    install(&ws, &engines, &output, &["B"], true).unwrap();
    let first = read(&ws.lock_path());

    install(&ws, &engines, &output, &["C"], true).unwrap();
    assert_eq!(read(&ws.lock_path()), first);
}

#[test]
fn test_unsafe_packages_never_reach_engine_or_lock() {
    let ws = Workspace::new(HOST_ENVIRONMENT);
    let engines = RecordingEngines::default();
    let output = BufferedOutput::new();

    install(&ws, &engines, &output, &["B"], true).unwrap();

    let lock = read(&ws.lock_path());
    for name in ["pip", "setuptools", "wheel"] {
        assert!(
            !engines.record.borrow().repository.iter().any(|p| p.starts_with(name)),
            "{} reached the companion repository",
            name
        );
        assert!(!lock.contains(&format!("name = \"{}\"", name)), "{} was locked", name);
    }
}

#[test]
fn test_engine_status_propagated() {
    let ws = Workspace::new(HOST_ENVIRONMENT);
    let engines = RecordingEngines::with_status(2);
    let output = BufferedOutput::new();

    assert_eq!(install(&ws, &engines, &output, &["B"], false).unwrap(), 2);
}

#[test]
fn test_reference_engine_installs_plugin() {
    let ws = Workspace::new(HOST_ENVIRONMENT);
    let engines = DefaultEngineFactory::new(false);
    let output = BufferedOutput::new();

    let status = install(&ws, &engines, &output, &["b@^2.0"], false).unwrap();

    assert_eq!(status, 0);
    assert_eq!(
        installed_versions(&ws),
        vec![
            "pip==23.1",
            "poetry==1.0",
            "a==1.2",
            "setuptools==67.0",
            "wheel==0.40",
            "b==2.0",
            "c==1.1"
        ]
    );
    assert!(output.contains("Installing b (2.0)"));

    let lock = Lockfile::from_file(&ws.lock_path()).unwrap();
    assert!(lock.metadata.content_hash.is_some());
    assert_eq!(lock.get_package("a").map(|p| p.version.as_str()), Some("1.2"));
    assert_eq!(lock.get_package("b").map(|p| p.version.as_str()), Some("2.0"));
}

#[test]
fn test_reference_engine_dry_run() {
    let ws = Workspace::new(HOST_ENVIRONMENT);
    let before = ws.manifest_contents();
    let engines = DefaultEngineFactory::new(false);
    let output = BufferedOutput::new();

    let status = install(&ws, &engines, &output, &["b==2.0"], true).unwrap();

    assert_eq!(status, 0);
    assert_eq!(ws.manifest_contents(), before);
    assert!(output.contains("Would install b (2.0)"));
    assert!(output.contains("Would install c (1.1)"));

    // The guard still seeds the baseline lock
    let lock = Lockfile::from_file(&ws.lock_path()).unwrap();
    assert!(lock.metadata.content_hash.is_none());
}

#[test]
fn test_reference_engine_resolution_failure() {
    let ws = Workspace::new(HOST_ENVIRONMENT);
    let before = ws.manifest_contents();
    let engines = DefaultEngineFactory::new(false);
    let output = BufferedOutput::new();

    // b 3.0 needs a>=2.0, but a is installed at 1.2 and outside the whitelist
    let status = install(&ws, &engines, &output, &["b==3.0"], false).unwrap();

    assert_eq!(status, 1);
    assert!(output.contains("Dependency resolution failed"));
    assert_eq!(ws.manifest_contents(), before);
}

#[test]
fn test_untracked_packages_are_kept() {
    let ws = Workspace::new(
        r#"{
            "runtime_version": "3.11.4",
            "packages": [
                { "name": "poetry", "version": "1.0" },
                { "name": "orphan", "version": "0.1" }
            ]
        }"#,
    );
    let engines = DefaultEngineFactory::new(false);
    let output = BufferedOutput::new();

    let status = install(&ws, &engines, &output, &["b==1.0"], false).unwrap();

    assert_eq!(status, 0);
    assert_eq!(
        installed_versions(&ws),
        vec!["poetry==1.0", "orphan==0.1", "b==1.0"]
    );
    assert!(!output.contains("Removing"));
    let lock = Lockfile::from_file(&ws.lock_path()).unwrap();
    assert!(lock.get_package("orphan").is_some());
}

#[test]
fn test_corrupt_manifest_is_an_error() {
    let ws = Workspace::new(HOST_ENVIRONMENT);
    let env = ws.environment();
    fs::write(&ws.manifest, "{ not json").unwrap();

    let factory = Factory;
    let reader = FileEnvironmentReader::new(&factory);
    let locker = TomlLocker::new(ws.lock_path());
    let pool = Pool::new();
    let engines = RecordingEngines::default();
    let output = BufferedOutput::new();

    let installer = PluginInstaller::new(
        Collaborators {
            reader: &reader,
            factory: &factory,
            locker: &locker,
            pool: &pool,
            engines: &engines,
            output: &output,
        },
        InstallerConfig::new(&ws.data_dir),
    );

    assert!(installer.install(&env, &["B"]).is_err());
    assert_eq!(engines.created.get(), 0);
    assert!(!ws.lock_path().exists());
}

#[test]
fn test_host_requirements_for_other_runtimes_are_ignored() {
    let ws = Workspace::new(
        r#"{
            "runtime_version": "3.11.4",
            "packages": [
                {
                    "name": "poetry",
                    "version": "1.0",
                    "requires": ["importlib-metadata (>=1.6); python_version < \"3.8\""]
                }
            ]
        }"#,
    );
    let engines = DefaultEngineFactory::new(false);
    let output = BufferedOutput::new();

    let status = install(&ws, &engines, &output, &["b==1.0"], false).unwrap();

    assert_eq!(status, 0);
    assert_eq!(installed_versions(&ws), vec!["poetry==1.0", "b==1.0"]);
}

#[test]
fn test_marker_split_host_requirements_reach_the_engine() {
    let ws = Workspace::new(
        r#"{
            "runtime_version": "3.11.4",
            "packages": [
                {
                    "name": "poetry",
                    "version": "1.0",
                    "requires": [
                        "c (>=1.0,<2.0); python_version < \"3.8\"",
                        "c (>=2.0); python_version >= \"3.8\""
                    ]
                }
            ]
        }"#,
    );
    let recording = RecordingEngines::default();
    let output = BufferedOutput::new();

    install(&ws, &recording, &output, &["b==1.0"], false).unwrap();
    assert_eq!(
        recording.record.borrow().root_dependencies,
        vec![
            "c (>=1.0,<2.0); python_version < \"3.8\"",
            "c (>=2.0); python_version >= \"3.8\"",
            "b (==1.0)"
        ]
    );

    let engines = DefaultEngineFactory::new(false);
    let status = install(&ws, &engines, &output, &["b==1.0"], false).unwrap();
    assert_eq!(status, 0);
    assert_eq!(installed_versions(&ws), vec!["poetry==1.0", "c==2.0", "b==1.0"]);
}

#[test]
fn test_git_plugin_is_not_replaced_by_index_release() {
    let ws = Workspace::new(HOST_ENVIRONMENT);
    let before = ws.manifest_contents();
    let engines = DefaultEngineFactory::new(false);
    let output = BufferedOutput::new();

    let status = install(
        &ws,
        &engines,
        &output,
        &["git+https://example.com/org/b.git@main"],
        false,
    )
    .unwrap();

    assert_eq!(status, 1);
    assert!(output.contains("git sources are not supported"));
    assert!(!output.contains("Installing b"));
    assert_eq!(ws.manifest_contents(), before);
    let lock = Lockfile::from_file(&ws.lock_path()).unwrap();
    assert!(lock.get_package("b").is_none());
}
