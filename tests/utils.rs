#![allow(dead_code)]

use log::{Level, LevelFilter, Log, Metadata, Record};
use rnscaffold::error::Result;
use rnscaffold::init::{PackageManager, PackageManagerProvider};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use walkdir::WalkDir;

/// A package manager call recorded by [`RecordingPackageManagers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Bind { project_dir: PathBuf, force_npm: bool },
    Install(Vec<String>),
    InstallDev(Vec<String>),
    Uninstall(Vec<String>),
}

/// Records every bind and package operation instead of running npm or yarn.
#[derive(Debug, Clone, Default)]
pub struct RecordingPackageManagers {
    pub calls: Rc<RefCell<Vec<Call>>>,
}

impl RecordingPackageManagers {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

struct RecordingPackageManager {
    calls: Rc<RefCell<Vec<Call>>>,
}

impl PackageManager for RecordingPackageManager {
    fn install(&self, packages: &[String]) -> Result<()> {
        self.calls.borrow_mut().push(Call::Install(packages.to_vec()));
        Ok(())
    }

    fn install_dev(&self, packages: &[String]) -> Result<()> {
        self.calls.borrow_mut().push(Call::InstallDev(packages.to_vec()));
        Ok(())
    }

    fn uninstall(&self, packages: &[String]) -> Result<()> {
        self.calls.borrow_mut().push(Call::Uninstall(packages.to_vec()));
        Ok(())
    }
}

impl PackageManagerProvider for RecordingPackageManagers {
    fn bind(&self, project_dir: &Path, force_npm: bool) -> Box<dyn PackageManager> {
        self.calls
            .borrow_mut()
            .push(Call::Bind { project_dir: project_dir.to_path_buf(), force_npm });
        Box::new(RecordingPackageManager { calls: Rc::clone(&self.calls) })
    }
}

pub fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Lays out a framework package with a manifest and a built-in template under `root`,
/// returning the manifest path.
pub fn framework_fixture(root: &Path, peer_dependencies: &str) -> PathBuf {
    let manifest = root.join("package.json");
    write(
        &manifest,
        &format!(r#"{{"name": "react-native", "version": "0.57.8", "peerDependencies": {peer_dependencies}}}"#),
    );
    let template = root.join("local-cli/templates/HelloWorld");
    write(&template.join("App.js"), "export default class HelloWorld {}\n");
    write(&template.join("app.json"), "{\"name\": \"HelloWorld\", \"displayName\": \"HelloWorld\"}\n");
    write(&template.join("_gitignore"), "node_modules/\n");
    write(&template.join("ios/HelloWorld/AppDelegate.m"), "moduleName:@\"HelloWorld\"\n");
    write(
        &template.join("android/app/src/main/java/com/helloworld/MainActivity.java"),
        "package com.helloworld;\n",
    );
    manifest
}

/// Prints files that differ between two directories.
pub fn print_dir_diff(dir1: &Path, dir2: &Path) {
    let files = |dir: &Path| -> std::collections::BTreeSet<PathBuf> {
        WalkDir::new(dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.path().strip_prefix(dir).unwrap().to_path_buf())
            .collect()
    };
    let (files1, files2) = (files(dir1), files(dir2));

    println!("\n=== Directory Comparison ===");
    for file in files1.difference(&files2) {
        println!("  + {file:?}");
    }
    for file in files2.difference(&files1) {
        println!("  - {file:?}");
    }
    for file in files1.intersection(&files2) {
        let (content1, content2) = (fs::read(dir1.join(file)).unwrap(), fs::read(dir2.join(file)).unwrap());
        if content1 != content2 {
            println!("  ~ {file:?}");
            println!("--- Actual content:\n{}", String::from_utf8_lossy(&content1));
            println!("--- Expected content:\n{}", String::from_utf8_lossy(&content2));
        }
    }
    println!("=== End of Comparison ===\n");
}

/// Asserts that two directory trees are identical, printing a diff when they are not.
pub fn assert_same_tree(actual: &Path, expected: &Path) {
    if dir_diff::is_different(actual, expected).unwrap() {
        print_dir_diff(actual, expected);
        panic!("Directories differ. See above for details.");
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Logger that keeps records per test thread so parallel tests do not mix.
struct CapturingLogger;

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|records| {
            records.borrow_mut().push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger;

/// Runs `f` and returns its result with the log records emitted on this thread.
///
/// Installs the capturing logger on first use. Binaries calling this must not
/// install another logger (e.g. through `test_log::test`).
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<(Level, String)>) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
    CAPTURED.with(|records| records.borrow_mut().clear());
    let result = f();
    let records = CAPTURED.with(|records| records.borrow_mut().drain(..).collect());
    (result, records)
}

/// Messages logged at error level.
pub fn errors(records: &[(Level, String)]) -> Vec<&str> {
    records
        .iter()
        .filter(|(level, _)| *level == Level::Error)
        .map(|(_, message)| message.as_str())
        .collect()
}
