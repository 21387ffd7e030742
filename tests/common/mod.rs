// Shared test helpers for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Result, bail};
use suite_runner::TestExecutor;
use suite_runner::config::{HostConfig, SuiteOptions};
use suite_runner::models::{TestOutcome, TestStatus};
use tempfile::{TempDir, tempdir};

/// Creates empty files (and their parent directories) below `root`.
pub fn create_files(root: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = root.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "").unwrap();
            path
        })
        .collect()
}

/// A temp workspace holding `tests/a_test`, `tests/b_test`, `tests/c_test`.
pub fn abc_workspace() -> TempDir {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    create_files(
        &temp_dir.path().join("tests"),
        &["a_test", "b_test", "c_test"],
    );
    temp_dir
}

/// Options pointing at `<workspace>/tests` and `<workspace>/log`, console echo off.
pub fn quiet_options(workspace: &Path) -> SuiteOptions {
    SuiteOptions {
        tests: vec![workspace.join("tests")],
        pattern: "_test".to_string(),
        quiet: true,
        log_root: workspace.join("log"),
        ..SuiteOptions::default()
    }
}

/// Executor whose verdict is looked up by file name. Unknown files pass.
#[derive(Default)]
pub struct StubExecutor {
    statuses: HashMap<String, TestStatus>,
    delays: HashMap<String, Duration>,
    broken: Option<String>,
    calls: Mutex<Vec<PathBuf>>,
}

impl StubExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scenario used throughout: `a` passes, `b` fails, `c` errors.
    pub fn abc() -> Self {
        Self::new()
            .with_status("b_test", TestStatus::Fail)
            .with_status("c_test", TestStatus::Error)
    }

    pub fn with_status(mut self, file_name: &str, status: TestStatus) -> Self {
        self.statuses.insert(file_name.to_string(), status);
        self
    }

    pub fn with_delay(mut self, file_name: &str, delay: Duration) -> Self {
        self.delays.insert(file_name.to_string(), delay);
        self
    }

    /// Makes the executor itself fail on `file_name`.
    pub fn broken_on(mut self, file_name: &str) -> Self {
        self.broken = Some(file_name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl TestExecutor for StubExecutor {
    async fn execute(
        &self,
        _config: &HostConfig,
        _options: &SuiteOptions,
        file: &Path,
    ) -> Result<TestOutcome> {
        let name = file.file_name().unwrap().to_string_lossy().into_owned();
        self.calls.lock().unwrap().push(file.to_path_buf());

        if let Some(delay) = self.delays.get(&name) {
            tokio::time::sleep(*delay).await;
        }
        if self.broken.as_deref() == Some(name.as_str()) {
            bail!("stub executor broke on {name}");
        }

        let outcome = match self.statuses.get(&name).copied().unwrap_or(TestStatus::Pass) {
            TestStatus::Pass => TestOutcome::passed(),
            TestStatus::Fail => TestOutcome::failed(format!("assertion failed in {name}")),
            TestStatus::Error => TestOutcome::errored(format!("{name} blew up")),
        };
        Ok(outcome.with_output(format!("output of {name}")))
    }
}

/// A `Write` target tests can read back.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}
