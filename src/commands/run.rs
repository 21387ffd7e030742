// src/commands/run.rs

use anyhow::Result;
use colored::*;
use std::path::PathBuf;

use crate::core::config::{RandomSetting, SuiteFile};
use crate::core::execution::CommandExecutor;
use crate::core::suite::TestSuite;

/// Suite selection and run options as given on the command line.
/// Anything set here overrides the configuration file.
///
/// 命令行给出的套件选择与运行选项，此处设置的值会覆盖配置文件。
#[derive(Debug, Clone, Default)]
pub struct SuiteArgs {
    pub name: Option<String>,
    pub config: PathBuf,
    /// `true` when `config` was not given explicitly; a missing file is then not an error.
    pub config_is_default: bool,
    pub tests: Vec<PathBuf>,
    pub pattern: Option<String>,
    pub random: bool,
    pub seed: Option<u64>,
    pub stdout: bool,
    pub stdout_only: bool,
    pub quiet: bool,
    pub jobs: Option<usize>,
    pub log_root: Option<PathBuf>,
}

impl SuiteArgs {
    /// Loads the configuration file and applies the command-line overrides.
    /// Returns the suite name alongside the merged configuration.
    pub fn resolve(&self) -> Result<(String, SuiteFile)> {
        let mut file = if self.config_is_default && !self.config.exists() {
            SuiteFile::default()
        } else {
            SuiteFile::load(&self.config)?
        };

        let options = &mut file.suite;
        if !self.tests.is_empty() {
            options.tests = self.tests.clone();
        }
        if let Some(pattern) = &self.pattern {
            options.pattern = pattern.clone();
        }
        if let Some(seed) = self.seed {
            options.random = RandomSetting::Seed(seed);
        } else if self.random {
            options.random = RandomSetting::Flag(true);
        }
        options.stdout |= self.stdout;
        options.stdout_only |= self.stdout_only;
        options.quiet |= self.quiet;
        if let Some(jobs) = self.jobs {
            options.jobs = jobs;
        }
        if let Some(log_root) = &self.log_root {
            options.log_root = log_root.clone();
        }

        let name = self.name.clone().unwrap_or_else(|| file.suite_name());
        Ok((name, file))
    }
}

pub async fn execute(args: SuiteArgs) -> Result<()> {
    let (name, file) = args.resolve()?;
    let SuiteFile {
        suite: options,
        executor,
        host,
        ..
    } = file;

    let mut suite = TestSuite::new(&name, options, host)?;
    let executor = CommandExecutor::new(executor);
    suite.run(&executor).await?;

    let counts = suite.counts()?;
    if counts.is_success() {
        println!(
            "\n{}",
            format!(
                "All {} test files of the {} suite passed.",
                counts.attempted(),
                suite.name()
            )
            .green()
            .bold()
        );
    } else {
        println!(
            "\n{}",
            format!(
                "{} failed and {} errored out of {} test files.",
                counts.failed,
                counts.errored,
                counts.attempted()
            )
            .red()
            .bold()
        );
    }
    if let Some(dir) = suite.log_dir() {
        println!("Logs written to {}", dir.display());
    }

    suite.run_and_exit_on_failure()
}
