//! # Suite Controller Module / 套件控制器模块
//!
//! [`TestSuite`] is the top-level entry point: it resolves and orders the test
//! files when constructed, and on [`TestSuite::run`] opens the log session,
//! drives the run loop and writes the summary.
//!
//! [`TestSuite`] 是顶层入口：构造时解析并排序测试文件，
//! 在 [`TestSuite::run`] 时打开日志会话、驱动运行循环并写出摘要。
//!
//! ## Lifecycle / 生命周期
//!
//! `Unstarted -> Running -> Completed`. Results are only readable once the
//! suite is `Completed`; asking earlier is a [`SuiteError::NotRun`].

use anyhow::Result;
use chrono::{DateTime, Local};
use colored::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::core::config::{HostConfig, SuiteOptions, SummaryTarget};
use crate::core::discovery;
use crate::core::error::SuiteError;
use crate::core::execution::TestExecutor;
use crate::core::models::{StatusCounts, TestRecord};
use crate::core::ordering::{self, ExecutionOrder};
use crate::core::run_loop;
use crate::infra::log_session::LogSession;
use crate::infra::sink::{Sink, Tone};
use crate::reporting::config_dump::{ConfigDumper, YamlConfigDumper};
use crate::reporting::summary::Summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Unstarted,
    Running,
    Completed,
}

/// A named, ordered collection of test files run as one unit.
/// 一个具名的、有序的测试文件集合，作为一个整体运行。
#[derive(Debug)]
pub struct TestSuite {
    name: String,
    options: SuiteOptions,
    config: HostConfig,
    test_files: Vec<PathBuf>,
    random_seed: Option<u64>,
    state: RunState,
    records: Vec<TestRecord>,
    started_at: Option<DateTime<Local>>,
    log_dir: Option<PathBuf>,
    run_log: Option<PathBuf>,
    summary_file: Option<PathBuf>,
}

impl TestSuite {
    /// Normalizes `name`, discovers the test files and puts them in execution order.
    ///
    /// Nothing is written to disk here.
    ///
    /// # Errors
    /// [`SuiteError::NoTestFilesFound`] when the roots in `options.tests` hold no test files.
    ///
    /// 规范化 `name`，发现测试文件并将其排列为执行顺序。此处不会写入磁盘。
    pub fn new(name: &str, options: SuiteOptions, config: HostConfig) -> Result<Self, SuiteError> {
        let discovered = discovery::discover(&options.tests, &options.pattern)?;
        let ExecutionOrder { files, seed } =
            ordering::order(discovered, options.random.order_mode());

        Ok(Self {
            name: normalize_name(name),
            options,
            config,
            test_files: files,
            random_seed: seed,
            state: RunState::Unstarted,
            records: Vec::new(),
            started_at: None,
            log_dir: None,
            run_log: None,
            summary_file: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &SuiteOptions {
        &self.options
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Test files in the order they will run.
    pub fn test_files(&self) -> &[PathBuf] {
        &self.test_files
    }

    /// The seed used to shuffle the files, when running in random order.
    pub fn random_seed(&self) -> Option<u64> {
        self.random_seed
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn has_run(&self) -> bool {
        self.state == RunState::Completed
    }

    pub fn started_at(&self) -> Option<DateTime<Local>> {
        self.started_at
    }

    /// The timestamped log directory of the run, if log files were written.
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }

    pub fn run_log(&self) -> Option<&Path> {
        self.run_log.as_deref()
    }

    pub fn summary_file(&self) -> Option<&Path> {
        self.summary_file.as_deref()
    }

    /// Runs every test file with `executor` and writes the summary.
    /// See [`TestSuite::run_with_dumper`].
    pub async fn run<E: TestExecutor>(&mut self, executor: &E) -> Result<&[TestRecord]> {
        self.run_with_dumper(executor, &YamlConfigDumper).await
    }

    /// Runs every test file with `executor`, dumping the host configuration
    /// into the summary with `dumper`.
    ///
    /// Returns the records in execution order. An `Err` from the executor aborts
    /// the run and leaves the suite without results.
    ///
    /// 使用 `executor` 运行每个测试文件，并通过 `dumper` 将主机配置写入摘要。
    /// 按执行顺序返回记录。执行器返回的 `Err` 会中止运行，套件将没有结果。
    ///
    /// # Errors
    /// [`SuiteError::AlreadyRun`] when called a second time, plus any I/O
    /// failure of the log directory.
    pub async fn run_with_dumper<E, D>(&mut self, executor: &E, dumper: &D) -> Result<&[TestRecord]>
    where
        E: TestExecutor,
        D: ConfigDumper,
    {
        if self.state != RunState::Unstarted {
            return Err(SuiteError::AlreadyRun {
                suite: self.name.clone(),
            }
            .into());
        }
        self.state = RunState::Running;
        let started_at = Local::now();
        self.started_at = Some(started_at);

        let session = (!self.options.stdout_only).then(|| {
            LogSession::new(
                &self.options.log_root,
                started_at,
                self.options.config.clone(),
            )
        });

        let mut sink = match &session {
            Some(session) => {
                session.ensure_dir()?;
                let (path, sink) = session.open_run_log(&self.name, self.options.quiet)?;
                self.log_dir = Some(session.dir());
                self.run_log = Some(path);
                sink
            }
            None if self.options.quiet => Sink::null(),
            None => Sink::console(),
        };

        sink.say(
            Tone::Info,
            &format!(
                "Running the {} suite ({} test files)",
                self.name,
                self.test_files.len()
            ),
        )?;
        if let Some(seed) = self.random_seed {
            sink.notify(&format!("Using random seed {seed}"))?;
        }

        let records = run_loop::run_files(
            &self.test_files,
            executor,
            &self.config,
            &self.options,
            &mut sink,
        )
        .await?;
        self.records = records;
        self.state = RunState::Completed;

        self.summary_file = self.write_summary(session.as_ref(), &mut sink, dumper)?;
        sink.close()?;

        Ok(&self.records)
    }

    /// Writes the summary to the destination picked by the options and returns
    /// the summary file path when one was created.
    ///
    /// With no log files and a silenced run sink the summary still reaches the console.
    fn write_summary<D: ConfigDumper>(
        &self,
        session: Option<&LogSession>,
        run_sink: &mut Sink,
        dumper: &D,
    ) -> Result<Option<PathBuf>> {
        let summary = self.summary()?;
        let host_dump = dumper.dump(&self.config);

        match (self.options.summary_target(), session) {
            (SummaryTarget::File, Some(session)) => {
                let (path, mut sink) = session.open_summary(&self.name)?;
                summary.write_to(&mut sink, &host_dump)?;
                sink.close()?;
                Ok(Some(path))
            }
            (_, None) if run_sink.is_null() => {
                let mut console = Sink::console();
                summary.write_to(&mut console, &host_dump)?;
                console.close()?;
                Ok(None)
            }
            _ => {
                run_sink.notify("")?;
                run_sink.notify("")?;
                summary.write_to(run_sink, &host_dump)?;
                Ok(None)
            }
        }
    }

    /// The records of the completed run, in execution order.
    pub fn records(&self) -> Result<&[TestRecord], SuiteError> {
        self.ensure_completed()?;
        Ok(&self.records)
    }

    pub fn counts(&self) -> Result<StatusCounts, SuiteError> {
        Ok(StatusCounts::tally(self.records()?))
    }

    pub fn summary(&self) -> Result<Summary<'_>, SuiteError> {
        let started_at = self.ensure_completed()?;
        Ok(Summary::new(started_at, &self.records))
    }

    /// `true` iff no file failed or errored.
    ///
    /// # Errors
    /// [`SuiteError::NotRun`] before the run completed; never a silent default.
    pub fn is_success(&self) -> Result<bool, SuiteError> {
        Ok(self.counts()?.is_success())
    }

    pub fn is_failed(&self) -> Result<bool, SuiteError> {
        Ok(!self.is_success()?)
    }

    /// `ExitCode::FAILURE` when the suite failed, `ExitCode::SUCCESS` otherwise.
    pub fn exit_code(&self) -> Result<ExitCode, SuiteError> {
        Ok(if self.is_success()? {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }

    /// Returns when the suite succeeded. Otherwise reports the failure on the
    /// console and in the run log, then exits the process with status 1.
    ///
    /// 套件成功时直接返回；否则在控制台和运行日志中报告失败，并以状态 1 退出进程。
    pub fn run_and_exit_on_failure(&self) -> Result<()> {
        if self.is_success()? {
            return Ok(());
        }

        let message = self.failure_notice();
        eprintln!("{}", message.red());
        if let Some(path) = &self.run_log {
            // The run sink is closed by now; reopen the log rather than reuse it.
            let mut sink = Sink::append(path)?;
            sink.error(&message)?;
            sink.close()?;
        }
        std::process::exit(1);
    }

    pub fn failure_notice(&self) -> String {
        format!("Failed while running the {} suite...", self.name)
    }

    fn ensure_completed(&self) -> Result<DateTime<Local>, SuiteError> {
        match (self.state, self.started_at) {
            (RunState::Completed, Some(started_at)) => Ok(started_at),
            _ => Err(SuiteError::NotRun {
                suite: self.name.clone(),
            }),
        }
    }
}

/// Replaces every run of whitespace with a single `-`.
/// 将每段连续空白替换为单个 `-`。
pub fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                normalized.push('-');
            }
            in_whitespace = true;
        } else {
            normalized.push(c);
            in_whitespace = false;
        }
    }
    normalized
}
