//! # Test Execution Module / 测试执行模块
//!
//! The seam between the orchestrator and whatever actually runs a test file.
//! The run loop only knows [`TestExecutor`]; [`CommandExecutor`] is the
//! default implementation, which runs each file through a configured command.
//!
//! 编排器与实际运行测试文件的组件之间的接口。运行循环只知道 [`TestExecutor`]；
//! [`CommandExecutor`] 是默认实现，通过配置的命令运行每个文件。

use anyhow::{Context, Result, anyhow, bail};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::core::config::{ExecutorConfig, HostConfig, SuiteOptions};
use crate::core::models::TestOutcome;
use crate::infra::command;

/// Placeholder in a command template replaced by the test file path.
pub const FILE_PLACEHOLDER: &str = "{file}";

/// Runs one test file and classifies the result.
///
/// Implementations report assertion failures and abnormal conditions as
/// `Ok` outcomes with status `fail` / `error`. Returning `Err` means the
/// executor itself broke; the run loop does not catch it and the whole suite
/// run is aborted.
///
/// 运行一个测试文件并对结果进行分类。
/// 实现应将断言失败和异常情况作为状态为 `fail` / `error` 的 `Ok` 结果返回。
/// 返回 `Err` 表示执行器本身出错；运行循环不会捕获它，整个套件运行将被中止。
#[allow(async_fn_in_trait)]
pub trait TestExecutor {
    async fn execute(
        &self,
        config: &HostConfig,
        options: &SuiteOptions,
        file: &Path,
    ) -> Result<TestOutcome>;
}

/// Runs each test file as a child process built from a command template.
///
/// Exit code `0` is a pass and any other exit code a fail. A process that could
/// not be started, was killed by a signal or exceeded `timeout_secs` is an error.
///
/// 将每个测试文件作为由命令模板构建的子进程运行。
/// 退出码 `0` 为通过，其他退出码为失败；无法启动、被信号终止或超过 `timeout_secs` 的进程为错误。
#[derive(Debug, Clone, Default)]
pub struct CommandExecutor {
    config: ExecutorConfig,
}

impl CommandExecutor {
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// Builds the argument vector for `file`: environment variables and `~` are
    /// expanded, the template is split shell-style, then `{file}` is substituted
    /// (or the path appended when the template has no placeholder).
    pub fn command_line(&self, file: &Path) -> Result<Vec<String>> {
        let template = &self.config.command;
        let expanded = shellexpand::full(template)
            .with_context(|| format!("Failed to expand command: {template}"))?
            .to_string();

        let mut parts = shlex::split(&expanded)
            .ok_or_else(|| anyhow!("Failed to parse command: {}", expanded))?;
        if parts.is_empty() {
            bail!("Empty command after parsing.");
        }

        let file = file.to_string_lossy();
        if parts.iter().any(|part| part.contains(FILE_PLACEHOLDER)) {
            for part in &mut parts {
                *part = part.replace(FILE_PLACEHOLDER, &file);
            }
        } else {
            parts.push(file.into_owned());
        }
        Ok(parts)
    }
}

impl TestExecutor for CommandExecutor {
    async fn execute(
        &self,
        _config: &HostConfig,
        _options: &SuiteOptions,
        file: &Path,
    ) -> Result<TestOutcome> {
        let parts = self.command_line(file)?;
        let program = &parts[0];

        let mut cmd = tokio::process::Command::new(program);
        cmd.args(&parts[1..])
            .envs(&self.config.env)
            .kill_on_drop(true);
        if let Some(dir) = &self.config.working_dir {
            cmd.current_dir(dir);
        }

        let start_time = Instant::now();
        let capture = command::spawn_and_capture(cmd);
        let (status_res, output) = match self.config.timeout_secs.map(Duration::from_secs) {
            Some(limit) => match tokio::time::timeout(limit, capture).await {
                Ok(res) => res,
                Err(_) => {
                    return Ok(TestOutcome::errored(format!(
                        "timed out after {}s",
                        limit.as_secs()
                    ))
                    .with_duration(start_time.elapsed()));
                }
            },
            None => capture.await,
        };
        let duration = start_time.elapsed();

        let outcome = match status_res {
            Err(e) => TestOutcome::errored(format!("failed to start '{program}': {e}")),
            Ok(status) if status.success() => TestOutcome::passed(),
            Ok(status) => match status.code() {
                Some(code) => TestOutcome::failed(format!("exited with status {code}")),
                None => TestOutcome::errored(format!("terminated abnormally ({status})")),
            },
        };
        Ok(outcome.with_output(output).with_duration(duration))
    }
}
