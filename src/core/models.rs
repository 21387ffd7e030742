//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the suite runner:
//! the closed set of test statuses, the outcome reported by an executor, the
//! `(file, outcome)` record kept by the run loop, and the aggregated counters.
//!
//! 此模块定义了整个套件运行器中使用的核心数据结构：
//! 封闭的测试状态集合、执行器报告的结果、运行循环保存的 `(文件, 结果)` 记录以及聚合计数器。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::infra::sink::Tone;

/// The classified status of a single test file.
/// 单个测试文件的分类状态。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// Every assertion in the file held.
    /// 文件中的所有断言均成立。
    Pass,
    /// The file ran to completion but an assertion failed.
    /// 文件运行完成，但有断言失败。
    Fail,
    /// The executor itself signaled an abnormal condition (crash, timeout, missing program).
    /// 执行器本身报告了异常情况（崩溃、超时、程序缺失）。
    Error,
}

impl TestStatus {
    /// The bare status tag: `pass`, `fail` or `error`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Pass => "pass",
            TestStatus::Fail => "fail",
            TestStatus::Error => "error",
        }
    }

    /// The past-tense form used in progress lines, e.g. `passed`.
    /// 进度行中使用的过去式，例如 `passed`。
    pub fn past_tense(&self) -> String {
        format!("{}ed", self.as_str())
    }

    /// The console tone a status is rendered with.
    pub fn tone(&self) -> Tone {
        match self {
            TestStatus::Pass => Tone::Pass,
            TestStatus::Fail => Tone::Fail,
            TestStatus::Error => Tone::Error,
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an executor reports back for one test file.
///
/// `detail` is set whenever `status` is not [`TestStatus::Pass`]; it is opaque to
/// the core and only ever rendered through its string form.
///
/// 执行器为单个测试文件返回的结果。
/// 当 `status` 不是 [`TestStatus::Pass`] 时会设置 `detail`；核心逻辑不解析它，只使用其字符串形式。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub status: TestStatus,
    pub detail: Option<String>,
    /// Everything the test wrote while it ran. Routed into the active sink.
    /// 测试运行期间的全部输出，会被写入当前的输出接收器。
    pub output: String,
    pub duration: Duration,
}

impl TestOutcome {
    pub fn passed() -> Self {
        Self {
            status: TestStatus::Pass,
            detail: None,
            output: String::new(),
            duration: Duration::ZERO,
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            status: TestStatus::Fail,
            detail: Some(detail.into()),
            output: String::new(),
            duration: Duration::ZERO,
        }
    }

    pub fn errored(detail: impl Into<String>) -> Self {
        Self {
            status: TestStatus::Error,
            detail: Some(detail.into()),
            output: String::new(),
            duration: Duration::ZERO,
        }
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// The string form of the failure detail, as shown in the summary.
    pub fn detail_str(&self) -> &str {
        self.detail.as_deref().unwrap_or("no detail reported")
    }
}

/// One `(file, outcome)` pair, in the order the file was executed.
/// 一个 `(文件, 结果)` 对，按文件执行顺序排列。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRecord {
    pub file: PathBuf,
    pub outcome: TestOutcome,
}

impl TestRecord {
    pub fn new(file: impl Into<PathBuf>, outcome: TestOutcome) -> Self {
        Self {
            file: file.into(),
            outcome,
        }
    }

    pub fn status(&self) -> TestStatus {
        self.outcome.status
    }
}

/// Aggregate counters over a sequence of records.
///
/// Both the success check and the summary go through [`StatusCounts::tally`],
/// so they can never disagree about the same records.
///
/// 一组记录的聚合计数器。成功检查与摘要都通过 [`StatusCounts::tally`] 计算，因此对相同记录的结论永远一致。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

impl StatusCounts {
    pub fn tally(records: &[TestRecord]) -> Self {
        let mut counts = Self::default();
        for record in records {
            match record.status() {
                TestStatus::Pass => counts.passed += 1,
                TestStatus::Fail => counts.failed += 1,
                TestStatus::Error => counts.errored += 1,
            }
        }
        counts
    }

    pub fn attempted(&self) -> usize {
        self.passed + self.failed + self.errored
    }

    /// `true` iff nothing failed and nothing errored.
    pub fn is_success(&self) -> bool {
        self.failed + self.errored == 0
    }
}
