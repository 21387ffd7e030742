//! # Summary Module / 摘要模块
//!
//! Aggregates the records of a completed run and renders the textual report.
//!
//! 聚合已完成运行的记录并渲染文本报告。

use chrono::{DateTime, Local};
use std::io;

use crate::core::models::{StatusCounts, TestRecord, TestStatus};
use crate::infra::sink::Sink;

/// Counts plus the itemized `fail` and `error` records of one run.
/// 一次运行的计数以及逐项列出的 `fail` 与 `error` 记录。
#[derive(Debug, Clone)]
pub struct Summary<'a> {
    started_at: DateTime<Local>,
    counts: StatusCounts,
    failed: Vec<&'a TestRecord>,
    errored: Vec<&'a TestRecord>,
}

impl<'a> Summary<'a> {
    pub fn new(started_at: DateTime<Local>, records: &'a [TestRecord]) -> Self {
        let mut failed = Vec::new();
        let mut errored = Vec::new();
        for record in records {
            match record.status() {
                TestStatus::Pass => {}
                TestStatus::Fail => failed.push(record),
                TestStatus::Error => errored.push(record),
            }
        }

        Self {
            started_at,
            counts: StatusCounts::tally(records),
            failed,
            errored,
        }
    }

    pub fn counts(&self) -> StatusCounts {
        self.counts
    }

    pub fn failed(&self) -> &[&'a TestRecord] {
        &self.failed
    }

    pub fn errored(&self) -> &[&'a TestRecord] {
        &self.errored
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Renders the report.
    ///
    /// # Output Format / 输出格式
    /// ```text
    /// Test Pass Started: 2026-10-19 14:03:27 +02:00
    ///
    /// - Host Configuration Summary -
    ///   os: linux
    ///
    /// - Test Case Summary -
    /// Attempted: 3
    ///    Passed: 1
    ///    Failed: 1
    ///   Errored: 1
    ///
    /// - Specific Test Case Status -
    /// Failed Test Cases:
    ///   Test Case tests/b_test.sh reported: exited with status 1
    /// Errored Test Cases:
    ///   Test Case tests/c_test.sh reported: timed out after 30s
    /// ```
    pub fn render(&self, host_dump: &str) -> String {
        let counts = &self.counts;
        let mut lines = vec![
            format!(
                "Test Pass Started: {}",
                self.started_at.format("%Y-%m-%d %H:%M:%S %:z")
            ),
            String::new(),
            "- Host Configuration Summary -".to_string(),
            host_dump.trim_end().to_string(),
            String::new(),
            "- Test Case Summary -".to_string(),
            format!("Attempted: {}", counts.attempted()),
            format!("   Passed: {}", counts.passed),
            format!("   Failed: {}", counts.failed),
            format!("  Errored: {}", counts.errored),
            String::new(),
            "- Specific Test Case Status -".to_string(),
            "Failed Test Cases:".to_string(),
        ];
        lines.extend(self.failed.iter().map(|record| failure_line(record)));
        lines.push("Errored Test Cases:".to_string());
        lines.extend(self.errored.iter().map(|record| failure_line(record)));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Writes the rendered report line by line into `sink`.
    pub fn write_to(&self, sink: &mut Sink, host_dump: &str) -> io::Result<()> {
        for line in self.render(host_dump).lines() {
            sink.notify(line)?;
        }
        Ok(())
    }
}

fn failure_line(record: &TestRecord) -> String {
    format!(
        "  Test Case {} reported: {}",
        record.file.display(),
        record.outcome.detail_str()
    )
}
