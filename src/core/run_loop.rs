//! # Run Loop Module / 运行循环模块
//!
//! Drives the executor over the ordered file list and records every outcome.
//!
//! 在有序文件列表上驱动执行器并记录每个结果。

use anyhow::{Context, Result};
use futures::{StreamExt, stream};
use std::path::{Path, PathBuf};

use crate::core::config::{HostConfig, SuiteOptions};
use crate::core::execution::TestExecutor;
use crate::core::models::{TestOutcome, TestRecord, TestStatus};
use crate::infra::sink::Sink;

/// Executes every file and returns one record per file, in `files` order.
///
/// With `jobs == 1` files run strictly one after another. With more jobs up to
/// that many run at once, but results are still consumed in submission order,
/// so output, progress lines and records never get reordered.
///
/// A `fail` or `error` outcome never stops the loop. An `Err` from the executor
/// does, and is returned as is.
///
/// 执行每个文件并按 `files` 的顺序为每个文件返回一条记录。
/// `jobs == 1` 时严格顺序执行；更多的 jobs 会并发执行，但结果仍按提交顺序处理，
/// 因此输出、进度行和记录的顺序不会改变。
pub async fn run_files<E: TestExecutor>(
    files: &[PathBuf],
    executor: &E,
    config: &HostConfig,
    options: &SuiteOptions,
    sink: &mut Sink,
) -> Result<Vec<TestRecord>> {
    let jobs = options.effective_jobs().max(1);
    let mut results = stream::iter(files)
        .map(|file| async move { (file, executor.execute(config, options, file).await) })
        .buffered(jobs);

    let mut records = Vec::with_capacity(files.len());
    while let Some((file, result)) = results.next().await {
        let outcome =
            result.with_context(|| format!("Executor failed while running {}", file.display()))?;
        report(sink, file, &outcome)?;
        records.push(TestRecord::new(file.clone(), outcome));
    }
    Ok(records)
}

fn report(sink: &mut Sink, file: &Path, outcome: &TestOutcome) -> Result<()> {
    sink.notify("")?;
    sink.write_raw(&outcome.output)?;
    sink.say(outcome.status.tone(), &progress_line(file, outcome.status))?;
    Ok(())
}

/// `<file> <status>ed`, e.g. `tests/a_test.sh passed`.
pub fn progress_line(file: &Path, status: TestStatus) -> String {
    format!("{} {}", file.display(), status.past_tense())
}
