//! Domain errors raised by the suite controller.

use std::path::PathBuf;
use thiserror::Error;

/// Contract violations and fatal setup failures of a suite.
///
/// Per-file `fail` / `error` statuses are data, not errors; they never show up here.
/// 单个文件的 `fail` / `error` 状态属于数据而非错误，不会出现在这里。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SuiteError {
    /// Discovery resolved the configured roots to zero test files.
    #[error("no test files found under {}", display_roots(.roots))]
    NoTestFilesFound { roots: Vec<PathBuf> },

    /// Results were requested before `run()` completed.
    #[error("you have not run the {suite} suite yet")]
    NotRun { suite: String },

    /// `run()` was called on a suite that already completed.
    #[error("the {suite} suite has already been run")]
    AlreadyRun { suite: String },
}

fn display_roots(roots: &[PathBuf]) -> String {
    roots
        .iter()
        .map(|r| format!("'{}'", r.display()))
        .collect::<Vec<_>>()
        .join(", ")
}
