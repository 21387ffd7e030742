//! # Test File Discovery / 测试文件发现
//!
//! Resolves the configured roots into a flat list of test files.
//!
//! 将配置的根路径解析为扁平的测试文件列表。

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::SuiteError;

/// Resolves every root into test files and concatenates the results.
///
/// A root naming a regular file is taken verbatim. Anything else is walked as
/// a directory and contributes every regular file whose path ends with `pattern`.
/// Per-root order is preserved and nothing is deduplicated, so a file reachable
/// from two roots shows up twice.
///
/// 将每个根路径解析为测试文件并拼接结果。
/// 指向普通文件的根路径按原样保留；其他根路径作为目录遍历，收集所有以 `pattern` 结尾的普通文件。
/// 保留每个根路径内的顺序且不去重。
///
/// # Errors
/// [`SuiteError::NoTestFilesFound`] when the combined list is empty.
pub fn discover(roots: &[PathBuf], pattern: &str) -> Result<Vec<PathBuf>, SuiteError> {
    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            files.push(root.clone());
        } else {
            files.extend(walk_root(root, pattern));
        }
    }

    if files.is_empty() {
        return Err(SuiteError::NoTestFilesFound {
            roots: roots.to_vec(),
        });
    }
    Ok(files)
}

/// Walks one directory root. Missing or unreadable roots yield nothing.
fn walk_root(root: &Path, pattern: &str) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(Result::ok)
        // `Path::is_file` follows symlinks, so linked test files are picked up too.
        .filter(|entry| entry.path().is_file())
        .filter(|entry| matches_pattern(entry.path(), pattern))
        .map(DirEntry::into_path)
        .collect()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// Suffix match on the file name.
pub fn matches_pattern(path: &Path, pattern: &str) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(pattern))
        .unwrap_or(false)
}
