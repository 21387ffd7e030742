//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides the small set of file system operations the log
//! directory needs: existence checks, copying the config file and replacing
//! the `latest` symlink.
//!
//! 此模块提供日志目录所需的文件系统操作：存在性检查、复制配置文件以及替换 `latest` 符号链接。

use anyhow::{Context, Result, bail};
use std::fs;
use std::io;
use std::path::Path;

/// Checks if a path exists and is a directory.
///
/// # Arguments
/// * `path` - Path to check
///
/// # Returns
/// `true` if the path exists and is a directory, `false` otherwise
pub fn is_directory(path: &Path) -> bool {
    path.is_dir()
}

/// Copies a single file, overwriting the destination.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to)
        .with_context(|| format!("Failed to copy {} to {}", from.display(), to.display()))?;
    Ok(())
}

/// Points `link` at `target`, deleting any symlink already at `link` first.
///
/// `target` is stored as given, so a relative target resolves against the
/// link's parent directory. A regular file or directory at `link` is never
/// removed; that is reported as an error instead.
///
/// 将 `link` 指向 `target`，若 `link` 处已存在符号链接则先删除。
/// `link` 处的普通文件或目录永远不会被删除，而是报告错误。
pub fn replace_symlink(target: &Path, link: &Path) -> Result<()> {
    match fs::symlink_metadata(link) {
        Ok(meta) if meta.file_type().is_symlink() => remove_symlink(link)
            .with_context(|| format!("Failed to remove old symlink: {}", link.display()))?,
        Ok(_) => bail!(
            "Refusing to replace {}: it exists and is not a symlink",
            link.display()
        ),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to inspect {}", link.display()));
        }
    }

    create_symlink(target, link).with_context(|| {
        format!(
            "Failed to link {} -> {}",
            link.display(),
            target.display()
        )
    })
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

#[cfg(unix)]
fn remove_symlink(link: &Path) -> io::Result<()> {
    fs::remove_file(link)
}

// Directory symlinks on Windows are removed like directories.
#[cfg(windows)]
fn remove_symlink(link: &Path) -> io::Result<()> {
    fs::remove_dir(link).or_else(|_| fs::remove_file(link))
}
