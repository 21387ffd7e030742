//! # Log Session Module / 日志会话模块
//!
//! Owns the timestamped log directory of one suite run:
//!
//! ```text
//! log/
//! ├── 2026-10-19_14-03-27.512034/
//! │   ├── config.yml
//! │   ├── run-<suite>.log
//! │   └── <suite>-summary.txt
//! └── latest -> 2026-10-19_14-03-27.512034
//! ```
//!
//! The directory is created at most once per timestamp. Creating it also copies
//! the config file in and re-points `latest`; asking again is a no-op.
//!
//! 管理一次套件运行的带时间戳日志目录。每个时间戳最多创建一次目录；
//! 创建时会复制配置文件并重新指向 `latest`，重复请求不会产生任何操作。

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::io;
use std::path::{Path, PathBuf};

use crate::infra::fs;
use crate::infra::sink::Sink;

pub const LATEST_ALIAS: &str = "latest";
pub const CONFIG_COPY_NAME: &str = "config.yml";
/// Sortable and safe as a directory name on every platform.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S%.6f";

#[derive(Debug, Clone)]
pub struct LogSession {
    root: PathBuf,
    stamp: String,
    config_source: Option<PathBuf>,
}

impl LogSession {
    /// Describes the session; nothing touches the disk until a path is requested.
    /// 仅描述会话；在请求路径之前不会访问磁盘。
    pub fn new(
        root: impl Into<PathBuf>,
        started_at: DateTime<Local>,
        config_source: Option<PathBuf>,
    ) -> Self {
        Self {
            root: root.into(),
            stamp: started_at.format(TIMESTAMP_FORMAT).to_string(),
            config_source,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The timestamped directory of this run.
    pub fn dir(&self) -> PathBuf {
        self.root.join(&self.stamp)
    }

    pub fn latest_alias(&self) -> PathBuf {
        self.root.join(LATEST_ALIAS)
    }

    /// Creates the run directory if it does not exist yet.
    ///
    /// Returns `true` only for the call that actually created it. That call also
    /// copies the config file in as `config.yml` and replaces the `latest` alias.
    ///
    /// 若运行目录尚不存在则创建它。仅实际创建目录的那次调用返回 `true`，
    /// 并同时复制配置文件为 `config.yml` 以及替换 `latest` 别名。
    pub fn ensure_dir(&self) -> Result<bool> {
        let dir = self.dir();
        if fs::is_directory(&dir) {
            return Ok(false);
        }

        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create log root: {}", self.root.display()))?;
        match std::fs::create_dir(&dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to create log directory: {}", dir.display()));
            }
        }

        if let Some(source) = &self.config_source {
            fs::copy_file(source, &dir.join(CONFIG_COPY_NAME))?;
        }
        fs::replace_symlink(Path::new(&self.stamp), &self.latest_alias())?;
        Ok(true)
    }

    /// Path of a log file, addressed through the `latest` alias.
    /// 通过 `latest` 别名定位的日志文件路径。
    pub fn log_path(&self, name: &str) -> Result<PathBuf> {
        self.ensure_dir()?;
        Ok(self.latest_alias().join(name))
    }

    /// Opens `run-<suite>.log`. Unless `quiet`, the sink also writes to the console.
    ///
    /// The file is opened through `latest`, but the returned path names the
    /// timestamped directory, so it stays valid after `latest` moves on.
    ///
    /// 文件通过 `latest` 打开，但返回的路径指向带时间戳的目录，`latest` 指向其他运行后仍然有效。
    pub fn open_run_log(&self, suite: &str, quiet: bool) -> Result<(PathBuf, Sink)> {
        let name = run_log_name(suite);
        let path = self.log_path(&name)?;
        let sink = if quiet {
            Sink::file(&path)?
        } else {
            Sink::tee(&path)?
        };
        Ok((self.dir().join(name), sink))
    }

    /// Opens `<suite>-summary.txt`, file only. Returns the timestamped path.
    pub fn open_summary(&self, suite: &str) -> Result<(PathBuf, Sink)> {
        let name = summary_name(suite);
        let sink = Sink::file(&self.log_path(&name)?)?;
        Ok((self.dir().join(name), sink))
    }
}

pub fn run_log_name(suite: &str) -> String {
    format!("run-{suite}.log")
}

pub fn summary_name(suite: &str) -> String {
    format!("{suite}-summary.txt")
}
