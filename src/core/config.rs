//! # Configuration Module / 配置模块
//!
//! Defines the suite configuration file (`TestSuite.yml` by default) and the
//! option bag consumed by discovery, ordering, logging and the default executor.
//!
//! 定义套件配置文件（默认为 `TestSuite.yml`）以及发现、排序、日志和默认执行器所使用的选项集合。

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::ordering::OrderMode;

pub const DEFAULT_CONFIG_FILE: &str = "TestSuite.yml";
pub const DEFAULT_TEST_ROOT: &str = "tests";
pub const DEFAULT_SUITE_NAME: &str = "default";
pub const DEFAULT_PATTERN: &str = "_test.sh";
pub const DEFAULT_LOG_ROOT: &str = "log";
pub const DEFAULT_COMMAND: &str = "sh {file}";

/// The `random` option: either a flag or a fixed seed.
/// `random` 选项：布尔开关或固定种子。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RandomSetting {
    /// `false` keeps lexicographic order, `true` seeds from the current time.
    Flag(bool),
    /// Shuffle with exactly this seed.
    Seed(u64),
}

impl Default for RandomSetting {
    fn default() -> Self {
        RandomSetting::Flag(false)
    }
}

impl RandomSetting {
    pub fn order_mode(&self) -> OrderMode {
        match *self {
            RandomSetting::Flag(false) => OrderMode::Lexicographic,
            RandomSetting::Flag(true) => OrderMode::Random { seed: None },
            RandomSetting::Seed(seed) => OrderMode::Random { seed: Some(seed) },
        }
    }
}

/// Where the summary is written once the run loop finishes.
/// 运行循环结束后摘要的写入位置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryTarget {
    /// A dedicated `<suite>-summary.txt` under the log directory.
    File,
    /// Appended to the run log stream.
    RunLog,
    /// Straight to the console; no log files exist.
    Console,
}

/// Options that shape one suite run.
///
/// Every field has a default, so an empty `suite:` section is valid.
/// 每个字段都有默认值，因此空的 `suite:` 部分也是合法的。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SuiteOptions {
    /// Files or directories to discover test files in. A single string is accepted.
    /// 用于发现测试文件的文件或目录，也接受单个字符串。
    #[serde(deserialize_with = "one_or_many")]
    pub tests: Vec<PathBuf>,
    /// Suffix a file below a directory root must end with to count as a test file.
    pub pattern: String,
    pub random: RandomSetting,
    /// Write the summary into the run log instead of a separate file.
    pub stdout: bool,
    /// Create no log files at all.
    pub stdout_only: bool,
    /// Do not tee the run log to the console.
    pub quiet: bool,
    /// Maximum number of files executed at once. `0` means one per CPU.
    /// 同时执行的最大文件数，`0` 表示每个 CPU 一个。
    pub jobs: usize,
    pub log_root: PathBuf,
    /// The configuration file these options were loaded from; copied into the log directory.
    /// 加载这些选项的配置文件，会被复制到日志目录中。
    #[serde(skip)]
    pub config: Option<PathBuf>,
}

impl Default for SuiteOptions {
    fn default() -> Self {
        Self {
            tests: vec![PathBuf::from(DEFAULT_TEST_ROOT)],
            pattern: DEFAULT_PATTERN.to_string(),
            random: RandomSetting::default(),
            stdout: false,
            stdout_only: false,
            quiet: false,
            jobs: 1,
            log_root: PathBuf::from(DEFAULT_LOG_ROOT),
            config: None,
        }
    }
}

impl SuiteOptions {
    pub fn effective_jobs(&self) -> usize {
        match self.jobs {
            0 => num_cpus::get(),
            n => n,
        }
    }

    pub fn summary_target(&self) -> SummaryTarget {
        if self.stdout_only {
            SummaryTarget::Console
        } else if self.stdout {
            SummaryTarget::RunLog
        } else {
            SummaryTarget::File
        }
    }
}

/// Settings for the default, command based executor.
/// 默认的基于命令的执行器的设置。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Shell-style command template. `{file}` is replaced by the test file path;
    /// when absent, the path is appended as the last argument.
    pub command: String,
    pub timeout_secs: Option<u64>,
    pub working_dir: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
            timeout_secs: None,
            working_dir: None,
            env: BTreeMap::new(),
        }
    }
}

/// Host / environment configuration. Opaque to the core, only dumped in the summary.
/// 主机/环境配置。核心逻辑不解析它，只在摘要中转储。
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct HostConfig(pub serde_yaml::Value);

impl HostConfig {
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            serde_yaml::Value::Null => true,
            serde_yaml::Value::Mapping(m) => m.is_empty(),
            _ => false,
        }
    }
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SuiteFile {
    pub name: Option<String>,
    pub suite: SuiteOptions,
    pub executor: ExecutorConfig,
    pub host: HostConfig,
}

impl SuiteFile {
    /// Reads and parses a configuration file, remembering its location in `suite.config`.
    ///
    /// 读取并解析配置文件，并在 `suite.config` 中记录其位置。
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = fs::canonicalize(path)
            .with_context(|| format!("Failed to locate config file: {}", path.display()))?;
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut file: SuiteFile = if content.trim().is_empty() {
            SuiteFile::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?
        };
        file.suite.config = Some(config_path);
        Ok(file)
    }

    /// The suite name: explicit name first, then the config file stem, then `default`.
    pub fn suite_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| {
                self.suite
                    .config
                    .as_deref()
                    .and_then(Path::file_stem)
                    .map(|s| s.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| DEFAULT_SUITE_NAME.to_string())
    }
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(PathBuf),
        Many(Vec<PathBuf>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(path) => vec![path],
        OneOrMany::Many(paths) => paths,
    })
}
