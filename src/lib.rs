//! # Suite Runner Library / Suite Runner 库
//!
//! This library provides the core functionality for the Suite Runner tool,
//! a configuration-driven orchestrator that discovers test files, runs them in
//! a reproducible order and keeps timestamped run logs.
//!
//! 此库为 Suite Runner 工具提供核心功能，
//! 这是一个配置驱动的编排器，负责发现测试文件、以可复现的顺序运行它们并保留带时间戳的运行日志。
//!
//! ## Modules / 模块
//!
//! - `core` - Data models, discovery, ordering, execution and the suite controller
//! - `infra` - Infrastructure services like process spawning, output sinks and log directories
//! - `reporting` - Summary aggregation and rendering
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 数据模型、发现、排序、执行以及套件控制器
//! - `infra` - 基础设施服务，如进程派生、输出接收器和日志目录
//! - `reporting` - 摘要聚合与渲染
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::config;
pub use core::error::SuiteError;
pub use core::execution::{CommandExecutor, TestExecutor};
pub use core::models;
pub use core::suite::TestSuite;
