//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Suite Runner: the data
//! model, configuration, test file discovery and ordering, the run loop and
//! the suite controller that ties them together.
//!
//! 此模块包含 Suite Runner 的核心功能：数据模型、配置、
//! 测试文件的发现与排序、运行循环以及将它们组合在一起的套件控制器。

pub mod config;
pub mod discovery;
pub mod error;
pub mod execution;
pub mod models;
pub mod ordering;
pub mod run_loop;
pub mod suite;

// Re-exports
pub use error::SuiteError;
pub use models::{TestOutcome, TestRecord, TestStatus};
pub use suite::TestSuite;
