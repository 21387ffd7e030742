//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for Suite Runner,
//! including process spawning, file system operations, output sinks
//! and the per-run log directory.
//!
//! 此模块为 Suite Runner 提供基础设施服务，
//! 包括进程派生、文件系统操作、输出接收器以及每次运行的日志目录。

pub mod command;
pub mod fs;
pub mod log_session;
pub mod sink;

pub use log_session::LogSession;
pub use sink::{Sink, Tone};
