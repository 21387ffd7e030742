//! # Reporting Module / 报告模块
//!
//! This module aggregates recorded outcomes into a summary and renders it,
//! together with a dump of the host configuration, into an output sink.
//!
//! 此模块将记录的结果聚合为摘要，并将其与主机配置的转储一起渲染到输出接收器中。

pub mod config_dump;
pub mod summary;

// Re-export common reporting items
pub use config_dump::{ConfigDumper, YamlConfigDumper};
pub use summary::Summary;
