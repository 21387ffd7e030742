//! Renders the host configuration for the summary.

use crate::core::config::HostConfig;

/// Turns the opaque host configuration into report text.
/// 将不透明的主机配置转换为报告文本。
pub trait ConfigDumper {
    fn dump(&self, config: &HostConfig) -> String;
}

/// Dumps the host configuration as indented YAML.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlConfigDumper;

impl ConfigDumper for YamlConfigDumper {
    fn dump(&self, config: &HostConfig) -> String {
        if config.is_empty() {
            return "  (no host configuration)".to_string();
        }
        let yaml = serde_yaml::to_string(&config.0).unwrap_or_else(|e| {
            format!("<unprintable host configuration: {e}>")
        });
        yaml.lines()
            .map(|line| format!("  {line}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
