//! # Reporting Unit Tests / 报告单元测试
//!
//! Tests for summary aggregation and rendering, the host configuration dump
//! and the output sink the report is written through.
//!
//! 测试摘要的聚合与渲染、主机配置转储以及写入报告所用的输出接收器。

mod common;

use chrono::Local;
use common::SharedBuf;
use suite_runner::config::HostConfig;
use suite_runner::infra::sink::{Sink, Tone};
use suite_runner::models::{TestOutcome, TestRecord};
use suite_runner::reporting::{ConfigDumper, Summary, YamlConfigDumper};

fn records() -> Vec<TestRecord> {
    vec![
        TestRecord::new("tests/a_test.sh", TestOutcome::passed()),
        TestRecord::new("tests/b_test.sh", TestOutcome::failed("exited with status 1")),
        TestRecord::new("tests/c_test.sh", TestOutcome::errored("timed out after 30s")),
        TestRecord::new("tests/d_test.sh", TestOutcome::failed("exited with status 2")),
    ]
}

#[cfg(test)]
mod summary_tests {
    use super::*;

    #[test]
    fn test_groups_failures_and_errors_in_order() {
        let records = records();
        let summary = Summary::new(Local::now(), &records);

        let failed: Vec<_> = summary.failed().iter().map(|r| r.file.clone()).collect();
        let errored: Vec<_> = summary.errored().iter().map(|r| r.file.clone()).collect();

        assert_eq!(failed, vec![records[1].file.clone(), records[3].file.clone()]);
        assert_eq!(errored, vec![records[2].file.clone()]);
        assert_eq!(summary.counts().attempted(), 4);
        assert_eq!(summary.counts().passed, 1);
        assert_eq!(summary.counts().failed, 2);
        assert_eq!(summary.counts().errored, 1);
    }

    #[test]
    fn test_render_layout() {
        let records = records();
        let summary = Summary::new(Local::now(), &records);

        let text = summary.render("  os: linux");
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("Test Pass Started: "));
        assert_eq!(lines[2], "- Host Configuration Summary -");
        assert_eq!(lines[3], "  os: linux");
        assert_eq!(
            &lines[5..10],
            &[
                "- Test Case Summary -",
                "Attempted: 4",
                "   Passed: 1",
                "   Failed: 2",
                "  Errored: 1",
            ]
        );
        assert_eq!(
            &lines[11..],
            &[
                "- Specific Test Case Status -",
                "Failed Test Cases:",
                "  Test Case tests/b_test.sh reported: exited with status 1",
                "  Test Case tests/d_test.sh reported: exited with status 2",
                "Errored Test Cases:",
                "  Test Case tests/c_test.sh reported: timed out after 30s",
            ]
        );
    }

    #[test]
    fn test_all_passing_run_has_empty_sections() {
        let records = vec![TestRecord::new("tests/a_test.sh", TestOutcome::passed())];
        let summary = Summary::new(Local::now(), &records);

        let text = summary.render("");

        assert!(text.ends_with("Failed Test Cases:\nErrored Test Cases:\n"));
        assert!(summary.counts().is_success());
    }

    #[test]
    fn test_write_to_sink() {
        let records = records();
        let buf = SharedBuf::default();
        let mut sink = Sink::null().with_writer(buf.clone(), false);

        Summary::new(Local::now(), &records)
            .write_to(&mut sink, "  none")
            .unwrap();

        assert!(buf.contents().contains("Attempted: 4\n"));
    }
}

#[cfg(test)]
mod config_dump_tests {
    use super::*;

    #[test]
    fn test_empty_host_config() {
        assert_eq!(
            YamlConfigDumper.dump(&HostConfig::default()),
            "  (no host configuration)"
        );
    }

    #[test]
    fn test_host_config_is_indented_yaml() {
        let host: HostConfig = serde_yaml::from_str("os: linux\ndb:\n  port: 5432\n").unwrap();

        let dump = YamlConfigDumper.dump(&host);

        assert_eq!(dump, "  os: linux\n  db:\n    port: 5432");
    }
}

#[cfg(test)]
mod sink_tests {
    use super::*;

    #[test]
    fn test_tee_writes_every_target() {
        let file = SharedBuf::default();
        let console = SharedBuf::default();
        let mut sink = Sink::null()
            .with_writer(file.clone(), false)
            .with_writer(console.clone(), true);

        sink.say(Tone::Pass, "tests/a_test.sh passed").unwrap();
        sink.close().unwrap();

        assert_eq!(file.contents(), "tests/a_test.sh passed\n");
        assert!(console.contents().contains("tests/a_test.sh passed"));
    }

    #[test]
    fn test_plain_targets_never_get_color_codes() {
        colored::control::set_override(true);
        let file = SharedBuf::default();
        let mut sink = Sink::null().with_writer(file.clone(), false);

        sink.error("Failed while running the smoke suite...").unwrap();

        assert!(!file.contents().contains('\u{1b}'));
    }

    #[test]
    fn test_write_raw_terminates_lines() {
        let buf = SharedBuf::default();
        let mut sink = Sink::null().with_writer(buf.clone(), false);

        sink.write_raw("no newline").unwrap();
        sink.write_raw("").unwrap();
        sink.write_raw("with newline\n").unwrap();

        assert_eq!(buf.contents(), "no newline\nwith newline\n");
    }

    #[test]
    fn test_null_sink_accepts_everything() {
        let mut sink = Sink::null();
        assert!(sink.is_null());
        sink.notify("dropped").unwrap();
        sink.close().unwrap();
    }
}
