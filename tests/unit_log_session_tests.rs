//! # Log Session Unit Tests / 日志会话单元测试
//!
//! Tests for the timestamped log directory, the `latest` alias and the
//! run-log / summary files.
//!
//! 测试带时间戳的日志目录、`latest` 别名以及运行日志/摘要文件。

use chrono::{Local, TimeZone};
use std::fs;
use suite_runner::infra::log_session::{
    CONFIG_COPY_NAME, LATEST_ALIAS, LogSession, run_log_name, summary_name,
};
use tempfile::TempDir;

fn at(hour: u32, minute: u32) -> chrono::DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 10, 19, hour, minute, 0)
        .single()
        .unwrap()
}

#[cfg(test)]
mod directory_tests {
    use super::*;

    #[test]
    fn test_directory_is_created_once() {
        let temp_dir = TempDir::new().unwrap();
        let session = LogSession::new(temp_dir.path().join("log"), at(9, 30), None);

        assert!(!session.dir().exists());
        assert!(session.ensure_dir().unwrap());
        assert!(session.dir().is_dir());
        assert!(!session.ensure_dir().unwrap());
        assert!(!session.ensure_dir().unwrap());
    }

    #[test]
    fn test_directory_name_is_sortable_timestamp() {
        let session = LogSession::new("log", at(9, 30), None);
        assert_eq!(
            session.dir().file_name().unwrap().to_string_lossy(),
            "2026-10-19_09-30-00.000000"
        );
        assert!(LogSession::new("log", at(9, 30), None).dir() < LogSession::new("log", at(10, 5), None).dir());
    }

    #[test]
    fn test_config_is_copied_on_creation() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("suite.yml");
        fs::write(&config, "name: smoke\n").unwrap();
        let session = LogSession::new(temp_dir.path().join("log"), at(9, 30), Some(config));

        session.ensure_dir().unwrap();

        let copied = fs::read_to_string(session.dir().join(CONFIG_COPY_NAME)).unwrap();
        assert_eq!(copied, "name: smoke\n");
    }

    #[test]
    fn test_missing_config_fails_setup() {
        let temp_dir = TempDir::new().unwrap();
        let session = LogSession::new(
            temp_dir.path().join("log"),
            at(9, 30),
            Some(temp_dir.path().join("missing.yml")),
        );
        assert!(session.ensure_dir().is_err());
    }
}

#[cfg(all(test, unix))]
mod latest_alias_tests {
    use super::*;

    #[test]
    fn test_latest_points_at_most_recent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("log");
        let first = LogSession::new(&root, at(9, 30), None);
        let second = LogSession::new(&root, at(9, 31), None);

        first.ensure_dir().unwrap();
        assert_eq!(
            fs::read_link(root.join(LATEST_ALIAS)).unwrap(),
            first.dir().file_name().unwrap()
        );

        second.ensure_dir().unwrap();
        assert_eq!(
            fs::read_link(root.join(LATEST_ALIAS)).unwrap(),
            second.dir().file_name().unwrap()
        );
        assert!(first.dir().is_dir());
    }

    #[test]
    fn test_existing_directory_does_not_move_latest() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("log");
        let first = LogSession::new(&root, at(9, 30), None);
        let second = LogSession::new(&root, at(9, 31), None);
        first.ensure_dir().unwrap();
        second.ensure_dir().unwrap();

        // Asking the older session again finds its directory and leaves the alias alone.
        assert!(!first.ensure_dir().unwrap());
        assert_eq!(
            fs::read_link(root.join(LATEST_ALIAS)).unwrap(),
            second.dir().file_name().unwrap()
        );
    }

    #[test]
    fn test_real_directory_named_latest_is_not_removed() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("log");
        fs::create_dir_all(root.join(LATEST_ALIAS)).unwrap();
        let session = LogSession::new(&root, at(9, 30), None);

        let err = session.ensure_dir().unwrap_err();

        assert!(err.to_string().contains("not a symlink"));
        assert!(root.join(LATEST_ALIAS).is_dir());
    }

    #[test]
    fn test_log_paths_go_through_latest() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("log");
        let session = LogSession::new(&root, at(9, 30), None);

        let path = session.log_path("anything.txt").unwrap();

        assert_eq!(path, root.join(LATEST_ALIAS).join("anything.txt"));
        assert!(session.dir().is_dir());
    }

    #[test]
    fn test_run_log_and_summary_files() {
        let temp_dir = TempDir::new().unwrap();
        let session = LogSession::new(temp_dir.path().join("log"), at(9, 30), None);

        let (run_path, mut run_sink) = session.open_run_log("smoke", true).unwrap();
        run_sink.notify("hello run log").unwrap();
        run_sink.close().unwrap();
        let (summary_path, mut summary_sink) = session.open_summary("smoke").unwrap();
        summary_sink.notify("hello summary").unwrap();
        summary_sink.close().unwrap();

        assert_eq!(run_path, session.dir().join("run-smoke.log"));
        assert_eq!(summary_path, session.dir().join("smoke-summary.txt"));
        assert_eq!(
            fs::read_to_string(session.dir().join("run-smoke.log")).unwrap(),
            "hello run log\n"
        );
        assert_eq!(
            fs::read_to_string(session.dir().join("smoke-summary.txt")).unwrap(),
            "hello summary\n"
        );
    }
}

#[test]
fn test_file_names() {
    assert_eq!(run_log_name("nightly"), "run-nightly.log");
    assert_eq!(summary_name("nightly"), "nightly-summary.txt");
}
