//! # Command Execution Module / 命令执行模块
//!
//! Spawns a child process and captures everything it writes.
//!
//! 派生子进程并捕获其全部输出。

use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::Mutex;

/// Spawns a command, captures its stdout and stderr.
/// The output streams are read concurrently and combined into a single string
/// in the order lines arrive.
///
/// # Arguments
/// * `cmd` - The `tokio::process::Command` to execute.
///
/// # Returns
/// A tuple containing:
/// - The `ExitStatus` of the process wrapped in an `io::Result`.
/// - The combined stdout and stderr as a `String`.
///
/// 派生一个命令，捕获其 stdout 和 stderr。
/// 输出流被并发读取，并按行到达的顺序合并到一个字符串中。
pub async fn spawn_and_capture(
    mut cmd: tokio::process::Command,
) -> (std::io::Result<ExitStatus>, String) {
    let mut child = match cmd.stdout(Stdio::piped()).stderr(Stdio::piped()).spawn() {
        Ok(child) => child,
        Err(e) => return (Err(e), String::new()),
    };

    let output = Arc::new(Mutex::new(String::new()));

    let stdout_handle = child
        .stdout
        .take()
        .map(|stdout| tokio::spawn(collect_lines(stdout, Arc::clone(&output))));
    let stderr_handle = child
        .stderr
        .take()
        .map(|stderr| tokio::spawn(collect_lines(stderr, Arc::clone(&output))));

    let status = child.wait().await;

    // Drain both readers so nothing written just before exit is lost.
    for handle in [stdout_handle, stderr_handle].into_iter().flatten() {
        if let Err(e) = handle.await {
            eprintln!("Failed to join output reader task: {}", e);
        }
    }

    let output = output.lock().await.clone();
    (status, output)
}

async fn collect_lines<R>(reader: R, output: Arc<Mutex<String>>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let mut output = output.lock().await;
        output.push_str(&line);
        output.push('\n');
    }
}
