//! # Output Sink Module / 输出接收器模块
//!
//! A [`Sink`] is the explicit "active output" of a suite phase. Instead of
//! swapping the process-wide stdout/stderr, every component that produces
//! output writes through the sink it was handed. A sink may fan out to
//! several targets at once (a tee): console targets are painted with
//! `colored`, file targets always receive plain text.
//!
//! [`Sink`] 是套件某一阶段显式的“当前输出”。组件不再替换进程级的 stdout/stderr，
//! 而是写入传给它们的接收器。一个接收器可以同时输出到多个目标（tee）：
//! 控制台目标使用 `colored` 着色，文件目标始终接收纯文本。

use anyhow::{Context, Result};
use colored::*;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Presentation level of a message.
/// 消息的展示级别。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Info,
    Pass,
    Fail,
    Error,
}

impl Tone {
    fn paint(&self, msg: &str) -> String {
        match self {
            Tone::Plain => msg.to_string(),
            Tone::Info => msg.blue().to_string(),
            Tone::Pass => msg.green().to_string(),
            Tone::Fail => msg.red().to_string(),
            Tone::Error => msg.yellow().to_string(),
        }
    }
}

struct Target {
    writer: Box<dyn Write + Send>,
    colored: bool,
}

/// A set of output targets written to in lockstep.
pub struct Sink {
    targets: Vec<Target>,
}

impl Sink {
    /// A sink that writes nowhere.
    pub fn null() -> Self {
        Self {
            targets: Vec::new(),
        }
    }

    /// The original console (stdout), with colors.
    pub fn console() -> Self {
        Self::null().with_writer(io::stdout(), true)
    }

    /// A freshly truncated file.
    pub fn file(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;
        Ok(Self::null().with_writer(BufWriter::new(file), false))
    }

    /// A freshly truncated file plus the console.
    /// 新建（截断）的文件加上控制台。
    pub fn tee(path: &Path) -> Result<Self> {
        Ok(Self::file(path)?.with_writer(io::stdout(), true))
    }

    /// An existing file opened for appending.
    pub fn append(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file for appending: {}", path.display()))?;
        Ok(Self::null().with_writer(BufWriter::new(file), false))
    }

    /// Adds another target. `colored` selects painted or plain text for it.
    pub fn with_writer(mut self, writer: impl Write + Send + 'static, colored: bool) -> Self {
        self.targets.push(Target {
            writer: Box::new(writer),
            colored,
        });
        self
    }

    pub fn is_null(&self) -> bool {
        self.targets.is_empty()
    }

    /// Writes one plain line.
    pub fn notify(&mut self, msg: &str) -> io::Result<()> {
        self.say(Tone::Plain, msg)
    }

    /// Writes one line in the given tone.
    pub fn say(&mut self, tone: Tone, msg: &str) -> io::Result<()> {
        for target in &mut self.targets {
            if target.colored {
                writeln!(target.writer, "{}", tone.paint(msg))?;
            } else {
                writeln!(target.writer, "{}", msg)?;
            }
        }
        Ok(())
    }

    pub fn error(&mut self, msg: &str) -> io::Result<()> {
        self.say(Tone::Fail, msg)
    }

    /// Writes captured output verbatim, adding a trailing newline when missing.
    pub fn write_raw(&mut self, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        for target in &mut self.targets {
            target.writer.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                target.writer.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        for target in &mut self.targets {
            target.writer.flush()?;
        }
        Ok(())
    }

    /// Flushes and releases every target.
    /// 刷新并释放所有目标。
    pub fn close(mut self) -> io::Result<()> {
        self.flush()
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink")
            .field("targets", &self.targets.len())
            .finish_non_exhaustive()
    }
}
