//! # Ordering Policy / 排序策略
//!
//! Puts discovered test files into execution order, either lexicographically
//! or as a seeded shuffle that can be replayed with the same seed.
//!
//! 将发现的测试文件排列为执行顺序：按字典序，或使用可通过相同种子重放的随机打乱。

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use std::path::PathBuf;

/// How the execution order is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderMode {
    /// Sort by raw path bytes.
    #[default]
    Lexicographic,
    /// Shuffle. `None` seeds from the current time.
    Random { seed: Option<u64> },
}

/// Files in execution order plus the seed that produced them, if any.
/// 按执行顺序排列的文件，以及生成该顺序的种子（如有）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOrder {
    pub files: Vec<PathBuf>,
    pub seed: Option<u64>,
}

pub fn order(mut files: Vec<PathBuf>, mode: OrderMode) -> ExecutionOrder {
    match mode {
        OrderMode::Lexicographic => {
            files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
            ExecutionOrder { files, seed: None }
        }
        OrderMode::Random { seed } => {
            let seed = seed.unwrap_or_else(time_seed);
            ExecutionOrder {
                files: shuffle(files, seed),
                seed: Some(seed),
            }
        }
    }
}

/// Gives every file a random key from a generator seeded with `seed`, then
/// sorts by key. The sort is stable, so equal keys keep discovery order.
///
/// 使用以 `seed` 初始化的生成器为每个文件分配随机键，然后按键排序。
pub fn shuffle(files: Vec<PathBuf>, seed: u64) -> Vec<PathBuf> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut keyed: Vec<(u64, PathBuf)> = files
        .into_iter()
        .map(|file| (rng.random::<u64>(), file))
        .collect();
    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, file)| file).collect()
}

fn time_seed() -> u64 {
    Utc::now().timestamp().unsigned_abs()
}
