//! 日志初始化
//!
//! TUI 独占终端，日志写入 `~/.sprout/logs/sprout.log`；
//! 一次性 CLI 命令直接写 stderr。级别取 `RUST_LOG`，否则取配置文件。

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{Result, SproutError};
use crate::storage;

/// 日志输出位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// ~/.sprout/logs/sprout.log
    File,
    Stderr,
}

/// 日志文件名
const LOG_FILE: &str = "sprout.log";

/// 安装全局 subscriber，返回日志文件路径（写 stderr 时为 None）
pub fn init(target: LogTarget, default_level: &str) -> Result<Option<PathBuf>> {
    let filter = build_filter(default_level);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match target {
        LogTarget::Stderr => {
            builder
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| SproutError::Logging(e.to_string()))?;
            Ok(None)
        }
        LogTarget::File => {
            let path = storage::ensure_logs_dir()?.join(LOG_FILE);
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| SproutError::Logging(e.to_string()))?;
            Ok(Some(path))
        }
    }
}

/// `RUST_LOG` > 配置级别 > info
fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
