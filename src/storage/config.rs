//! 应用配置持久化
//!
//! `~/.sprout/config.toml`，文件不存在或格式错误时使用默认值。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{load_toml, save_toml, sprout_dir};
use crate::api::http::DEFAULT_BASE_URL;
use crate::error::Result;

/// 覆盖服务端地址的环境变量
pub const BASE_URL_ENV: &str = "SPROUT_API_URL";

/// 应用配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务端配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// 服务端 origin，如 "http://127.0.0.1:8000"
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// 主题配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_theme_name")]
    pub name: String,
}

fn default_theme_name() -> String {
    "Auto".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
        }
    }
}

/// 日志配置（`RUST_LOG` 优先）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// 获取配置文件路径
pub fn config_path() -> PathBuf {
    sprout_dir().join("config.toml")
}

/// 加载配置（不存在则返回默认值）
pub fn load_config() -> Config {
    load_config_from(&config_path())
}

/// 从指定路径加载配置
pub fn load_config_from(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    load_toml(path).unwrap_or_default()
}

/// 保存配置到指定路径
pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    save_toml(path, config)
}

/// 确定服务端地址: 命令行参数 > 环境变量 > 配置文件
pub fn resolve_base_url(cli: Option<&str>, env: Option<String>, config: &Config) -> String {
    let non_blank = |url: &String| !url.trim().is_empty();
    cli.map(str::to_string)
        .filter(non_blank)
        .or_else(|| env.filter(non_blank))
        .unwrap_or_else(|| config.api.base_url.clone())
}
