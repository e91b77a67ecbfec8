//! Sprout 统一错误类型定义
//!
//! 使用 `thiserror` 库提供统一的错误处理，支持错误链式传播。
//! 网络请求相关的错误统一为 [`RequestFailure`]，定义在 `api` 模块。

use std::io;
use thiserror::Error;

use crate::api::RequestFailure;

/// Sprout 错误类型
#[derive(Debug, Error)]
pub enum SproutError {
    /// I/O 错误（配置文件、日志文件等）
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TOML 解析错误
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML 序列化错误
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// 资源不存在
    #[error("Not found: {0}")]
    NotFound(String),

    /// 无效输入
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 同步 worker 线程已退出，请求无法提交
    #[error("Sync error: {0}")]
    Sync(String),

    /// 日志初始化失败
    #[error("Logging error: {0}")]
    Logging(String),

    /// 网络请求失败
    #[error(transparent)]
    Request(#[from] RequestFailure),
}

/// Sprout Result 类型别名
pub type Result<T> = std::result::Result<T, SproutError>;

impl SproutError {
    /// 创建 NotFound 错误
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// 创建 InvalidInput 错误
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
