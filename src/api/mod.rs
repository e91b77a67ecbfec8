//! Task REST API 客户端
//!
//! [`TaskApi`] 是同步层与服务端之间唯一的接口：
//! - `HttpTaskApi`：通过 ureq 访问真实的 REST 服务
//! - `InMemoryTaskApi`：进程内的内存服务端（`--demo` 模式和测试使用）

pub mod http;
pub mod memory;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use http::HttpTaskApi;
pub use memory::InMemoryTaskApi;

/// 服务端拥有的任务实体（客户端只持有只读副本）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// 服务端分配的唯一 ID
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// 创建任务请求体: `{title, completed: false}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub completed: bool,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
        }
    }
}

/// 局部更新请求体: `{completed}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub completed: bool,
}

/// 任意网络请求失败（连接错误、非 2xx 响应、响应体无法解析）
///
/// 调用方统一处理：记录日志，不重试。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{method} {url} failed: {reason}")]
pub struct RequestFailure {
    pub method: String,
    pub url: String,
    pub reason: String,
}

impl RequestFailure {
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// API 调用结果
pub type ApiResult<T> = std::result::Result<T, RequestFailure>;

/// Task 集合/单项端点的访问接口
///
/// 实现运行在同步 worker 线程上，所以必须是 `Send`。
pub trait TaskApi: Send {
    /// `GET /api/tasks/` — 按服务端顺序返回全部任务
    fn list_tasks(&self) -> ApiResult<Vec<Task>>;

    /// `POST /api/tasks/`
    fn create_task(&self, task: &NewTask) -> ApiResult<()>;

    /// `PATCH /api/tasks/{id}/`
    fn update_task(&self, id: i64, patch: &TaskPatch) -> ApiResult<()>;

    /// `DELETE /api/tasks/{id}/`
    fn delete_task(&self, id: i64) -> ApiResult<()>;
}

impl<T: TaskApi + ?Sized> TaskApi for Box<T> {
    fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        (**self).list_tasks()
    }

    fn create_task(&self, task: &NewTask) -> ApiResult<()> {
        (**self).create_task(task)
    }

    fn update_task(&self, id: i64, patch: &TaskPatch) -> ApiResult<()> {
        (**self).update_task(id, patch)
    }

    fn delete_task(&self, id: i64) -> ApiResult<()> {
        (**self).delete_task(id)
    }
}
