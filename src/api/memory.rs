//! 进程内的内存服务端
//!
//! 行为与参考 REST 服务端一致：服务端分配自增 ID，列表按创建时间倒序。
//! 用于 `--demo` 模式（无需启动后端）和同步层测试。

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use super::{ApiResult, NewTask, RequestFailure, Task, TaskApi, TaskPatch};

#[derive(Debug, Default)]
struct MemoryStore {
    /// 按创建顺序存储
    tasks: Vec<Task>,
    next_id: i64,
    /// 已收到的请求数
    requests: usize,
    /// 接下来 N 个请求直接失败
    fail_next: usize,
}

/// 内存服务端句柄（Clone 后共享同一份数据）
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskApi {
    store: Arc<Mutex<MemoryStore>>,
}

impl InMemoryTaskApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// 带初始任务的服务端（按给定顺序依次创建）
    pub fn with_titles(titles: &[&str]) -> Self {
        let api = Self::new();
        {
            let mut store = api.lock();
            for title in titles {
                store.next_id += 1;
                let id = store.next_id;
                store.tasks.push(Task {
                    id,
                    title: title.to_string(),
                    completed: false,
                });
            }
        }
        api
    }

    /// 已收到的请求数（包括失败的请求）
    #[cfg(test)]
    pub fn request_count(&self) -> usize {
        self.lock().requests
    }

    /// 让接下来的 `n` 个请求返回失败
    #[cfg(test)]
    pub fn fail_next(&self, n: usize) {
        self.lock().fail_next = n;
    }

    /// 服务端当前数据（服务端顺序）
    #[cfg(test)]
    pub fn snapshot(&self) -> Vec<Task> {
        self.lock().tasks.iter().rev().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryStore> {
        // 数据本身不会因 panic 处于不一致状态，直接取回
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 记录一次请求，必要时注入失败
    fn begin(&self, method: &str, path: String) -> ApiResult<MutexGuard<'_, MemoryStore>> {
        let mut store = self.lock();
        store.requests += 1;
        debug!(method, %path, request = store.requests, "memory api request");
        if store.fail_next > 0 {
            store.fail_next -= 1;
            return Err(RequestFailure::new(
                method,
                format!("memory://{}", path),
                "injected failure",
            ));
        }
        Ok(store)
    }
}

impl TaskApi for InMemoryTaskApi {
    fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        let store = self.begin("GET", "/api/tasks/".to_string())?;
        Ok(store.tasks.iter().rev().cloned().collect())
    }

    fn create_task(&self, task: &NewTask) -> ApiResult<()> {
        let mut store = self.begin("POST", "/api/tasks/".to_string())?;
        if task.title.trim().is_empty() {
            return Err(RequestFailure::new(
                "POST",
                "memory:///api/tasks/",
                "HTTP 400 Bad Request",
            ));
        }
        store.next_id += 1;
        let id = store.next_id;
        store.tasks.push(Task {
            id,
            title: task.title.clone(),
            completed: task.completed,
        });
        Ok(())
    }

    fn update_task(&self, id: i64, patch: &TaskPatch) -> ApiResult<()> {
        let path = format!("/api/tasks/{}/", id);
        let mut store = self.begin("PATCH", path.clone())?;
        match store.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = patch.completed;
                Ok(())
            }
            None => Err(RequestFailure::new(
                "PATCH",
                format!("memory://{}", path),
                "HTTP 404 Not Found",
            )),
        }
    }

    fn delete_task(&self, id: i64) -> ApiResult<()> {
        let path = format!("/api/tasks/{}/", id);
        let mut store = self.begin("DELETE", path.clone())?;
        let before = store.tasks.len();
        store.tasks.retain(|t| t.id != id);
        if store.tasks.len() == before {
            return Err(RequestFailure::new(
                "DELETE",
                format!("memory://{}", path),
                "HTTP 404 Not Found",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_assigned_in_order() {
        let api = InMemoryTaskApi::new();
        api.create_task(&NewTask::new("first")).unwrap();
        api.create_task(&NewTask::new("second")).unwrap();

        let tasks = api.list_tasks().unwrap();
        assert_eq!(tasks[0].id, 2);
        assert_eq!(tasks[1].id, 1);
        assert_eq!(tasks[1].title, "first");
    }

    #[test]
    fn test_fail_next_counts_down() {
        let api = InMemoryTaskApi::with_titles(&["a"]);
        api.fail_next(1);

        let err = api.list_tasks().unwrap_err();
        assert_eq!(err.reason, "injected failure");
        assert_eq!(api.list_tasks().unwrap().len(), 1);
        assert_eq!(api.request_count(), 2);
    }

    #[test]
    fn test_missing_id_is_not_found() {
        let api = InMemoryTaskApi::new();
        let err = api.update_task(9, &TaskPatch { completed: true }).unwrap_err();
        assert!(err.reason.contains("404"));
        assert!(api.delete_task(9).is_err());
    }

    #[test]
    fn test_clones_share_store() {
        let api = InMemoryTaskApi::new();
        let handle = api.clone();
        api.create_task(&NewTask::new("shared")).unwrap();
        assert_eq!(handle.snapshot().len(), 1);
    }
}
