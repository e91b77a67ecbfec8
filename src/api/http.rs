//! 基于 ureq 的 REST 客户端
//!
//! 阻塞调用，只在同步 worker 线程上执行。不设超时、不重试、不带认证头。

use super::{ApiResult, NewTask, RequestFailure, Task, TaskApi, TaskPatch};

/// 默认服务端地址
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// 访问 `{base}/api/tasks/` 的 HTTP 客户端
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpTaskApi {
    pub fn new(base_url: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(concat!("sprout/", env!("CARGO_PKG_VERSION")))
            .build();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 集合端点（注意末尾的 `/`，服务端路由要求）
    pub fn collection_url(&self) -> String {
        format!("{}/api/tasks/", self.base_url)
    }

    /// 单项端点
    pub fn item_url(&self, id: i64) -> String {
        format!("{}/api/tasks/{}/", self.base_url, id)
    }
}

/// 把 ureq 错误统一转换为 RequestFailure
fn failure(method: &str, url: &str, err: ureq::Error) -> RequestFailure {
    let reason = match err {
        ureq::Error::Status(code, response) => {
            format!("HTTP {} {}", code, response.status_text())
        }
        ureq::Error::Transport(transport) => transport.to_string(),
    };
    RequestFailure::new(method, url, reason)
}

impl TaskApi for HttpTaskApi {
    fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        let url = self.collection_url();
        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| failure("GET", &url, e))?;

        response
            .into_json::<Vec<Task>>()
            .map_err(|e| RequestFailure::new("GET", &url, format!("invalid response body: {}", e)))
    }

    fn create_task(&self, task: &NewTask) -> ApiResult<()> {
        let url = self.collection_url();
        self.agent
            .post(&url)
            .send_json(task)
            .map_err(|e| failure("POST", &url, e))?;
        Ok(())
    }

    fn update_task(&self, id: i64, patch: &TaskPatch) -> ApiResult<()> {
        let url = self.item_url(id);
        self.agent
            .request("PATCH", &url)
            .send_json(patch)
            .map_err(|e| failure("PATCH", &url, e))?;
        Ok(())
    }

    fn delete_task(&self, id: i64) -> ApiResult<()> {
        let url = self.item_url(id);
        self.agent
            .delete(&url)
            .call()
            .map_err(|e| failure("DELETE", &url, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        routing::{get, patch},
        Json, Router,
    };

    // ========================================================================
    // 本地 REST 服务端（行为与参考服务端一致：列表按创建时间倒序）
    // ========================================================================

    #[derive(Default)]
    struct Store {
        tasks: Vec<Task>,
        next_id: i64,
    }

    type Shared = Arc<Mutex<Store>>;

    async fn list(State(store): State<Shared>) -> Json<Vec<Task>> {
        let store = store.lock().unwrap();
        Json(store.tasks.iter().rev().cloned().collect())
    }

    async fn create(
        State(store): State<Shared>,
        Json(body): Json<NewTask>,
    ) -> Result<(StatusCode, Json<Task>), StatusCode> {
        if body.title.trim().is_empty() {
            return Err(StatusCode::BAD_REQUEST);
        }
        let mut store = store.lock().unwrap();
        store.next_id += 1;
        let task = Task {
            id: store.next_id,
            title: body.title,
            completed: body.completed,
        };
        store.tasks.push(task.clone());
        Ok((StatusCode::CREATED, Json(task)))
    }

    async fn update(
        State(store): State<Shared>,
        Path(id): Path<i64>,
        Json(body): Json<TaskPatch>,
    ) -> Result<Json<Task>, StatusCode> {
        let mut store = store.lock().unwrap();
        let task = store
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StatusCode::NOT_FOUND)?;
        task.completed = body.completed;
        Ok(Json(task.clone()))
    }

    async fn remove(State(store): State<Shared>, Path(id): Path<i64>) -> StatusCode {
        let mut store = store.lock().unwrap();
        let before = store.tasks.len();
        store.tasks.retain(|t| t.id != id);
        if store.tasks.len() < before {
            StatusCode::NO_CONTENT
        } else {
            StatusCode::NOT_FOUND
        }
    }

    async fn broken() -> &'static str {
        "<html>not json</html>"
    }

    /// 在后台线程启动服务端，返回 base url
    fn spawn_server() -> String {
        let store: Shared = Arc::default();
        let app = Router::new()
            .route("/api/tasks/", get(list).post(create))
            .route("/api/tasks/{id}/", patch(update).delete(remove))
            .route("/broken/api/tasks/", get(broken))
            .with_state(store);

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        listener.set_nonblocking(true).unwrap();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });

        format!("http://{}", addr)
    }

    #[test]
    fn test_endpoint_urls() {
        let api = HttpTaskApi::new("http://127.0.0.1:8000/");
        assert_eq!(api.base_url(), "http://127.0.0.1:8000");
        assert_eq!(api.collection_url(), "http://127.0.0.1:8000/api/tasks/");
        assert_eq!(api.item_url(7), "http://127.0.0.1:8000/api/tasks/7/");
    }

    #[test]
    fn test_crud_against_server() {
        let api = HttpTaskApi::new(&spawn_server());

        assert!(api.list_tasks().unwrap().is_empty());

        api.create_task(&NewTask::new("Buy milk")).unwrap();
        api.create_task(&NewTask::new("Walk dog")).unwrap();

        let tasks = api.list_tasks().unwrap();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Walk dog", "Buy milk"]);
        assert!(tasks.iter().all(|t| !t.completed));

        api.update_task(1, &TaskPatch { completed: true }).unwrap();
        let milk = api
            .list_tasks()
            .unwrap()
            .into_iter()
            .find(|t| t.id == 1)
            .unwrap();
        assert!(milk.completed);

        api.delete_task(1).unwrap();
        let tasks = api.list_tasks().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, 2);
    }

    #[test]
    fn test_non_2xx_is_request_failure() {
        let api = HttpTaskApi::new(&spawn_server());

        let err = api.delete_task(42).unwrap_err();
        assert_eq!(err.method, "DELETE");
        assert!(err.url.ends_with("/api/tasks/42/"));
        assert!(err.reason.contains("404"));

        let err = api.create_task(&NewTask::new("   ")).unwrap_err();
        assert_eq!(err.method, "POST");
        assert!(err.reason.contains("400"));
    }

    #[test]
    fn test_invalid_body_is_request_failure() {
        let base = format!("{}/broken", spawn_server());
        let api = HttpTaskApi::new(&base);

        let err = api.list_tasks().unwrap_err();
        assert_eq!(err.method, "GET");
        assert!(err.reason.starts_with("invalid response body"));
    }

    #[test]
    fn test_connection_refused_is_request_failure() {
        // 绑定后立即释放，拿到一个大概率无人监听的端口
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let api = HttpTaskApi::new(&format!("http://127.0.0.1:{}", port));

        let err = api.list_tasks().unwrap_err();
        assert_eq!(err.method, "GET");
        assert!(!err.reason.is_empty());
    }
}
