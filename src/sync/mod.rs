//! 任务列表同步控制器
//!
//! 控制器持有任务列表的内存副本，所有修改都发往服务端，成功后整体重新拉取
//! 列表（不做本地合并）。请求在 [`worker::SyncWorker`] 线程上按提交顺序执行，
//! UI 线程每帧调用 [`TaskListController::poll`] 应用结果。
//!
//! 失败只写日志，不重试，也不在界面上提示。

pub mod worker;

use tracing::{debug, error, info, warn};

use crate::api::{NewTask, RequestFailure, Task, TaskApi};
use worker::{Job, Outcome, SyncWorker};

/// 任务列表控制器
#[derive(Debug)]
pub struct TaskListController {
    /// 服务端最近一次返回的列表（保持服务端顺序）
    tasks: Vec<Task>,
    /// 首次拉取结果返回之前为 true
    loading: bool,
    /// 输入框中待创建的标题
    pub draft_title: String,
    worker: SyncWorker,
    /// 已提交但尚未收到结果的请求数
    in_flight: usize,
    /// 累计失败请求数（仅用于日志/CLI 退出码）
    failed_requests: usize,
    /// 最近一次失败（界面不展示，一次性 CLI 命令用它决定退出码）
    last_failure: Option<RequestFailure>,
}

impl TaskListController {
    /// 创建控制器并启动 worker（不会自动拉取，调用方决定何时 refresh）
    pub fn new<A: TaskApi + 'static>(api: A) -> Self {
        Self {
            tasks: Vec::new(),
            loading: true,
            draft_title: String::new(),
            worker: SyncWorker::spawn(api),
            in_flight: 0,
            failed_requests: 0,
            last_failure: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn failed_requests(&self) -> usize {
        self.failed_requests
    }

    pub fn last_failure(&self) -> Option<&RequestFailure> {
        self.last_failure.as_ref()
    }

    /// 已完成任务数
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    // ========== Operations ==========

    /// 重新拉取整个任务列表，worker 已退出时返回 false
    pub fn refresh(&mut self) -> bool {
        self.dispatch(Job::Fetch)
    }

    /// 创建任务；空标题或纯空白标题不发请求，返回 false
    pub fn create(&mut self, title: &str) -> bool {
        if title.trim().is_empty() {
            debug!("ignoring blank task title");
            return false;
        }
        self.dispatch(Job::Create(NewTask::new(title)))
    }

    /// 用输入框内容创建任务
    pub fn submit_draft(&mut self) -> bool {
        let title = self.draft_title.clone();
        self.create(&title)
    }

    /// 把 `completed` 设为 `!current_status`，本地状态在重新拉取前不变
    pub fn toggle_complete(&mut self, id: i64, current_status: bool) -> bool {
        self.dispatch(Job::SetCompleted {
            id,
            completed: !current_status,
        })
    }

    /// 删除任务
    pub fn remove(&mut self, id: i64) -> bool {
        self.dispatch(Job::Delete(id))
    }

    // ========== Result handling ==========

    /// 应用所有已返回的结果（非阻塞），返回应用的数量
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Some(outcome) = self.worker.try_recv() {
            self.apply(outcome);
            applied += 1;
        }
        applied
    }

    /// 阻塞直到所有请求（包括修改成功后触发的 refresh）都返回
    pub fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.worker.recv() {
                Some(outcome) => self.apply(outcome),
                None => {
                    warn!(pending = self.in_flight, "sync worker exited with requests pending");
                    self.in_flight = 0;
                }
            }
        }
    }

    fn dispatch(&mut self, job: Job) -> bool {
        if self.worker.send(job) {
            self.in_flight += 1;
            true
        } else {
            self.failed_requests += 1;
            error!("sync worker is gone, request dropped");
            false
        }
    }

    fn apply(&mut self, outcome: Outcome) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match outcome {
            Outcome::Fetched(Ok(tasks)) => {
                debug!(count = tasks.len(), "tasks refreshed");
                self.tasks = tasks;
                self.loading = false;
            }
            Outcome::Fetched(Err(e)) => {
                self.report("Error fetching tasks", &e);
                self.loading = false;
            }
            Outcome::Created(Ok(())) => {
                info!("task created");
                self.draft_title.clear();
                self.refresh();
            }
            Outcome::Created(Err(e)) => self.report("Error adding task", &e),
            Outcome::Updated { id, result } => match result {
                Ok(()) => {
                    info!(id, "task updated");
                    self.refresh();
                }
                Err(e) => self.report("Error updating task", &e),
            },
            Outcome::Deleted { id, result } => match result {
                Ok(()) => {
                    info!(id, "task deleted");
                    self.refresh();
                }
                Err(e) => self.report("Error deleting task", &e),
            },
        }
    }

    fn report(&mut self, context: &str, failure: &RequestFailure) {
        self.failed_requests += 1;
        error!(
            method = %failure.method,
            url = %failure.url,
            reason = %failure.reason,
            "{}",
            context
        );
        self.last_failure = Some(failure.clone());
    }
}

// ============================================================================
// Tests
// ============================================================================
