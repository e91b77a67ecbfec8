//! 同步 worker 线程
//!
//! worker 独占 `TaskApi`，按提交顺序逐个执行请求，每个请求产生一个结果，
//! 通过 mpsc 通道回传给 UI 线程上的控制器。

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::debug;

use crate::api::{ApiResult, NewTask, Task, TaskApi, TaskPatch};

/// 提交给 worker 的请求
#[derive(Debug)]
pub enum Job {
    Fetch,
    Create(NewTask),
    SetCompleted { id: i64, completed: bool },
    Delete(i64),
    Shutdown,
}

/// 请求结果
#[derive(Debug)]
pub enum Outcome {
    Fetched(ApiResult<Vec<Task>>),
    Created(ApiResult<()>),
    Updated { id: i64, result: ApiResult<()> },
    Deleted { id: i64, result: ApiResult<()> },
}

/// 后台同步线程句柄
#[derive(Debug)]
pub struct SyncWorker {
    job_tx: Sender<Job>,
    outcome_rx: Receiver<Outcome>,
}

impl SyncWorker {
    /// 启动 worker 线程
    pub fn spawn<A: TaskApi + 'static>(api: A) -> Self {
        let (job_tx, job_rx) = mpsc::channel();
        let (outcome_tx, outcome_rx) = mpsc::channel();

        thread::spawn(move || {
            run_worker(api, job_rx, outcome_tx);
        });

        Self { job_tx, outcome_rx }
    }

    /// 提交请求，worker 已退出时返回 false
    pub fn send(&self, job: Job) -> bool {
        self.job_tx.send(job).is_ok()
    }

    /// 非阻塞地取一个结果
    pub fn try_recv(&self) -> Option<Outcome> {
        self.outcome_rx.try_recv().ok()
    }

    /// 阻塞等待下一个结果，worker 已退出时返回 None
    pub fn recv(&self) -> Option<Outcome> {
        self.outcome_rx.recv().ok()
    }
}

impl Drop for SyncWorker {
    fn drop(&mut self) {
        // 不 join：进行中的请求没有超时，退出时不等它
        let _ = self.job_tx.send(Job::Shutdown);
    }
}

fn run_worker<A: TaskApi>(api: A, job_rx: Receiver<Job>, outcome_tx: Sender<Outcome>) {
    for job in job_rx {
        let outcome = match job {
            Job::Shutdown => break,
            Job::Fetch => Outcome::Fetched(api.list_tasks()),
            Job::Create(task) => Outcome::Created(api.create_task(&task)),
            Job::SetCompleted { id, completed } => Outcome::Updated {
                id,
                result: api.update_task(id, &TaskPatch { completed }),
            },
            Job::Delete(id) => Outcome::Deleted {
                id,
                result: api.delete_task(id),
            },
        };

        if outcome_tx.send(outcome).is_err() {
            break;
        }
    }
    debug!("sync worker stopped");
}
