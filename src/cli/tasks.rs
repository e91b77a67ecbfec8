//! 一次性任务命令（list / add / toggle / rm）
//!
//! 与 TUI 使用同一个控制器，只是每一步都阻塞等待请求完成。

use std::io::Write;

use crate::api::Task;
use crate::error::{Result, SproutError};
use crate::sync::TaskListController;

use super::TaskCommand;

/// 执行命令并把最新列表打印到 `out`
pub fn execute(
    command: &TaskCommand,
    controller: &mut TaskListController,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        TaskCommand::List => {
            ensure_dispatched(controller.refresh())?;
        }
        TaskCommand::Add { title } => {
            let title = title.join(" ");
            if title.trim().is_empty() {
                return Err(SproutError::invalid_input("task title cannot be empty"));
            }
            ensure_dispatched(controller.create(&title))?;
        }
        TaskCommand::Toggle { id } => {
            ensure_dispatched(controller.refresh())?;
            controller.settle();
            fail_on_request_error(controller)?;

            let completed = controller
                .task(*id)
                .map(|t| t.completed)
                .ok_or_else(|| SproutError::not_found(format!("task {}", id)))?;
            ensure_dispatched(controller.toggle_complete(*id, completed))?;
        }
        TaskCommand::Rm { id } => {
            ensure_dispatched(controller.remove(*id))?;
        }
    }

    controller.settle();
    fail_on_request_error(controller)?;

    print_tasks(controller.tasks(), out)?;
    Ok(())
}

/// 请求没能交给 worker（线程已退出）
fn ensure_dispatched(dispatched: bool) -> Result<()> {
    if dispatched {
        Ok(())
    } else {
        Err(SproutError::Sync("sync worker is not running".to_string()))
    }
}

fn fail_on_request_error(controller: &TaskListController) -> Result<()> {
    match controller.last_failure() {
        Some(failure) => Err(failure.clone().into()),
        None => Ok(()),
    }
}

/// 打印任务列表
pub fn print_tasks(tasks: &[Task], out: &mut impl Write) -> Result<()> {
    if tasks.is_empty() {
        writeln!(out, "No tasks yet")?;
        return Ok(());
    }
    for task in tasks {
        let mark = if task.completed { "x" } else { " " };
        writeln!(out, "[{}] {:>4}  {}", mark, task.id, task.title)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiResult, InMemoryTaskApi, NewTask, TaskApi, TaskPatch};

    /// 第一个请求就让 worker 线程 panic
    struct CrashingApi;

    impl TaskApi for CrashingApi {
        fn list_tasks(&self) -> ApiResult<Vec<Task>> {
            panic!("worker crashed")
        }

        fn create_task(&self, _task: &NewTask) -> ApiResult<()> {
            panic!("worker crashed")
        }

        fn update_task(&self, _id: i64, _patch: &TaskPatch) -> ApiResult<()> {
            panic!("worker crashed")
        }

        fn delete_task(&self, _id: i64) -> ApiResult<()> {
            panic!("worker crashed")
        }
    }

    /// worker 线程已经退出的控制器
    fn dead_controller() -> TaskListController {
        let mut controller = TaskListController::new(CrashingApi);
        controller.refresh();
        controller.settle();
        controller
    }

    fn run(api: &InMemoryTaskApi, command: TaskCommand) -> (Result<()>, String) {
        let mut controller = TaskListController::new(api.clone());
        let mut out = Vec::new();
        let result = execute(&command, &mut controller, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_list_prints_server_order() {
        let api = InMemoryTaskApi::with_titles(&["Buy milk", "Walk dog"]);
        let (result, out) = run(&api, TaskCommand::List);
        result.unwrap();
        assert_eq!(out, "[ ]    2  Walk dog\n[ ]    1  Buy milk\n");
    }

    #[test]
    fn test_list_empty() {
        let (result, out) = run(&InMemoryTaskApi::new(), TaskCommand::List);
        result.unwrap();
        assert_eq!(out, "No tasks yet\n");
    }

    #[test]
    fn test_add_joins_title() {
        let api = InMemoryTaskApi::new();
        let (result, out) = run(
            &api,
            TaskCommand::Add {
                title: vec!["Buy".into(), "milk".into()],
            },
        );
        result.unwrap();
        assert_eq!(out, "[ ]    1  Buy milk\n");
    }

    #[test]
    fn test_add_blank_title_is_rejected_without_request() {
        let api = InMemoryTaskApi::new();
        let (result, out) = run(
            &api,
            TaskCommand::Add {
                title: vec!["  ".into()],
            },
        );
        assert!(matches!(result, Err(SproutError::InvalidInput(_))));
        assert!(out.is_empty());
        assert_eq!(api.request_count(), 0);
    }

    #[test]
    fn test_dead_worker_is_not_reported_as_blank_title() {
        let commands = [
            TaskCommand::List,
            TaskCommand::Add {
                title: vec!["Buy".into(), "milk".into()],
            },
            TaskCommand::Toggle { id: 1 },
            TaskCommand::Rm { id: 1 },
        ];
        for command in commands {
            let mut controller = dead_controller();
            let mut out = Vec::new();
            let result = execute(&command, &mut controller, &mut out);
            assert!(
                matches!(result, Err(SproutError::Sync(_))),
                "{:?} gave {:?}",
                command,
                result
            );
            assert!(out.is_empty());
        }
    }

    #[test]
    fn test_toggle_flips_current_status() {
        let api = InMemoryTaskApi::with_titles(&["Buy milk"]);
        let (result, out) = run(&api, TaskCommand::Toggle { id: 1 });
        result.unwrap();
        assert_eq!(out, "[x]    1  Buy milk\n");

        let (result, out) = run(&api, TaskCommand::Toggle { id: 1 });
        result.unwrap();
        assert_eq!(out, "[ ]    1  Buy milk\n");
    }

    #[test]
    fn test_toggle_unknown_id() {
        let api = InMemoryTaskApi::with_titles(&["Buy milk"]);
        let (result, _) = run(&api, TaskCommand::Toggle { id: 9 });
        assert!(matches!(result, Err(SproutError::NotFound(_))));
    }

    #[test]
    fn test_rm_failure_is_reported() {
        let api = InMemoryTaskApi::new();
        let (result, out) = run(&api, TaskCommand::Rm { id: 4 });
        match result {
            Err(SproutError::Request(failure)) => assert_eq!(failure.method, "DELETE"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_rm_prints_remaining() {
        let api = InMemoryTaskApi::with_titles(&["a", "b"]);
        let (result, out) = run(&api, TaskCommand::Rm { id: 2 });
        result.unwrap();
        assert_eq!(out, "[ ]    1  a\n");
    }
}
