//! CLI 模块

pub mod tasks;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sprout")]
#[command(version)]
#[command(about = "Terminal task list synced with a REST task API")]
pub struct Cli {
    /// Server origin, e.g. http://127.0.0.1:8000 (overrides SPROUT_API_URL and config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Use a built-in in-memory server instead of HTTP
    #[arg(long, global = true)]
    pub demo: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Start the terminal UI (default)
    Tui,
    #[command(flatten)]
    Task(TaskCommand),
}

/// 一次性任务命令：执行后打印最新列表并退出
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum TaskCommand {
    /// Print all tasks
    List,
    /// Create a task
    Add {
        /// Task title (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Flip a task between done and not done
    Toggle {
        /// Task ID
        id: i64,
    },
    /// Delete a task
    Rm {
        /// Task ID
        id: i64,
    },
}
