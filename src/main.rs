mod api;
mod app;
mod cli;
mod error;
mod event;
mod logging;
mod storage;
mod sync;
mod theme;
mod ui;
mod ui_state;

use std::io;
use std::panic;
use std::process::ExitCode;

use clap::Parser;
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use api::{HttpTaskApi, InMemoryTaskApi, TaskApi};
use app::App;
use cli::{Cli, Commands};
use error::Result;
use logging::LogTarget;
use storage::config::{self, Config};
use sync::TaskListController;
use theme::Theme;

/// `--demo` 模式预置的任务
const DEMO_TITLES: &[&str] = &["Buy milk", "Walk the dog", "Read a chapter"];

/// 选择任务 API，返回 (api, Header 显示的地址)
fn build_api(cli: &Cli, config: &Config) -> (Box<dyn TaskApi>, String) {
    if cli.demo {
        return (
            Box::new(InMemoryTaskApi::with_titles(DEMO_TITLES)),
            "demo (in-memory)".to_string(),
        );
    }
    let base_url = config::resolve_base_url(
        cli.base_url.as_deref(),
        std::env::var(config::BASE_URL_ENV).ok(),
        config,
    );
    let api = HttpTaskApi::new(&base_url);
    let endpoint = api.base_url().to_string();
    (Box::new(api), endpoint)
}

/// 启动 TUI 界面
fn run_tui(controller: TaskListController, endpoint: String, config: &Config) -> io::Result<()> {
    // 初始化终端
    let mut terminal = ratatui::init();

    let theme = Theme::from_name(&config.theme.name);
    let mut app = App::new(controller, endpoint, theme).with_config_path(config::config_path());

    let result = run(&mut terminal, &mut app);

    // 恢复终端
    ratatui::restore();
    info!(
        failed_requests = app.controller.failed_requests(),
        "sprout exiting"
    );
    result
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> io::Result<()> {
    loop {
        // 应用后台请求结果
        app.poll_sync();

        terminal.draw(|frame| ui::tasks::render(frame, app))?;

        if !event::handle_events(app)? {
            break;
        }
    }
    Ok(())
}

fn execute(cli: Cli) -> Result<()> {
    let config = config::load_config();
    let command = cli.command.clone().unwrap_or(Commands::Tui);

    let target = match command {
        Commands::Tui => LogTarget::File,
        _ => LogTarget::Stderr,
    };
    match logging::init(target, &config.log.level) {
        Ok(Some(path)) => info!(path = %path.display(), "logging to file"),
        Ok(None) => {}
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }

    let (api, endpoint) = build_api(&cli, &config);
    info!(%endpoint, "starting sprout");
    let mut controller = TaskListController::new(api);

    match command {
        Commands::Tui => run_tui(controller, endpoint, &config)?,
        Commands::Task(task_command) => {
            let result =
                cli::tasks::execute(&task_command, &mut controller, &mut io::stdout().lock());
            debug!(
                failed_requests = controller.failed_requests(),
                "command finished"
            );
            result?
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    // Set up panic hook to restore terminal state on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    // 解析命令行参数
    let cli = Cli::parse();

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
