//! 任务列表页面渲染

use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::{Block, Widget},
    Frame,
};

use crate::app::{App, InputMode};

use super::components::{
    confirm_dialog, empty_state, footer, header, help_panel, input_bar, task_list, toast,
};

/// 渲染任务列表页面
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.ui.colors;
    let controller = &app.controller;

    // 填充整个背景
    Block::default()
        .style(Style::default().bg(colors.bg))
        .render(area, frame.buffer_mut());

    let [header_area, content_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(header::HEADER_HEIGHT),
        Constraint::Fill(1),
        Constraint::Length(input_bar::INPUT_HEIGHT),
        Constraint::Length(3),
    ])
    .areas(area);

    let info = header::HeaderInfo {
        endpoint: &app.endpoint,
        total: controller.tasks().len(),
        done: controller.completed_count(),
        syncing: controller.in_flight() > 0,
    };
    header::render(frame, header_area, &info, colors);

    // 首次加载完成前只显示 Loading
    if controller.is_loading() || controller.tasks().is_empty() {
        empty_state::render(frame, content_area, controller.is_loading(), colors);
    } else {
        task_list::render(frame, content_area, controller.tasks(), &app.list_state, colors);
    }

    input_bar::render(
        frame,
        input_area,
        &controller.draft_title,
        app.input_mode == InputMode::Editing,
        colors,
    );

    footer::render(
        frame,
        footer_area,
        app.input_mode,
        !controller.tasks().is_empty(),
        colors,
    );

    // 弹窗层
    if let Some(ref pending) = app.pending_delete {
        confirm_dialog::render(frame, pending, colors);
    }

    if app.ui.show_help {
        help_panel::render(frame, colors);
    }

    if let Some(ref t) = app.ui.toast {
        if !t.is_expired() {
            toast::render(frame, &t.message, colors);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    use crate::api::InMemoryTaskApi;
    use crate::sync::TaskListController;
    use crate::theme::Theme;

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_with(api: &InMemoryTaskApi) -> App {
        App::new(
            TaskListController::new(api.clone()),
            "http://127.0.0.1:8000",
            Theme::Dark,
        )
    }

    #[test]
    fn test_loading_before_first_fetch() {
        let api = InMemoryTaskApi::with_titles(&["Buy milk"]);
        let app = app_with(&api);
        // 首次拉取的结果尚未被 poll
        let out = screen(&app);
        assert!(out.contains("Loading tasks..."));
        assert!(!out.contains("Buy milk"));
    }

    #[test]
    fn test_task_rows_and_counts() {
        let api = InMemoryTaskApi::with_titles(&["Buy milk", "Walk dog"]);
        let mut app = app_with(&api);
        app.controller.settle();
        app.clamp_selection();
        app.toggle_selected();
        app.controller.settle();

        let out = screen(&app);
        assert!(out.contains("[✓] Walk dog"));
        assert!(out.contains("[ ] Buy milk"));
        assert!(out.contains("1/2 done"));
        assert!(out.contains("http://127.0.0.1:8000"));
    }

    #[test]
    fn test_empty_list_hint() {
        let api = InMemoryTaskApi::new();
        let mut app = app_with(&api);
        app.controller.settle();

        let out = screen(&app);
        assert!(out.contains("No tasks yet"));
        assert!(out.contains("Add a new task..."));
    }

    #[test]
    fn test_delete_dialog_shows_title() {
        let api = InMemoryTaskApi::with_titles(&["Buy milk"]);
        let mut app = app_with(&api);
        app.controller.settle();
        app.clamp_selection();
        app.request_delete();

        let out = screen(&app);
        assert!(out.contains("\"Buy milk\""));
        assert!(out.contains("Delete this task?"));
    }
}
