//! 任务列表组件

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::api::Task;
use crate::theme::ThemeColors;

/// 渲染任务列表（保持服务端顺序）
pub fn render(
    frame: &mut Frame,
    area: Rect,
    tasks: &[Task],
    list_state: &ListState,
    colors: &ThemeColors,
) {
    let items: Vec<ListItem> = tasks.iter().map(|task| task_item(task, colors)).collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT)
                .border_style(Style::default().fg(colors.border)),
        )
        .highlight_symbol(" ❯ ")
        .highlight_style(
            Style::default()
                .bg(colors.bg_secondary)
                .add_modifier(Modifier::BOLD),
        );

    // ListState 只在渲染时被修改 offset，复制一份避免要求 &mut App
    let mut state = list_state.clone();
    frame.render_stateful_widget(list, area, &mut state);
}

fn task_item<'a>(task: &'a Task, colors: &ThemeColors) -> ListItem<'a> {
    let (checkbox, checkbox_style, title_style) = if task.completed {
        (
            "[✓]",
            Style::default().fg(colors.done),
            Style::default()
                .fg(colors.muted)
                .add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        (
            "[ ]",
            Style::default().fg(colors.muted),
            Style::default().fg(colors.text),
        )
    };

    ListItem::new(Line::from(vec![
        Span::styled(checkbox, checkbox_style),
        Span::raw(" "),
        Span::styled(task.title.as_str(), title_style),
    ]))
}
