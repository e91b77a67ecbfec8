//! 快捷键帮助面板

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::ThemeColors;

use super::dialog_utils::{center_dialog, render_dialog_frame};

/// 帮助面板宽度
const PANEL_WIDTH: u16 = 38;
/// 帮助面板高度
const PANEL_HEIGHT: u16 = 22;

/// 渲染帮助面板
pub fn render(frame: &mut Frame, colors: &ThemeColors) {
    let area = center_dialog(frame.area(), PANEL_WIDTH, PANEL_HEIGHT);
    let inner = render_dialog_frame(frame, area, " Help ", colors.highlight, colors);

    frame.render_widget(Paragraph::new(build_help_lines(colors)), inner);
}

/// 构建帮助内容行
fn build_help_lines(colors: &ThemeColors) -> Vec<Line<'static>> {
    vec![
        section_header("Navigation", colors),
        key_line("j / ↓", "Move down", colors),
        key_line("k / ↑", "Move up", colors),
        Line::from(""),
        section_header("Tasks", colors),
        key_line("n / a / i", "New task", colors),
        key_line("Space / Enter", "Toggle done", colors),
        key_line("d / x", "Delete", colors),
        key_line("r", "Refresh from server", colors),
        Line::from(""),
        section_header("New Task Input", colors),
        key_line("Enter", "Add task", colors),
        key_line("Esc", "Back to list", colors),
        Line::from(""),
        section_header("Other", colors),
        key_line("t", "Cycle theme", colors),
        key_line("?", "Toggle help", colors),
        key_line("q / Esc", "Quit", colors),
        Line::from(""),
        Line::from(Span::styled(
            "  Press any key to close",
            Style::default().fg(colors.muted),
        )),
    ]
}

fn section_header(title: &str, colors: &ThemeColors) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {}", title),
        Style::default()
            .fg(colors.highlight)
            .add_modifier(Modifier::BOLD),
    ))
}

fn key_line(key: &str, desc: &str, colors: &ThemeColors) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("   {:<15}", key), Style::default().fg(colors.text)),
        Span::styled(desc.to_string(), Style::default().fg(colors.muted)),
    ])
}
