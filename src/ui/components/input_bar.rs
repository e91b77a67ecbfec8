//! 新任务输入框

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::ThemeColors;

/// 输入框高度（含边框）
pub const INPUT_HEIGHT: u16 = 3;

/// 渲染输入框，`editing` 时高亮边框并显示光标
pub fn render(frame: &mut Frame, area: Rect, draft: &str, editing: bool, colors: &ThemeColors) {
    let border_color = if editing {
        colors.highlight
    } else {
        colors.border
    };

    let block = Block::default()
        .title(" New Task ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let mut spans = vec![Span::styled(" + ", Style::default().fg(colors.muted))];
    if draft.is_empty() && !editing {
        spans.push(Span::styled(
            "Add a new task...",
            Style::default().fg(colors.muted),
        ));
    } else {
        spans.push(Span::styled(draft, Style::default().fg(colors.text)));
    }
    if editing {
        spans.push(Span::styled("█", Style::default().fg(colors.highlight)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
