//! 删除确认弹窗

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::Style,
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::app::PendingDelete;
use crate::theme::ThemeColors;

use super::dialog_utils::{center_dialog, render_dialog_frame, render_hint, truncate};

const DIALOG_WIDTH: u16 = 44;
const DIALOG_HEIGHT: u16 = 8;

/// 渲染删除确认弹窗
pub fn render(frame: &mut Frame, pending: &PendingDelete, colors: &ThemeColors) {
    let area = center_dialog(frame.area(), DIALOG_WIDTH, DIALOG_HEIGHT);
    let inner = render_dialog_frame(frame, area, " Delete ", colors.error, colors);

    let [_, message_area, _, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let max_title = inner.width.saturating_sub(4) as usize;
    let message = vec![
        Line::from(format!("\"{}\"", truncate(&pending.title, max_title))),
        Line::from("Delete this task?"),
    ];
    frame.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(colors.text))
            .alignment(Alignment::Center),
        message_area,
    );

    render_hint(frame, hint_area, &[("y", "delete"), ("n", "cancel")], colors);
}
