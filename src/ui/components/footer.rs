use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::InputMode;
use crate::theme::ThemeColors;

/// 渲染底部快捷键提示栏
pub fn render(
    frame: &mut Frame,
    area: Rect,
    mode: InputMode,
    has_items: bool,
    colors: &ThemeColors,
) {
    let shortcuts = get_shortcuts(mode, has_items);

    let mut spans = vec![Span::raw("  ")];
    for (i, (key, desc)) in shortcuts.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(colors.muted),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn get_shortcuts(mode: InputMode, has_items: bool) -> Vec<(&'static str, &'static str)> {
    match mode {
        InputMode::Editing => vec![("Enter", "add"), ("Esc", "done")],
        InputMode::Normal if has_items => vec![
            ("n", "new"),
            ("Space", "toggle"),
            ("d", "delete"),
            ("r", "refresh"),
            ("?", "help"),
            ("q", "quit"),
        ],
        InputMode::Normal => vec![("n", "new"), ("r", "refresh"), ("?", "help"), ("q", "quit")],
    }
}
