use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::ThemeColors;

/// ASCII Art Logo - 6 行高
const LOGO: &[&str] = &[
    "███████╗██████╗ ██████╗  ██████╗ ██╗   ██╗████████╗",
    "██╔════╝██╔══██╗██╔══██╗██╔═══██╗██║   ██║╚══██╔══╝",
    "███████╗██████╔╝██████╔╝██║   ██║██║   ██║   ██║   ",
    "╚════██║██╔═══╝ ██╔══██╗██║   ██║██║   ██║   ██║   ",
    "███████║██║     ██║  ██║╚██████╔╝╚██████╔╝   ██║   ",
    "╚══════╝╚═╝     ╚═╝  ╚═╝ ╚═════╝  ╚═════╝    ╚═╝   ",
];

/// Logo 的高度（行数）
pub const LOGO_HEIGHT: u16 = 6;

/// 渲染居中的 Logo（宽度不够时只显示文字名）
pub fn render(frame: &mut Frame, area: Rect, colors: &ThemeColors) {
    let style = Style::default().fg(colors.logo);
    let logo_width = LOGO[0].chars().count() as u16;

    let lines: Vec<Line> = if area.width >= logo_width {
        LOGO.iter()
            .map(|line| Line::from(Span::styled(*line, style)))
            .collect()
    } else {
        vec![Line::from(Span::styled("sprout", style))]
    };

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
