use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::ThemeColors;

use super::logo;

/// Header 总高度：1 (边框) + 6 (Logo) + 1 (下边距) + 1 (服务端信息) = 9
pub const HEADER_HEIGHT: u16 = 9;

/// Header 信息行的数据
pub struct HeaderInfo<'a> {
    pub endpoint: &'a str,
    pub total: usize,
    pub done: usize,
    /// 是否有请求在进行中
    pub syncing: bool,
}

/// 渲染顶部区域（Logo + 服务端信息）
pub fn render(frame: &mut Frame, area: Rect, info: &HeaderInfo, colors: &ThemeColors) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(colors.border));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let [logo_area, _, info_area] = Layout::vertical([
        Constraint::Length(logo::LOGO_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner_area);

    logo::render(frame, logo_area, colors);
    render_info(frame, info_area, info, colors);
}

fn render_info(frame: &mut Frame, area: Rect, info: &HeaderInfo, colors: &ThemeColors) {
    let left = Span::styled(format!(" {}", info.endpoint), Style::default().fg(colors.text));

    let mut right_text = format!("{}/{} done ", info.done, info.total);
    if info.syncing {
        right_text = format!("syncing…  {}", right_text);
    }
    let right = Span::styled(right_text, Style::default().fg(colors.muted));

    // 中间填充空格
    let padding_len = (area.width as usize).saturating_sub(left.width() + right.width());
    let line = Line::from(vec![left, Span::raw(" ".repeat(padding_len)), right]);

    frame.render_widget(Paragraph::new(line), area);
}
