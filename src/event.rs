use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, InputMode};

/// 处理事件，返回 true 表示应该继续运行
pub fn handle_events(app: &mut App) -> io::Result<bool> {
    app.tick();

    // 轮询事件（100ms 超时），期间后台请求照常进行
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            // 只处理按下事件
            if key.kind == KeyEventKind::Press {
                handle_key(app, key);
            }
        }
    }

    Ok(!app.should_quit)
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    // 优先处理弹窗事件
    if app.ui.show_help {
        handle_help_key(app, key);
        return;
    }

    if app.pending_delete.is_some() {
        handle_confirm_delete_key(app, key);
        return;
    }

    match app.input_mode {
        InputMode::Editing => handle_editing_key(app, key),
        InputMode::Normal => handle_normal_key(app, key),
    }
}

/// 列表导航模式
fn handle_normal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // 退出
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

        // 导航
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),

        // 切换完成状态
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected(),

        // 删除（需确认）
        KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete => app.request_delete(),

        // 新任务输入框
        KeyCode::Char('n') | KeyCode::Char('a') | KeyCode::Char('i') => app.start_editing(),

        KeyCode::Char('r') | KeyCode::Char('R') => app.refresh(),
        KeyCode::Char('t') | KeyCode::Char('T') => app.cycle_theme(),
        KeyCode::Char('?') => app.ui.show_help = true,

        _ => {}
    }
}

/// 输入框编辑模式
fn handle_editing_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_draft(),
        KeyCode::Esc => app.stop_editing(),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Char(c) => app.input_char(c),
        _ => {}
    }
}

/// 删除确认弹窗
fn handle_confirm_delete_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Char('q') => {
            app.cancel_delete()
        }
        _ => {}
    }
}

/// 帮助面板：任意键关闭
fn handle_help_key(app: &mut App, _key: KeyEvent) {
    app.ui.show_help = false;
}
