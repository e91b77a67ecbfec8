use std::path::PathBuf;

use ratatui::widgets::ListState;
use tracing::warn;

use crate::api::Task;
use crate::storage::config::{self, Config};
use crate::sync::TaskListController;
use crate::theme::Theme;
use crate::ui_state::UiState;

/// 输入模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// 列表导航
    Normal,
    /// 编辑新任务标题
    Editing,
}

/// 待确认删除的任务
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: i64,
    pub title: String,
}

/// 全局应用状态
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,
    /// 任务同步控制器
    pub controller: TaskListController,
    /// 列表选择状态
    pub list_state: ListState,
    pub input_mode: InputMode,
    /// 删除确认弹窗
    pub pending_delete: Option<PendingDelete>,
    /// UI 状态（主题、Toast、帮助面板）
    pub ui: UiState,
    /// 显示在 Header 的服务端地址
    pub endpoint: String,
    /// 主题持久化位置（None 表示不保存）
    config_path: Option<PathBuf>,
}

impl App {
    /// 创建应用并发起首次拉取
    pub fn new(controller: TaskListController, endpoint: impl Into<String>, theme: Theme) -> Self {
        let mut app = Self {
            should_quit: false,
            controller,
            list_state: ListState::default(),
            input_mode: InputMode::Normal,
            pending_delete: None,
            ui: UiState::new(theme),
            endpoint: endpoint.into(),
            config_path: None,
        };
        app.controller.refresh();
        app
    }

    /// 切换主题时写回配置文件
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    // ========== Sync ==========

    /// 应用后台请求结果（每帧调用）
    pub fn poll_sync(&mut self) {
        if self.controller.poll() > 0 {
            self.clamp_selection();
        }
    }

    /// 手动刷新
    pub fn refresh(&mut self) {
        self.controller.refresh();
    }

    /// 列表变化后修正选中项
    pub fn clamp_selection(&mut self) {
        let len = self.controller.tasks().len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            None => self.list_state.select(Some(0)),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            Some(_) => {}
        }
    }

    // ========== Navigation ==========

    /// 当前选中的任务
    pub fn selected_task(&self) -> Option<&Task> {
        self.list_state
            .selected()
            .and_then(|i| self.controller.tasks().get(i))
    }

    /// 选中下一项
    pub fn select_next(&mut self) {
        let len = self.controller.tasks().len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some((current + 1) % len));
    }

    /// 选中上一项
    pub fn select_previous(&mut self) {
        let len = self.controller.tasks().len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let prev = if current == 0 { len - 1 } else { current - 1 };
        self.list_state.select(Some(prev));
    }

    // ========== Task actions ==========

    /// 切换选中任务的完成状态
    pub fn toggle_selected(&mut self) {
        if let Some((id, completed)) = self.selected_task().map(|t| (t.id, t.completed)) {
            self.controller.toggle_complete(id, completed);
        }
    }

    /// 打开删除确认弹窗
    pub fn request_delete(&mut self) {
        if let Some(task) = self.selected_task() {
            self.pending_delete = Some(PendingDelete {
                id: task.id,
                title: task.title.clone(),
            });
        }
    }

    /// 确认删除
    pub fn confirm_delete(&mut self) {
        if let Some(pending) = self.pending_delete.take() {
            self.controller.remove(pending.id);
        }
    }

    /// 取消删除
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    // ========== Draft input ==========

    pub fn start_editing(&mut self) {
        self.input_mode = InputMode::Editing;
    }

    /// 离开输入模式（保留草稿）
    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        self.controller.draft_title.push(c);
    }

    pub fn delete_char(&mut self) {
        self.controller.draft_title.pop();
    }

    /// 提交草稿（空白标题不会发请求）
    pub fn submit_draft(&mut self) {
        self.controller.submit_draft();
    }

    // ========== Theme ==========

    /// 切换到下一个主题并保存
    pub fn cycle_theme(&mut self) {
        let theme = self.ui.theme.next();
        self.ui.set_theme(theme);
        self.ui.show_toast(format!("Theme: {}", theme.label()));
        self.persist_theme();
    }

    fn persist_theme(&self) {
        let Some(path) = &self.config_path else {
            return;
        };
        let mut cfg: Config = config::load_config_from(path);
        cfg.theme.name = self.ui.theme.label().to_string();
        if let Err(e) = config::save_config_to(path, &cfg) {
            warn!(error = %e, "failed to save theme");
        }
    }

    /// 每帧维护（Toast 过期、系统主题变化）
    pub fn tick(&mut self) {
        self.ui.clear_expired_toast();
        self.ui.check_system_theme();
    }

    /// 退出应用
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InMemoryTaskApi;

    fn app_with(titles: &[&str]) -> (App, InMemoryTaskApi) {
        let api = InMemoryTaskApi::with_titles(titles);
        let mut app = App::new(
            TaskListController::new(api.clone()),
            "memory://demo",
            Theme::Dark,
        );
        settle(&mut app);
        (app, api)
    }

    fn settle(app: &mut App) {
        app.controller.settle();
        app.clamp_selection();
    }

    #[test]
    fn test_new_app_fetches_and_selects_first() {
        let (app, _) = app_with(&["a", "b"]);
        assert!(!app.controller.is_loading());
        assert_eq!(app.list_state.selected(), Some(0));
        assert_eq!(app.selected_task().unwrap().title, "b");
    }

    #[test]
    fn test_selection_wraps() {
        let (mut app, _) = app_with(&["a", "b", "c"]);
        app.select_previous();
        assert_eq!(app.list_state.selected(), Some(2));
        app.select_next();
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn test_selection_on_empty_list() {
        let (mut app, _) = app_with(&[]);
        app.select_next();
        assert_eq!(app.list_state.selected(), None);
        assert!(app.selected_task().is_none());
        app.toggle_selected();
        app.request_delete();
        assert!(app.pending_delete.is_none());
        assert_eq!(app.controller.in_flight(), 0);
    }

    #[test]
    fn test_toggle_selected() {
        let (mut app, api) = app_with(&["a"]);
        app.toggle_selected();
        settle(&mut app);
        assert!(app.selected_task().unwrap().completed);
        assert!(api.snapshot()[0].completed);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (mut app, api) = app_with(&["a", "b"]);
        app.select_next();
        app.request_delete();
        assert_eq!(
            app.pending_delete,
            Some(PendingDelete {
                id: 1,
                title: "a".to_string(),
            })
        );

        app.cancel_delete();
        settle(&mut app);
        assert_eq!(api.snapshot().len(), 2);

        app.request_delete();
        app.confirm_delete();
        settle(&mut app);
        assert!(app.pending_delete.is_none());
        assert_eq!(app.controller.tasks().len(), 1);
        // 删除最后一项后选中项被修正
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn test_draft_editing_and_submit() {
        let (mut app, _) = app_with(&[]);
        app.start_editing();
        for c in "Buy milkk".chars() {
            app.input_char(c);
        }
        app.delete_char();
        assert_eq!(app.controller.draft_title, "Buy milk");

        app.submit_draft();
        settle(&mut app);
        assert!(app.controller.draft_title.is_empty());
        assert_eq!(app.controller.tasks()[0].title, "Buy milk");
        assert_eq!(app.input_mode, InputMode::Editing);
    }

    #[test]
    fn test_blank_draft_is_ignored() {
        let (mut app, api) = app_with(&[]);
        let requests = api.request_count();
        app.input_char(' ');
        app.submit_draft();
        settle(&mut app);
        assert_eq!(api.request_count(), requests);
        assert_eq!(app.controller.draft_title, " ");
    }

    #[test]
    fn test_cycle_theme_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let (app, _) = app_with(&[]);
        let mut app = app.with_config_path(path.clone());

        app.cycle_theme();
        assert_eq!(app.ui.theme, Theme::Light);
        assert_eq!(app.ui.toast.as_ref().unwrap().message, "Theme: Light");
        assert_eq!(config::load_config_from(&path).theme.name, "Light");
    }
}
