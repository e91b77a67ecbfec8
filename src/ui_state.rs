//! UI 状态管理
//!
//! 管理与显示相关的状态：主题、颜色、Toast。

use std::time::{Duration, Instant};

use crate::theme::{detect_system_theme, get_theme_colors, Theme, ThemeColors};

/// Toast 默认显示时长
const TOAST_DURATION: Duration = Duration::from_secs(2);

/// Auto 主题下检测系统深浅色的间隔
const THEME_CHECK_INTERVAL: Duration = Duration::from_secs(2);

/// Toast 消息
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// UI 状态
#[derive(Debug)]
pub struct UiState {
    /// Toast 提示
    pub toast: Option<Toast>,
    /// 当前主题
    pub theme: Theme,
    /// 当前颜色方案
    pub colors: ThemeColors,
    /// 是否显示帮助面板
    pub show_help: bool,
    /// 上次检测到的系统主题（用于 Auto 模式检测变化）
    last_system_dark: bool,
    last_theme_check: Instant,
}

impl UiState {
    pub fn new(theme: Theme) -> Self {
        Self {
            toast: None,
            theme,
            colors: get_theme_colors(theme),
            show_help: false,
            last_system_dark: detect_system_theme(),
            last_theme_check: Instant::now(),
        }
    }

    /// 显示 Toast 消息
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message, TOAST_DURATION));
    }

    /// 清除过期的 Toast
    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    /// 切换主题
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.colors = get_theme_colors(theme);
    }

    /// 检查系统主题变化（只在 Auto 模式下生效）
    pub fn check_system_theme(&mut self) {
        if self.theme != Theme::Auto || self.last_theme_check.elapsed() < THEME_CHECK_INTERVAL {
            return;
        }
        self.last_theme_check = Instant::now();

        let current_dark = detect_system_theme();
        if current_dark != self.last_system_dark {
            self.last_system_dark = current_dark;
            self.colors = get_theme_colors(Theme::Auto);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
