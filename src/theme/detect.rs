//! 终端深浅色检测（用于 Auto 主题）

use std::process::Command;

/// 检测终端/系统是否为深色
///
/// 优先读取终端设置的 `COLORFGBG`（如 "15;0"），其次在 macOS 上读取系统外观，
/// 都无法判断时按深色处理。
pub fn detect_system_theme() -> bool {
    if let Some(dark) = std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| parse_colorfgbg(&value))
    {
        return dark;
    }

    if cfg!(target_os = "macos") {
        return Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
            .map(|output| {
                output.status.success()
                    && String::from_utf8_lossy(&output.stdout)
                        .trim()
                        .eq_ignore_ascii_case("dark")
            })
            .unwrap_or(false);
    }

    true
}

/// 解析 `fg;bg` 或 `fg;default;bg`，背景色号 0-6 或 8 视为深色
fn parse_colorfgbg(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(bg <= 6 || bg == 8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colorfgbg() {
        assert_eq!(parse_colorfgbg("15;0"), Some(true));
        assert_eq!(parse_colorfgbg("0;15"), Some(false));
        assert_eq!(parse_colorfgbg("12;default;8"), Some(true));
        assert_eq!(parse_colorfgbg("default"), None);
    }
}
