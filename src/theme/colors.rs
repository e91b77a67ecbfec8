//! 主题颜色定义

use ratatui::style::Color;

use super::ThemeColors;

/// 深色主题（默认）
pub fn dark_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(24, 24, 24),
        bg_secondary: Color::Rgb(48, 48, 48),
        logo: Color::Rgb(0, 255, 136), // 亮绿色
        highlight: Color::Rgb(0, 255, 136),
        text: Color::White,
        muted: Color::Rgb(128, 128, 128),
        border: Color::Rgb(68, 68, 68),
        done: Color::Rgb(0, 255, 136),
        error: Color::Rgb(255, 85, 85),
    }
}

/// 浅色主题
pub fn light_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(250, 250, 250),
        bg_secondary: Color::Rgb(230, 230, 230),
        logo: Color::Rgb(0, 128, 68), // 深绿色
        highlight: Color::Rgb(0, 128, 68),
        text: Color::Rgb(30, 30, 30),
        muted: Color::Rgb(120, 120, 120),
        border: Color::Rgb(200, 200, 200),
        done: Color::Rgb(0, 150, 80),
        error: Color::Rgb(200, 50, 50),
    }
}

pub fn dracula_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(40, 42, 54),
        bg_secondary: Color::Rgb(68, 71, 90),
        logo: Color::Rgb(189, 147, 249),      // purple
        highlight: Color::Rgb(255, 121, 198), // pink
        text: Color::Rgb(248, 248, 242),
        muted: Color::Rgb(98, 114, 164),
        border: Color::Rgb(68, 71, 90),
        done: Color::Rgb(80, 250, 123),
        error: Color::Rgb(255, 85, 85),
    }
}

pub fn nord_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(46, 52, 64),           // polar night
        bg_secondary: Color::Rgb(59, 66, 82),
        logo: Color::Rgb(136, 192, 208),      // frost
        highlight: Color::Rgb(129, 161, 193),
        text: Color::Rgb(236, 239, 244),      // snow storm
        muted: Color::Rgb(76, 86, 106),
        border: Color::Rgb(59, 66, 82),
        done: Color::Rgb(163, 190, 140),      // aurora green
        error: Color::Rgb(191, 97, 106),
    }
}

pub fn gruvbox_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(40, 40, 40),
        bg_secondary: Color::Rgb(60, 56, 54),
        logo: Color::Rgb(250, 189, 47),
        highlight: Color::Rgb(254, 128, 25),
        text: Color::Rgb(235, 219, 178),
        muted: Color::Rgb(146, 131, 116),
        border: Color::Rgb(80, 73, 69),
        done: Color::Rgb(184, 187, 38),
        error: Color::Rgb(251, 73, 52),
    }
}

pub fn tokyo_night_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(26, 27, 38),
        bg_secondary: Color::Rgb(41, 46, 66),
        logo: Color::Rgb(125, 207, 255),
        highlight: Color::Rgb(187, 154, 247),
        text: Color::Rgb(192, 202, 245),
        muted: Color::Rgb(86, 95, 137),
        border: Color::Rgb(41, 46, 66),
        done: Color::Rgb(158, 206, 106),
        error: Color::Rgb(247, 118, 142),
    }
}

pub fn catppuccin_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(30, 30, 46),         // base
        bg_secondary: Color::Rgb(49, 50, 68),
        logo: Color::Rgb(203, 166, 247),    // mauve
        highlight: Color::Rgb(245, 194, 231),
        text: Color::Rgb(205, 214, 244),
        muted: Color::Rgb(127, 132, 156),
        border: Color::Rgb(69, 71, 90),
        done: Color::Rgb(166, 227, 161),
        error: Color::Rgb(243, 139, 168),
    }
}
