use ratatui::style::Color;

use crate::store::Theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub neutral: Color,
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
}

pub const DARK: Palette = Palette {
    primary: Color::from_u32(0x00a78bfa),
    secondary: Color::from_u32(0x005b4a9e),
    neutral: Color::from_u32(0x00404040),
    background: Color::from_u32(0x000d0d0d),
    text: Color::from_u32(0x00f5f5f5),
    muted: Color::from_u32(0x009a9a9a),
    success: Color::from_u32(0x0034d399),
    warning: Color::from_u32(0x00fbbf24),
    danger: Color::from_u32(0x00ef4444),
};

pub const LIGHT: Palette = Palette {
    primary: Color::from_u32(0x006d28d9),
    secondary: Color::from_u32(0x00c4b5fd),
    neutral: Color::from_u32(0x00d4d4d4),
    background: Color::from_u32(0x00fafafa),
    text: Color::from_u32(0x00171717),
    muted: Color::from_u32(0x00525252),
    success: Color::from_u32(0x00059669),
    warning: Color::from_u32(0x00b45309),
    danger: Color::from_u32(0x00dc2626),
};

pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Dark => &DARK,
        Theme::Light => &LIGHT,
    }
}
