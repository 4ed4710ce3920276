//! Built-in palettes

use ratatui::style::Color;

use super::Theme;

/// Light palette with medical-blue accents
pub const LIGHT: Theme = Theme {
    name: "Light",

    bg_primary: Color::Rgb(255, 255, 255),   // #ffffff
    bg_secondary: Color::Rgb(247, 250, 252), // #f7fafc
    bg_tertiary: Color::Rgb(226, 232, 240),  // #e2e8f0

    fg_primary: Color::Rgb(26, 32, 44),    // #1a202c
    fg_secondary: Color::Rgb(45, 55, 72),  // #2d3748
    fg_muted: Color::Rgb(90, 103, 120),    // #5a6778

    accent_primary: Color::Rgb(44, 82, 130),   // #2c5282
    accent_secondary: Color::Rgb(49, 130, 206), // #3182ce

    success: Color::Rgb(39, 103, 73),  // #276749
    warning: Color::Rgb(151, 90, 22),  // #975a16
    error: Color::Rgb(197, 48, 48),    // #c53030
    info: Color::Rgb(43, 108, 176),    // #2b6cb0

    border: Color::Rgb(160, 174, 192),        // #a0aec0
    border_focused: Color::Rgb(44, 82, 130),  // #2c5282
    selection: Color::Rgb(190, 227, 248),     // #bee3f8

    thick_borders: false,
};

/// Dark palette
pub const DARK: Theme = Theme {
    name: "Dark",

    bg_primary: Color::Rgb(26, 32, 44),   // #1a202c
    bg_secondary: Color::Rgb(45, 55, 72), // #2d3748
    bg_tertiary: Color::Rgb(74, 85, 104), // #4a5568

    fg_primary: Color::Rgb(247, 250, 252),   // #f7fafc
    fg_secondary: Color::Rgb(226, 232, 240), // #e2e8f0
    fg_muted: Color::Rgb(160, 174, 192),     // #a0aec0

    accent_primary: Color::Rgb(99, 179, 237),    // #63b3ed
    accent_secondary: Color::Rgb(144, 205, 244), // #90cdf4

    success: Color::Rgb(104, 211, 145), // #68d391
    warning: Color::Rgb(246, 224, 94),  // #f6e05e
    error: Color::Rgb(252, 129, 129),   // #fc8181
    info: Color::Rgb(99, 179, 237),     // #63b3ed

    border: Color::Rgb(113, 128, 150),        // #718096
    border_focused: Color::Rgb(99, 179, 237), // #63b3ed
    selection: Color::Rgb(44, 82, 130),       // #2c5282

    thick_borders: false,
};

/// Maximum contrast: pure black, white and yellow
pub const HIGH_CONTRAST: Theme = Theme {
    name: "High Contrast",

    bg_primary: Color::Black,
    bg_secondary: Color::Black,
    bg_tertiary: Color::Rgb(32, 32, 32),

    fg_primary: Color::White,
    fg_secondary: Color::White,
    fg_muted: Color::Rgb(220, 220, 220),

    accent_primary: Color::Yellow,
    accent_secondary: Color::Cyan,

    success: Color::LightGreen,
    warning: Color::Yellow,
    error: Color::LightRed,
    info: Color::Cyan,

    border: Color::White,
    border_focused: Color::Yellow,
    selection: Color::Blue,

    thick_borders: true,
};
