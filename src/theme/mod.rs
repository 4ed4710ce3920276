//! Color themes for the player

mod palettes;

use ratatui::style::Color;

use crate::config::preferences::ColorScheme;

/// A color theme for the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_tertiary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,

    /// Draw thick borders (high contrast)
    pub thick_borders: bool,
}

impl Theme {
    /// Theme matching the learner's color scheme preference
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => palettes::LIGHT,
            ColorScheme::Dark => palettes::DARK,
            ColorScheme::HighContrast => palettes::HIGH_CONTRAST,
        }
    }

    /// Border style for blocks
    pub fn border_type(&self) -> ratatui::widgets::BorderType {
        if self.thick_borders {
            ratatui::widgets::BorderType::Thick
        } else {
            ratatui::widgets::BorderType::Rounded
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::for_scheme(ColorScheme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_light() {
        assert_eq!(Theme::default().name, "Light");
    }

    #[test]
    fn high_contrast_uses_thick_borders() {
        let theme = Theme::for_scheme(ColorScheme::HighContrast);
        assert!(theme.thick_borders);
        assert_eq!(theme.border_type(), ratatui::widgets::BorderType::Thick);
    }

    #[test]
    fn each_scheme_has_its_own_palette() {
        let light = Theme::for_scheme(ColorScheme::Light);
        let dark = Theme::for_scheme(ColorScheme::Dark);
        assert_ne!(light.bg_primary, dark.bg_primary);
    }
}
