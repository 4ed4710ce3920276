//! User display and playback preferences

use serde::{Deserialize, Serialize};

/// Playback speeds offered in the settings panel
pub const SPEED_OPTIONS: [f64; 4] = [0.5, 1.0, 1.25, 1.5];

/// Text size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontSize {
    Small,
    Medium,
    #[default]
    Large,
    ExtraLarge,
}

impl FontSize {
    pub const ALL: [FontSize; 4] =
        [FontSize::Small, FontSize::Medium, FontSize::Large, FontSize::ExtraLarge];

    pub fn label(self) -> &'static str {
        match self {
            FontSize::Small => "Small (16px)",
            FontSize::Medium => "Medium (18px)",
            FontSize::Large => "Large (20px)",
            FontSize::ExtraLarge => "Extra Large (24px)",
        }
    }

    /// Blank lines inserted between list rows.
    ///
    /// A terminal can't change glyph size, so larger text settings get
    /// more breathing room instead.
    pub fn row_spacing(self) -> u16 {
        match self {
            FontSize::Small | FontSize::Medium => 0,
            FontSize::Large | FontSize::ExtraLarge => 1,
        }
    }

    /// Next option, wrapping around
    pub fn next(self) -> Self {
        cycle(&Self::ALL, self)
    }
}

/// Color scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
    HighContrast,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 3] =
        [ColorScheme::Light, ColorScheme::Dark, ColorScheme::HighContrast];

    pub fn label(self) -> &'static str {
        match self {
            ColorScheme::Light => "Light Theme",
            ColorScheme::Dark => "Dark Theme",
            ColorScheme::HighContrast => "High Contrast",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self)
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let index = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(index + 1) % all.len()]
}

/// Label for a playback speed
pub fn speed_label(speed: f64) -> String {
    match speed {
        s if s == 0.5 => "Slow (0.5x)".to_string(),
        s if s == 1.0 => "Normal (1x)".to_string(),
        s if s == 1.25 => "Fast (1.25x)".to_string(),
        s if s == 1.5 => "Faster (1.5x)".to_string(),
        s => format!("{s}x"),
    }
}

/// Next offered speed after `speed`, wrapping around
pub fn next_speed(speed: f64) -> f64 {
    SPEED_OPTIONS.iter().copied().find(|s| *s > speed).unwrap_or(SPEED_OPTIONS[0])
}

/// Display and playback preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub font_size: FontSize,
    pub theme: ColorScheme,
    /// Playback rate multiplier (always > 0)
    pub playback_speed: f64,
    pub captions_enabled: bool,
    pub auto_play: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            font_size: FontSize::Large,
            theme: ColorScheme::Light,
            playback_speed: 1.0,
            captions_enabled: true,
            auto_play: false,
        }
    }
}

impl UserPreferences {
    /// Apply a partial update.
    ///
    /// Non-positive or non-finite speeds are ignored.
    pub fn merge(&mut self, patch: PreferencesPatch) {
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(speed) = patch.playback_speed {
            if speed.is_finite() && speed > 0.0 {
                self.playback_speed = speed;
            } else {
                tracing::warn!("Ignoring invalid playback speed {}", speed);
            }
        }
        if let Some(captions) = patch.captions_enabled {
            self.captions_enabled = captions;
        }
        if let Some(auto_play) = patch.auto_play {
            self.auto_play = auto_play;
        }
    }

    /// Replace an invalid persisted speed with the default
    pub fn sanitized(mut self) -> Self {
        if !(self.playback_speed.is_finite() && self.playback_speed > 0.0) {
            self.playback_speed = 1.0;
        }
        self
    }
}

/// A partial update to [`UserPreferences`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferencesPatch {
    pub font_size: Option<FontSize>,
    pub theme: Option<ColorScheme>,
    pub playback_speed: Option<f64>,
    pub captions_enabled: Option<bool>,
    pub auto_play: Option<bool>,
}

impl PreferencesPatch {
    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::store::{self, MemoryStore, PREFERENCES_KEY};

    #[test]
    fn defaults_match_first_run() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.font_size, FontSize::Large);
        assert_eq!(prefs.theme, ColorScheme::Light);
        assert!(prefs.captions_enabled);
        assert!(!prefs.auto_play);
    }

    #[test]
    fn serializes_with_web_field_names() {
        let prefs = UserPreferences { font_size: FontSize::ExtraLarge, ..Default::default() };
        let json = serde_json::to_string(&prefs).unwrap();
        assert!(json.contains(r#""fontSize":"extra-large""#));
        assert!(json.contains(r#""captionsEnabled":true"#));
    }

    #[test]
    fn round_trips_through_store() {
        let prefs = UserPreferences {
            font_size: FontSize::Large,
            theme: ColorScheme::Dark,
            playback_speed: 1.25,
            captions_enabled: true,
            auto_play: false,
        };
        let mut store = MemoryStore::default();
        store::save_json(&mut store, PREFERENCES_KEY, &prefs).unwrap();

        let reloaded: UserPreferences = store::load_or_default(&store, PREFERENCES_KEY);
        assert_eq!(reloaded, prefs);
    }

    #[test]
    fn merge_only_touches_given_fields() {
        let mut prefs = UserPreferences::default();
        prefs.merge(PreferencesPatch {
            theme: Some(ColorScheme::HighContrast),
            ..Default::default()
        });
        assert_eq!(prefs.theme, ColorScheme::HighContrast);
        assert_eq!(prefs.font_size, FontSize::Large);
        assert_eq!(prefs.playback_speed, 1.0);
    }

    #[test]
    fn merge_rejects_non_positive_speed() {
        let mut prefs = UserPreferences::default();
        prefs.merge(PreferencesPatch { playback_speed: Some(0.0), ..Default::default() });
        assert_eq!(prefs.playback_speed, 1.0);
        prefs.merge(PreferencesPatch { playback_speed: Some(f64::NAN), ..Default::default() });
        assert_eq!(prefs.playback_speed, 1.0);
    }

    #[test]
    fn sanitized_fixes_bad_speed() {
        let prefs = UserPreferences { playback_speed: -2.0, ..Default::default() }.sanitized();
        assert_eq!(prefs.playback_speed, 1.0);
    }

    #[test]
    fn options_cycle() {
        assert_eq!(FontSize::ExtraLarge.next(), FontSize::Small);
        assert_eq!(ColorScheme::Light.next(), ColorScheme::Dark);
        assert_eq!(next_speed(1.0), 1.25);
        assert_eq!(next_speed(1.5), 0.5);
        assert_eq!(next_speed(2.0), 0.5);
    }

    #[test]
    fn speed_labels() {
        assert_eq!(speed_label(1.0), "Normal (1x)");
        assert_eq!(speed_label(2.0), "2x");
    }
}
