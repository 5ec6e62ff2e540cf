//! Colors and spacing derived from the accessibility preferences

use crate::state::Preferences;
use ratatui::style::{Color, Modifier, Style};

/// Palette used by every widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
    pub background: Color,
    /// Extra emphasis applied to prompts at larger font sizes
    pub emphasis: Modifier,
    /// Blank rows between blocks, grows with the font size
    pub spacing: u16,
}

impl Theme {
    pub fn from_preferences(preferences: &Preferences) -> Self {
        let emphasis = if preferences.font_size >= 20 {
            Modifier::BOLD
        } else {
            Modifier::empty()
        };
        let spacing = u16::from(preferences.font_size.saturating_sub(12)) / 4;

        if preferences.high_contrast {
            Self {
                text: Color::White,
                muted: Color::White,
                accent: Color::Yellow,
                error: Color::LightRed,
                success: Color::LightGreen,
                warning: Color::Yellow,
                background: Color::Black,
                emphasis: emphasis | Modifier::BOLD,
                spacing,
            }
        } else {
            Self {
                text: Color::Reset,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                error: Color::Red,
                success: Color::Green,
                warning: Color::Yellow,
                background: Color::Reset,
                emphasis,
                spacing,
            }
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn border(&self, is_active: bool) -> Style {
        if is_active {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.muted)
        }
    }

    /// Whether question hints fit at the current size
    pub fn shows_hints(&self) -> bool {
        self.spacing > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_follows_font_size() {
        let mut preferences = Preferences::default();
        assert_eq!(Theme::from_preferences(&preferences).spacing, 1);
        preferences.font_size = 12;
        let small = Theme::from_preferences(&preferences);
        assert_eq!(small.spacing, 0);
        assert!(!small.shows_hints());
        preferences.font_size = 24;
        let large = Theme::from_preferences(&preferences);
        assert_eq!(large.spacing, 3);
        assert!(large.emphasis.contains(Modifier::BOLD));
    }

    #[test]
    fn test_high_contrast_swaps_palette() {
        let preferences = Preferences {
            high_contrast: true,
            ..Default::default()
        };
        let theme = Theme::from_preferences(&preferences);
        assert_eq!(theme.background, Color::Black);
        assert_eq!(theme.muted, Color::White);
        assert_ne!(theme, Theme::from_preferences(&Preferences::default()));
    }
}
