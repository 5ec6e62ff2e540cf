//! Accessibility toolbar: one row of clickable buttons

use super::theme::Theme;
use crate::state::{PreferenceAction, Preferences};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarButton {
    FontDown,
    FontUp,
    Contrast,
    Motion,
    Keyboard,
    Help,
    Clear,
    Submit,
}

impl ToolbarButton {
    pub const ALL: [ToolbarButton; 8] = [
        ToolbarButton::FontDown,
        ToolbarButton::FontUp,
        ToolbarButton::Contrast,
        ToolbarButton::Motion,
        ToolbarButton::Keyboard,
        ToolbarButton::Help,
        ToolbarButton::Clear,
        ToolbarButton::Submit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::FontDown => "A-",
            Self::FontUp => "A+",
            Self::Contrast => "Contrast",
            Self::Motion => "Motion",
            Self::Keyboard => "Keyboard",
            Self::Help => "Help",
            Self::Clear => "Clear",
            Self::Submit => "Submit",
        }
    }

    /// The preference this button changes, if it is a preference toggle
    pub fn preference(self) -> Option<PreferenceAction> {
        match self {
            Self::FontDown => Some(PreferenceAction::DecreaseFont),
            Self::FontUp => Some(PreferenceAction::IncreaseFont),
            Self::Contrast => Some(PreferenceAction::ToggleContrast),
            Self::Motion => Some(PreferenceAction::ToggleMotion),
            Self::Keyboard => Some(PreferenceAction::ToggleKeyboard),
            Self::Help | Self::Clear | Self::Submit => None,
        }
    }

    /// Pressed state for toggle buttons
    fn is_on(self, preferences: &Preferences) -> bool {
        match self {
            Self::Contrast => preferences.high_contrast,
            Self::Motion => preferences.reduced_motion,
            Self::Keyboard => preferences.keyboard_visible,
            _ => false,
        }
    }

    fn width(self) -> u16 {
        self.label().len() as u16 + 2
    }
}

/// Button positions within the toolbar row
pub fn toolbar_buttons(area: Rect) -> Vec<(ToolbarButton, Rect)> {
    let mut x = area.x + 1;
    let right = area.x + area.width;
    let mut buttons = Vec::new();

    for button in ToolbarButton::ALL {
        let width = button.width();
        if x + width > right {
            break;
        }
        buttons.push((button, Rect::new(x, area.y, width, 1)));
        x += width + 1;
    }
    buttons
}

pub fn toolbar_button_at(area: Rect, pos: Position) -> Option<ToolbarButton> {
    toolbar_buttons(area)
        .into_iter()
        .find(|(_, rect)| rect.contains(pos))
        .map(|(button, _)| button)
}

pub fn draw(frame: &mut Frame, area: Rect, preferences: &Preferences, theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];
    for (button, _) in toolbar_buttons(area) {
        let style = if button.is_on(preferences) {
            Style::default()
                .fg(theme.background)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.accent).add_modifier(Modifier::REVERSED)
        };
        spans.push(Span::styled(format!(" {} ", button.label()), style));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(theme.base()), area);
}
