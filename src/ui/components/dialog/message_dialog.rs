//! Message dialog component

use super::base::{key_span, render_dialog, DialogConfig};
use crate::ui::theme::Theme;
use ratatui::{text::Span, Frame};

/// Render a message overlay centered on the screen
pub fn render_message_dialog(frame: &mut Frame, message: &str, theme: &Theme) {
    let hint = vec![
        Span::raw("Press "),
        key_span("Enter", theme),
        Span::raw(" or "),
        key_span("Esc", theme),
        Span::raw(" to dismiss"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: "Feedback Form",
            title_color: theme.accent,
            border_color: theme.accent,
            message,
            hint: Some(hint),
            max_width: 60,
            ..Default::default()
        },
        theme,
    );
}
