//! Confirmation dialog for destructive actions

use super::base::{key_span, render_dialog, DialogConfig};
use crate::state::{ConfirmAction, PendingConfirm};
use crate::ui::theme::Theme;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render a confirmation dialog with Cancel/confirm choices
pub fn render_confirm_dialog(frame: &mut Frame, pending: &PendingConfirm, theme: &Theme) {
    let (title, confirm_label) = match pending.action {
        ConfirmAction::Clear => ("Clear Form", "Clear"),
        ConfirmAction::Quit => ("Quit", "Quit"),
    };

    // Add options with selection highlighting
    let options = [(false, "Cancel", theme.text), (true, confirm_label, theme.error)];
    let extra = options
        .iter()
        .map(|&(is_confirm, label, color)| {
            let is_selected = pending.confirm_selected == is_confirm;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted)
            };
            Line::from(Span::styled(format!("{prefix}{label}"), style))
        })
        .collect();

    let hint = vec![
        key_span("←→", theme),
        Span::styled(" select  ", Style::default().fg(theme.muted)),
        key_span("Enter", theme),
        Span::styled(" confirm  ", Style::default().fg(theme.muted)),
        key_span("Esc", theme),
        Span::styled(" cancel", Style::default().fg(theme.muted)),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title,
            title_color: theme.error,
            border_color: theme.error,
            message: &pending.message,
            extra,
            hint: Some(hint),
            max_width: 50,
        },
        theme,
    );
}
