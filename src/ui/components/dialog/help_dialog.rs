//! Keyboard shortcut reference

use super::base::{key_span, render_dialog, DialogConfig};
use crate::platform::shortcut;
use crate::ui::theme::Theme;
use ratatui::{
    style::Style,
    text::{Line, Span},
    Frame,
};

fn bindings() -> Vec<(String, &'static str)> {
    vec![
        ("↑ / ↓".to_string(), "Previous / next question"),
        ("Enter".to_string(), "Answer the current question"),
        ("Tab / Shift+Tab".to_string(), "Move between answers"),
        ("Space".to_string(), "Select an option"),
        ("Esc".to_string(), "Leave the answer"),
        ("t".to_string(), "Read the question aloud"),
        (shortcut("S"), "Save progress"),
        ("F10".to_string(), "Submit the form"),
        (shortcut("L"), "Clear the form"),
        (format!("{} / {}", shortcut("+"), shortcut("-")), "Font size"),
        (shortcut("H"), "High contrast"),
        (shortcut("R"), "Reduced motion"),
        (shortcut("K"), "On-screen keyboard"),
        (shortcut("Q"), "Quit"),
    ]
}

pub fn render_help_dialog(frame: &mut Frame, theme: &Theme) {
    let bindings = bindings();
    let key_width = bindings
        .iter()
        .map(|(k, _)| k.chars().count())
        .max()
        .unwrap_or(0);

    let extra = bindings
        .into_iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!("{key:<key_width$}  "),
                    Style::default().fg(theme.accent),
                ),
                Span::styled(action, Style::default().fg(theme.text)),
            ])
        })
        .collect();

    let hint = vec![
        Span::raw("Press "),
        key_span("Esc", theme),
        Span::raw(" to close"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: "Keyboard Shortcuts",
            title_color: theme.accent,
            border_color: theme.accent,
            message: "All actions are available from the keyboard.",
            extra,
            hint: Some(hint),
            max_width: 64,
        },
        theme,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings_use_platform_modifier() {
        let bindings = bindings();
        assert!(bindings.iter().any(|(k, _)| *k == shortcut("S")));
        assert!(bindings.iter().any(|(k, _)| k == "F10"));
    }
}
