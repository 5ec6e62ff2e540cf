//! Boxed text input rendered as plain lines, so it scrolls with the page

use crate::state::TextInput;
use crate::ui::theme::Theme;
use ratatui::{
    style::Style,
    text::{Line, Span},
};

/// Most content rows a multi-line field grows to
const MAX_ROWS: usize = 8;

/// Render a text input as a bordered box.
///
/// Single-line inputs show the tail of their value; multi-line inputs wrap
/// and grow from `min_rows` up to a fixed maximum.
pub fn text_field_lines(
    input: &TextInput,
    is_active: bool,
    has_error: bool,
    min_rows: usize,
    theme: &Theme,
    width: u16,
) -> Vec<Line<'static>> {
    let width = usize::from(width).max(6);
    let inner = width - 4;

    let border_style = if has_error {
        Style::default().fg(theme.error)
    } else {
        theme.border(is_active)
    };
    let text_style = if is_active {
        Style::default().fg(theme.text)
    } else {
        Style::default().fg(theme.muted)
    };

    let display = if is_active {
        let (before, after) = input.split_at_cursor();
        format!("{before}▌{after}")
    } else if input.value().is_empty() {
        "(empty)".to_string()
    } else {
        input.value().to_string()
    };

    let rows = if input.is_multiline {
        let wrapped = wrap_chars(&display, inner);
        let shown = wrapped.len().clamp(min_rows, MAX_ROWS);
        let mut rows: Vec<String> = wrapped
            .iter()
            .skip(wrapped.len().saturating_sub(shown))
            .cloned()
            .collect();
        rows.resize(shown, String::new());
        rows
    } else {
        vec![tail(&display.replace('\n', " "), inner)]
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(Line::from(Span::styled(
        format!("┌{}┐", "─".repeat(width - 2)),
        border_style,
    )));
    for row in rows {
        let pad = inner.saturating_sub(row.chars().count());
        lines.push(Line::from(vec![
            Span::styled("│ ", border_style),
            Span::styled(format!("{row}{}", " ".repeat(pad)), text_style),
            Span::styled(" │", border_style),
        ]));
    }
    lines.push(Line::from(Span::styled(
        format!("└{}┘", "─".repeat(width - 2)),
        border_style,
    )));
    lines
}

/// Last `width` characters of `text`
fn tail(text: &str, width: usize) -> String {
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(width)).collect()
}

/// Split on newlines, then hard-wrap every line at `width` characters
fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            rows.push(String::new());
            continue;
        }
        rows.extend(chars.chunks(width).map(|chunk| chunk.iter().collect()));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Preferences;

    fn theme() -> Theme {
        Theme::from_preferences(&Preferences::default())
    }

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_single_line_box() {
        let mut input = TextInput::new(false);
        input.set_value("Ada");
        let lines = text_field_lines(&input, false, false, 1, &theme(), 12);
        assert_eq!(lines.len(), 3);
        assert_eq!(text_of(&lines[1]), "│ Ada      │");
    }

    #[test]
    fn test_empty_inactive_shows_placeholder() {
        let input = TextInput::new(false);
        let lines = text_field_lines(&input, false, false, 1, &theme(), 14);
        assert!(text_of(&lines[1]).contains("(empty)"));
    }

    #[test]
    fn test_active_single_line_keeps_cursor_visible() {
        let mut input = TextInput::new(false);
        input.set_value("a long value that overflows");
        let lines = text_field_lines(&input, true, false, 1, &theme(), 10);
        assert!(text_of(&lines[1]).ends_with("ws▌ │"));
    }

    #[test]
    fn test_multiline_grows_with_content() {
        let mut input = TextInput::new(true);
        input.set_value("one\ntwo\nthree\nfour");
        let lines = text_field_lines(&input, false, false, 3, &theme(), 20);
        assert_eq!(lines.len(), 4 + 2);

        input.set_value("x");
        let lines = text_field_lines(&input, false, false, 3, &theme(), 20);
        assert_eq!(lines.len(), 3 + 2);
    }

    #[test]
    fn test_wrap_chars() {
        assert_eq!(wrap_chars("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(wrap_chars("a\n\nb", 4), vec!["a", "", "b"]);
    }
}
