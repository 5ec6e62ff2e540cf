//! Layout components (header, status bar, toast)

use super::theme::Theme;
use crate::app::App;
use crate::platform::shortcut;
use crate::state::{AutosaveStatus, Focus, Position, KEY_ROWS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

/// Header height (title line, progress bar, live region)
const HEADER_HEIGHT: u16 = 3;
/// Keyboard panel height: one row per key row plus borders
pub const KEYBOARD_HEIGHT: u16 = KEY_ROWS.len() as u16 + 2;

/// Screen regions, shared by drawing and mouse hit testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub toolbar: Rect,
    pub questions: Rect,
    pub keyboard: Option<Rect>,
    pub status: Rect,
}

impl AppLayout {
    pub fn new(area: Rect, keyboard_visible: bool) -> Self {
        let keyboard_height = if keyboard_visible { KEYBOARD_HEIGHT } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),   // Header
                Constraint::Length(1),               // Toolbar
                Constraint::Min(0),                  // Questions
                Constraint::Length(keyboard_height), // On-screen keyboard
                Constraint::Length(1),               // Status bar
            ])
            .split(area);

        Self {
            header: chunks[0],
            toolbar: chunks[1],
            questions: chunks[2],
            keyboard: keyboard_visible.then_some(chunks[3]),
            status: chunks[4],
        }
    }
}

/// Draw the title, progress bar and live region
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let state = &app.state;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let title = Line::from(vec![
        Span::styled(
            " Accessibility Feedback ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", state.position.counter_text()),
            Style::default().fg(theme.text),
        ),
        Span::styled(
            format!("  {}", state.completion.label()),
            Style::default().fg(if state.completion.percentage == 100 {
                theme.success
            } else {
                theme.muted
            }),
        ),
    ]);
    frame.render_widget(Paragraph::new(title).style(theme.base()), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.accent).bg(theme.background))
        .ratio(state.position.progress_ratio().clamp(0.0, 1.0))
        .label("");
    frame.render_widget(gauge, rows[1]);

    // Live region: the latest announcement, if any
    let live = state
        .announcement
        .as_ref()
        .map(|a| a.text.as_str())
        .unwrap_or("");
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {live}"),
            Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::ITALIC),
        ))
        .style(theme.base()),
        rows[2],
    );
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let state = &app.state;
    let status_color = match state.status {
        AutosaveStatus::Failed => theme.error,
        AutosaveStatus::Saving => theme.warning,
        AutosaveStatus::Idle => theme.muted,
        AutosaveStatus::Saved(_) | AutosaveStatus::Submitted => theme.success,
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", state.status.text()),
        Style::default().fg(status_color),
    )];
    if state.submitting {
        spans.push(Span::raw("| "));
        spans.push(Span::styled("Submitting…", Style::default().fg(theme.warning)));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw("| "));
    spans.push(Span::styled(
        hints(state.focus, state.position),
        Style::default().fg(theme.muted),
    ));

    let bar = Paragraph::new(Line::from(spans)).style(theme.base().add_modifier(Modifier::REVERSED));
    frame.render_widget(bar, area);
}

fn hints(focus: Focus, position: Position) -> String {
    let save = shortcut("S");
    match focus {
        Focus::Page => {
            let arrows = match (position.is_first(), position.is_last()) {
                (true, _) => "↓:next",
                (_, true) => "↑:previous",
                _ => "↑↓:question",
            };
            format!("{arrows}  Enter:answer  t:read aloud  ?:help  {save}:save  F10:submit")
        }
        Focus::Input(_) => {
            format!("Tab:next  Shift+Tab:previous  Esc:leave field  {save}:save  F10:submit")
        }
    }
}

/// Draw the toast, bottom right above the status bar
pub fn draw_toast(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let Some(toast) = &app.state.toast else {
        return;
    };

    let width = (toast.text.chars().count() as u16 + 4).min(area.width);
    let height = 3u16.min(area.height);
    let toast_area = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y + area.height.saturating_sub(height),
        width,
        height,
    };

    frame.render_widget(Clear, toast_area);
    frame.render_widget(
        Paragraph::new(format!(" {}", toast.text))
            .style(theme.base().fg(theme.success))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.success)),
            ),
        toast_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_region_only_when_visible() {
        let area = Rect::new(0, 0, 80, 30);
        let hidden = AppLayout::new(area, false);
        assert!(hidden.keyboard.is_none());
        assert_eq!(hidden.questions.height, 30 - HEADER_HEIGHT - 1 - 1);

        let shown = AppLayout::new(area, true);
        let keyboard = shown.keyboard.unwrap();
        assert_eq!(keyboard.height, KEYBOARD_HEIGHT);
        assert_eq!(shown.status.y, 29);
        assert_eq!(keyboard.y + keyboard.height, shown.status.y);
    }

    #[test]
    fn test_page_hints_follow_position() {
        let first = Position { index: 0, total: 6 };
        let middle = Position { index: 2, total: 6 };
        assert!(hints(Focus::Page, first).starts_with("↓:next"));
        assert!(hints(Focus::Page, middle).starts_with("↑↓:question"));
        assert!(hints(Focus::Input(2), middle).starts_with("Tab:next"));
    }
}
