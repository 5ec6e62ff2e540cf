//! The scrolling list of question blocks

use super::components::text_field_lines;
use super::theme::Theme;
use crate::state::{
    error_message, AppState, FieldId, Focus, Question, EXPERIENCE_OPTIONS, FEATURE_OPTIONS,
    QUESTIONS,
};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

/// Gutter marking the current question
const GUTTER: u16 = 2;
/// Content rows of the feedback box before it starts growing
const FEEDBACK_ROWS: usize = 3;

/// All question blocks laid out top to bottom
struct QuestionView {
    lines: Vec<Line<'static>>,
    tops: Vec<u16>,
    heights: Vec<u16>,
}

impl QuestionView {
    fn build(state: &AppState, theme: &Theme, width: u16) -> Self {
        let mut lines = Vec::new();
        let mut tops = Vec::with_capacity(QUESTIONS.len());
        let mut heights = Vec::with_capacity(QUESTIONS.len());

        for (index, question) in QUESTIONS.iter().enumerate() {
            let block = question_lines(index, question, state, theme, width);
            tops.push(lines.len() as u16);
            heights.push(block.len() as u16);
            lines.extend(block);
        }

        Self {
            lines,
            tops,
            heights,
        }
    }

    fn total_height(&self) -> u16 {
        self.lines.len() as u16
    }

    /// First visible row for a scroll offset measured in questions
    fn view_top(&self, offset: f32, area_height: u16) -> u16 {
        let index = (offset.max(0.0).floor() as usize).min(self.tops.len() - 1);
        let fraction = (offset - index as f32).clamp(0.0, 1.0);
        let y = f32::from(self.tops[index]) + fraction * f32::from(self.heights[index]);
        let max_top = self.total_height().saturating_sub(area_height);
        (y.round() as u16).saturating_sub(1).min(max_top)
    }

    fn question_at_row(&self, row: u16) -> Option<usize> {
        self.tops
            .iter()
            .zip(&self.heights)
            .position(|(top, height)| row >= *top && row < top + height)
    }
}

fn question_lines(
    index: usize,
    question: &Question,
    state: &AppState,
    theme: &Theme,
    width: u16,
) -> Vec<Line<'static>> {
    let field = question.field;
    let inner_width = width.saturating_sub(GUTTER + 1);
    let is_focused = state.focus == Focus::Input(index);
    let has_error = state.field_errors.contains(&field);
    let mut lines = Vec::new();

    let mut prompt = vec![
        Span::styled(format!("{}. ", index + 1), Style::default().fg(theme.muted)),
        Span::styled(
            question.prompt,
            Style::default().fg(theme.text).add_modifier(theme.emphasis),
        ),
    ];
    if question.required {
        prompt.push(Span::styled(" *", Style::default().fg(theme.error)));
        prompt.push(if state.completion.is_complete(field) {
            Span::styled(" ✓", Style::default().fg(theme.success))
        } else {
            Span::styled(" ○", Style::default().fg(theme.muted))
        });
    }
    lines.push(Line::from(prompt));

    if theme.shows_hints() {
        if let Some(hint) = question.hint {
            lines.push(Line::from(Span::styled(
                format!("   {hint}"),
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::ITALIC),
            )));
        }
    }

    match field {
        FieldId::Experience | FieldId::Features => {
            lines.extend(choice_lines(field, is_focused, state, theme));
        }
        _ => {
            if let Some(input) = state.input(field) {
                let min_rows = if input.is_multiline { FEEDBACK_ROWS } else { 1 };
                lines.extend(text_field_lines(
                    input,
                    is_focused,
                    has_error,
                    min_rows,
                    theme,
                    inner_width,
                ));
            }
        }
    }

    if field == FieldId::Feedback {
        let color = if state.char_count.warning {
            theme.warning
        } else {
            theme.muted
        };
        lines.push(Line::from(Span::styled(
            format!("   {}", state.char_count.label()),
            Style::default().fg(color),
        )));
    }

    if has_error {
        if let Some(message) = error_message(field) {
            lines.push(Line::from(Span::styled(
                format!("   ! {message}"),
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            )));
        }
    }

    for _ in 0..=theme.spacing {
        lines.push(Line::from(""));
    }

    let gutter = if state.position.index == index {
        Span::styled("▌ ", Style::default().fg(theme.accent))
    } else {
        Span::raw("  ")
    };
    lines
        .into_iter()
        .map(|mut line| {
            line.spans.insert(0, gutter.clone());
            line
        })
        .collect()
}

fn choice_lines(
    field: FieldId,
    is_focused: bool,
    state: &AppState,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let (options, is_radio) = match field {
        FieldId::Experience => (EXPERIENCE_OPTIONS, true),
        _ => (FEATURE_OPTIONS, false),
    };
    let cursor = state.choice_cursor(field);

    options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let selected = if is_radio {
                state.experience.as_deref() == Some(option.value)
            } else {
                state.features.contains(option.value)
            };
            let marker = match (is_radio, selected) {
                (true, true) => "(•)",
                (true, false) => "( )",
                (false, true) => "[x]",
                (false, false) => "[ ]",
            };
            let is_cursor = is_focused && i == cursor;
            let style = if is_cursor {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else if selected {
                Style::default().fg(theme.text)
            } else {
                Style::default().fg(theme.muted)
            };
            let pointer = if is_cursor { " › " } else { "   " };
            Line::from(Span::styled(
                format!("{pointer}{marker} {}", option.label),
                style,
            ))
        })
        .collect()
}

/// Which question block is under a screen position
pub fn question_at(area: Rect, state: &AppState, now: Instant, pos: Position) -> Option<usize> {
    if !area.contains(pos) {
        return None;
    }
    let theme = Theme::from_preferences(&state.preferences);
    let view = QuestionView::build(state, &theme, area.width);
    let top = view.view_top(state.scroll.offset(now), area.height);
    view.question_at_row(top + (pos.y - area.y))
}

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme, now: Instant) {
    let view = QuestionView::build(state, theme, area.width);
    let top = view.view_top(state.scroll.offset(now), area.height);
    let paragraph = Paragraph::new(view.lines)
        .style(theme.base())
        .scroll((top, 0));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Preferences, Timings, UiEffect};

    fn state() -> (AppState, Instant) {
        let now = Instant::now();
        (AppState::new(Timings::default(), now), now)
    }

    fn view(state: &AppState) -> QuestionView {
        QuestionView::build(state, &Theme::from_preferences(&Preferences::default()), 60)
    }

    #[test]
    fn test_blocks_are_contiguous() {
        let (s, _) = state();
        let v = view(&s);
        for i in 1..v.tops.len() {
            assert_eq!(v.tops[i], v.tops[i - 1] + v.heights[i - 1]);
        }
        assert_eq!(v.question_at_row(0), Some(0));
        assert_eq!(v.question_at_row(v.tops[3]), Some(3));
        assert_eq!(v.question_at_row(v.total_height()), None);
    }

    #[test]
    fn test_error_adds_a_line() {
        let (mut s, now) = state();
        let before = view(&s).heights[1];
        s.apply(
            UiEffect::FieldError {
                field: FieldId::Email,
                visible: true,
            },
            now,
        );
        assert_eq!(view(&s).heights[1], before + 1);
    }

    #[test]
    fn test_view_top_follows_offset_and_clamps() {
        let (s, _) = state();
        let v = view(&s);
        assert_eq!(v.view_top(0.0, 10), 0);
        assert_eq!(v.view_top(2.0, 10), v.tops[2] - 1);
        // Cannot scroll past the end
        assert_eq!(v.view_top(5.0, 1000), 0);
    }

    #[test]
    fn test_question_at_maps_screen_rows() {
        let (s, now) = state();
        let area = Rect::new(0, 4, 60, 40);
        assert_eq!(question_at(area, &s, now, Position::new(5, 4)), Some(0));
        assert_eq!(question_at(area, &s, now, Position::new(5, 3)), None);
    }
}
