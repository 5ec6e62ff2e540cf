//! On-screen keyboard panel

use super::theme::Theme;
use crate::state::{VirtualKey, VirtualKeyboard, KEY_ROWS};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Gap between keys
const KEY_GAP: u16 = 1;

fn key_width(key: VirtualKey) -> u16 {
    key.label().chars().count() as u16 + 2
}

/// Key positions within the keyboard panel, rows centered
pub fn keyboard_keys(area: Rect) -> Vec<(VirtualKey, Rect)> {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let mut keys = Vec::new();

    for (row_index, row) in KEY_ROWS.iter().enumerate() {
        let y = inner.y + row_index as u16;
        if y >= inner.y + inner.height {
            break;
        }
        let row_width: u16 = row.iter().map(|k| key_width(*k) + KEY_GAP).sum::<u16>() - KEY_GAP;
        let mut x = inner.x + inner.width.saturating_sub(row_width) / 2;
        for key in row.iter() {
            let width = key_width(*key);
            if x + width > inner.x + inner.width {
                break;
            }
            keys.push((*key, Rect::new(x, y, width, 1)));
            x += width + KEY_GAP;
        }
    }
    keys
}

pub fn virtual_key_at(area: Rect, pos: Position) -> Option<VirtualKey> {
    keyboard_keys(area)
        .into_iter()
        .find(|(_, rect)| rect.contains(pos))
        .map(|(key, _)| key)
}

pub fn draw(frame: &mut Frame, area: Rect, keyboard: &VirtualKeyboard, theme: &Theme) {
    let block = Block::default()
        .title(" Keyboard ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .style(theme.base());
    frame.render_widget(block, area);

    let uppercase = keyboard.caps_lock || keyboard.shift;
    for (key, rect) in keyboard_keys(area) {
        let is_on = match key {
            VirtualKey::CapsLock => keyboard.caps_lock,
            VirtualKey::Shift => keyboard.shift,
            _ => false,
        };
        let label = match key {
            VirtualKey::Text(text) if uppercase && text.chars().count() == 1 => {
                text.to_uppercase()
            }
            _ => key.label().to_string(),
        };
        let style = if is_on {
            Style::default()
                .fg(theme.background)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text).add_modifier(Modifier::REVERSED)
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(format!(" {label} "), style))),
            rect,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_row_fits_a_normal_terminal() {
        let area = Rect::new(0, 20, 80, 7);
        let keys = keyboard_keys(area);
        let expected: usize = KEY_ROWS.iter().map(|r| r.len()).sum();
        assert_eq!(keys.len(), expected);
    }

    #[test]
    fn test_keys_do_not_overlap_and_hit_test_back() {
        let area = Rect::new(0, 20, 80, 7);
        for (key, rect) in keyboard_keys(area) {
            assert_eq!(virtual_key_at(area, Position::new(rect.x, rect.y)), Some(key));
        }
        // Border row is never a key
        assert_eq!(virtual_key_at(area, Position::new(40, 20)), None);
    }

    #[test]
    fn test_space_bar_row() {
        let area = Rect::new(0, 0, 80, 7);
        let keys = keyboard_keys(area);
        assert!(keys.iter().any(|(k, r)| *k == VirtualKey::Text(" ") && r.y == 5));
    }
}
