//! Question navigation state machine

use super::events::{Position, ScrollBehavior, UiEffect};

/// Tracks the active question. The index always stays in `[0, total - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    current: usize,
    total: usize,
}

impl Navigator {
    pub fn new(total: usize) -> Self {
        Self {
            current: 0,
            total: total.max(1),
        }
    }

    /// Start at `index`, clamped into range
    pub fn starting_at(total: usize, index: usize) -> Self {
        let mut nav = Self::new(total);
        nav.current = index.min(nav.total - 1);
        nav
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn position(&self) -> Position {
        Position {
            index: self.current,
            total: self.total,
        }
    }

    /// Move forward; returns false at the last question
    pub fn next(&mut self) -> bool {
        if self.current + 1 >= self.total {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move back; returns false at the first question
    pub fn previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jump to `index` (clamped); returns false when nothing changed
    pub fn jump_to(&mut self, index: usize) -> bool {
        let target = index.min(self.total - 1);
        if target == self.current {
            return false;
        }
        self.current = target;
        true
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}

/// Effects of arriving at the current question
pub fn transition_effects(position: Position, reduced_motion: bool) -> Vec<UiEffect> {
    let behavior = if reduced_motion {
        ScrollBehavior::Instant
    } else {
        ScrollBehavior::Smooth
    };
    vec![
        UiEffect::ScrollTo {
            index: position.index,
            behavior,
        },
        UiEffect::Focus(position.index),
        UiEffect::Position(position),
        UiEffect::Announce(position.announcement()),
    ]
}

/// Effects of the first display: jump straight to a resumed question
/// without animation or announcement
pub fn initial_effects(position: Position) -> Vec<UiEffect> {
    if position.index == 0 {
        return vec![UiEffect::Position(position)];
    }
    vec![
        UiEffect::ScrollTo {
            index: position.index,
            behavior: ScrollBehavior::Instant,
        },
        UiEffect::Focus(position.index),
        UiEffect::Position(position),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_next_stops_at_last() {
        let mut nav = Navigator::new(6);
        for expected in 1..6 {
            assert!(nav.next());
            assert_eq!(nav.current(), expected);
        }
        assert!(!nav.next());
        assert_eq!(nav.current(), 5);
    }

    #[test]
    fn test_previous_stops_at_first() {
        let mut nav = Navigator::starting_at(6, 1);
        assert!(nav.previous());
        assert!(!nav.previous());
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn test_jump_is_clamped() {
        let mut nav = Navigator::new(6);
        assert!(nav.jump_to(42));
        assert_eq!(nav.current(), 5);
        assert!(!nav.jump_to(5));
        assert!(nav.jump_to(2));
        assert_eq!(nav.current(), 2);
    }

    #[test]
    fn test_starting_index_is_clamped() {
        assert_eq!(Navigator::starting_at(3, 9).current(), 2);
        assert_eq!(Navigator::new(0).total(), 1);
    }

    #[test]
    fn test_index_never_leaves_range() {
        let mut nav = Navigator::new(4);
        let moves = [1, 1, 1, 1, 1, -1, 1, -1, -1, -1, -1, -1, 1];
        for step in moves {
            if step > 0 {
                nav.next();
            } else {
                nav.previous();
            }
            assert!(nav.current() < nav.total());
        }
    }

    #[test]
    fn test_transition_effects_honor_reduced_motion() {
        let position = Position { index: 1, total: 6 };
        assert_eq!(
            transition_effects(position, true),
            vec![
                UiEffect::ScrollTo {
                    index: 1,
                    behavior: ScrollBehavior::Instant
                },
                UiEffect::Focus(1),
                UiEffect::Position(position),
                UiEffect::Announce("Question 2 of 6".to_string()),
            ]
        );
        assert!(matches!(
            transition_effects(position, false)[0],
            UiEffect::ScrollTo {
                behavior: ScrollBehavior::Smooth,
                ..
            }
        ));
    }

    #[test]
    fn test_initial_effects_at_first_question() {
        let position = Position { index: 0, total: 6 };
        assert_eq!(initial_effects(position), vec![UiEffect::Position(position)]);
    }
}
