//! Typed inbound events and outbound UI effects

use super::answers::{FieldChange, FieldId, FormAnswers};
use super::autosave::AutosaveStatus;
use super::completion::{CharCount, CompletionResult};
use super::preferences::{PreferenceAction, PreferenceSource, Preferences};

/// Events the host reports to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    FieldChanged(FieldChange),
    FieldBlurred(FieldId),
    QuestionFocused(usize),
    NextQuestion,
    PreviousQuestion,
    SaveRequested,
    SubmitRequested,
    /// Ask to clear; the host confirms before sending `ClearConfirmed`
    ClearRequested,
    ClearConfirmed,
    Preference(PreferenceAction, PreferenceSource),
    SpeakQuestion(usize),
}

/// Active question position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub index: usize,
    pub total: usize,
}

impl Position {
    pub fn counter_text(&self) -> String {
        format!("Question {} / {}", self.index + 1, self.total)
    }

    /// Fraction of the progress bar to fill
    pub fn progress_ratio(&self) -> f64 {
        (self.index + 1) as f64 / self.total as f64
    }

    pub fn announcement(&self) -> String {
        format!("Question {} of {}", self.index + 1, self.total)
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.total
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Changes the host applies to its display
#[derive(Debug, Clone, PartialEq)]
pub enum UiEffect {
    FieldError { field: FieldId, visible: bool },
    Completion(CompletionResult),
    CharCounter(CharCount),
    Position(Position),
    ScrollTo { index: usize, behavior: ScrollBehavior },
    Focus(usize),
    /// Replace every mirrored field value
    FieldValues(FormAnswers),
    /// Replace one text field's value after normalization
    FieldText { field: FieldId, value: String },
    Toast(String),
    Message(String),
    Status(AutosaveStatus),
    Announce(String),
    ConfirmClear(String),
    Preferences(Preferences),
    Speak(String),
    Submitting(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_text() {
        let pos = Position { index: 2, total: 6 };
        assert_eq!(pos.counter_text(), "Question 3 / 6");
        assert_eq!(pos.announcement(), "Question 3 of 6");
        assert!((pos.progress_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_position_bounds() {
        assert!(Position { index: 0, total: 6 }.is_first());
        assert!(Position { index: 5, total: 6 }.is_last());
        assert!(!Position { index: 4, total: 6 }.is_last());
    }
}
