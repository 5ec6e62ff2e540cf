//! Host-side display state: the terminal's mirror of the form

use super::answers::{FieldId, FormAnswers};
use super::autosave::AutosaveStatus;
use super::completion::{CharCount, CompletionResult};
use super::events::{Position, ScrollBehavior, UiEffect};
use super::keyboard::VirtualKeyboard;
use super::phone::{cursor_after_digits, phone_digits};
use super::preferences::Preferences;
use super::questions::{question, QUESTION_COUNT};
use super::text_input::TextInput;
use super::timings::Timings;
use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

/// Where keyboard input goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Page level: arrows move between questions
    Page,
    /// Inside the input of a question
    Input(usize),
}

/// Action awaiting confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Clear,
    Quit,
}

/// Confirmation dialog state. Cancel is preselected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirm {
    pub action: ConfirmAction,
    pub message: String,
    pub confirm_selected: bool,
}

impl PendingConfirm {
    pub fn new(action: ConfirmAction, message: impl Into<String>) -> Self {
        Self {
            action,
            message: message.into(),
            confirm_selected: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Message(String),
    Confirm(PendingConfirm),
    Help,
}

/// A message that disappears on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transient {
    pub text: String,
    pub expires_at: Instant,
}

impl Transient {
    pub fn new(text: String, now: Instant, lifetime: Duration) -> Self {
        Self {
            text,
            expires_at: now + lifetime,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Eased scroll between question offsets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    pub fn settled(at: f32, now: Instant) -> Self {
        Self {
            from: at,
            to: at,
            started: now,
            duration: Duration::ZERO,
        }
    }

    /// Current offset, in questions
    pub fn offset(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started);
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let progress = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * simple_easing::cubic_out(progress)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) < self.duration
    }

    /// Head for `to`, starting from wherever the scroll currently is
    pub fn retarget(&mut self, to: f32, now: Instant, duration: Duration) {
        *self = Self {
            from: self.offset(now),
            to,
            started: now,
            duration,
        };
    }
}

/// Everything the terminal renders
#[derive(Debug, Clone)]
pub struct AppState {
    pub inputs: BTreeMap<FieldId, TextInput>,
    pub experience: Option<String>,
    pub features: BTreeSet<String>,
    /// Highlighted option per choice question
    pub choice_cursor: BTreeMap<FieldId, usize>,
    pub field_errors: BTreeSet<FieldId>,
    pub completion: CompletionResult,
    pub char_count: CharCount,
    pub position: Position,
    pub focus: Focus,
    /// Last focused free-text field, target of the on-screen keyboard
    pub active_text_field: Option<FieldId>,
    pub keyboard: VirtualKeyboard,
    pub scroll: ScrollAnimation,
    pub status: AutosaveStatus,
    pub toast: Option<Transient>,
    pub announcement: Option<Transient>,
    pub dialog: Option<Dialog>,
    pub preferences: Preferences,
    pub submitting: bool,
    pub timings: Timings,
}

impl AppState {
    pub fn new(timings: Timings, now: Instant) -> Self {
        let inputs = FieldId::ALL
            .iter()
            .filter(|f| f.is_text())
            .map(|f| (*f, TextInput::new(*f == FieldId::Feedback)))
            .collect();

        Self {
            inputs,
            experience: None,
            features: BTreeSet::new(),
            choice_cursor: BTreeMap::new(),
            field_errors: BTreeSet::new(),
            completion: CompletionResult::default(),
            char_count: CharCount::of(""),
            position: Position {
                index: 0,
                total: QUESTION_COUNT,
            },
            focus: Focus::Page,
            active_text_field: None,
            keyboard: VirtualKeyboard::default(),
            scroll: ScrollAnimation::settled(0.0, now),
            status: AutosaveStatus::Idle,
            toast: None,
            announcement: None,
            dialog: None,
            preferences: Preferences::default(),
            submitting: false,
            timings,
        }
    }

    pub fn input(&self, field: FieldId) -> Option<&TextInput> {
        self.inputs.get(&field)
    }

    pub fn input_mut(&mut self, field: FieldId) -> Option<&mut TextInput> {
        self.inputs.get_mut(&field)
    }

    /// Field of the question that currently has input focus
    pub fn focused_field(&self) -> Option<FieldId> {
        match self.focus {
            Focus::Input(index) => question(index).map(|q| q.field),
            Focus::Page => None,
        }
    }

    /// Move input focus to a question (host-initiated focus)
    pub fn focus_question(&mut self, index: usize) {
        let index = index.min(QUESTION_COUNT - 1);
        self.focus = Focus::Input(index);
        if let Some(q) = question(index) {
            if q.field.is_text() {
                self.active_text_field = Some(q.field);
                if let Some(input) = self.inputs.get_mut(&q.field) {
                    input.move_end();
                }
            }
        }
    }

    pub fn choice_cursor(&self, field: FieldId) -> usize {
        self.choice_cursor.get(&field).copied().unwrap_or(0)
    }

    pub fn show_toast(&mut self, text: impl Into<String>, now: Instant) {
        self.toast = Some(Transient::new(
            text.into(),
            now,
            self.timings.toast_duration,
        ));
    }

    pub fn announce(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        tracing::debug!("Announcement: {text}");
        self.announcement = Some(Transient::new(
            text,
            now,
            self.timings.announcement_duration,
        ));
    }

    /// Drop expired transient messages
    pub fn expire(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
        if self
            .announcement
            .as_ref()
            .is_some_and(|a| a.is_expired(now))
        {
            self.announcement = None;
        }
    }

    /// Earliest instant at which something on screen changes by itself
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.toast.as_ref().map(|t| t.expires_at),
            self.announcement.as_ref().map(|a| a.expires_at),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    fn fill(&mut self, answers: &FormAnswers) {
        for (field, input) in self.inputs.iter_mut() {
            input.set_value(answers.text(*field).unwrap_or_default());
        }
        self.experience = answers.experience.clone();
        self.features = answers.features.clone();
    }

    /// Apply one effect produced by the form controller
    pub fn apply(&mut self, effect: UiEffect, now: Instant) {
        match effect {
            UiEffect::FieldError { field, visible } => {
                if visible {
                    self.field_errors.insert(field);
                } else {
                    self.field_errors.remove(&field);
                }
            }
            UiEffect::Completion(result) => self.completion = result,
            UiEffect::CharCounter(count) => self.char_count = count,
            UiEffect::Position(position) => self.position = position,
            UiEffect::ScrollTo { index, behavior } => {
                let duration = match behavior {
                    ScrollBehavior::Smooth => self.timings.scroll_duration,
                    ScrollBehavior::Instant => Duration::ZERO,
                };
                self.scroll.retarget(index as f32, now, duration);
            }
            UiEffect::Focus(index) => self.focus_question(index),
            UiEffect::FieldValues(answers) => self.fill(&answers),
            UiEffect::FieldText { field, value } => {
                if let Some(input) = self.inputs.get_mut(&field) {
                    // Keep the cursor behind the same digit across reformatting
                    let (before, _) = input.split_at_cursor();
                    let digits = phone_digits(before).chars().count();
                    input.set_value(value);
                    input.set_cursor(cursor_after_digits(input.value(), digits));
                }
            }
            UiEffect::Toast(text) => self.show_toast(text, now),
            UiEffect::Message(text) => self.dialog = Some(Dialog::Message(text)),
            UiEffect::Status(status) => self.status = status,
            UiEffect::Announce(text) => self.announce(text, now),
            UiEffect::ConfirmClear(message) => {
                self.dialog = Some(Dialog::Confirm(PendingConfirm::new(
                    ConfirmAction::Clear,
                    message,
                )));
            }
            UiEffect::Preferences(preferences) => self.preferences = preferences,
            UiEffect::Speak(text) => {
                tracing::info!("Speaking: {text}");
                self.announce(text, now);
            }
            UiEffect::Submitting(submitting) => self.submitting = submitting,
        }
    }
}
