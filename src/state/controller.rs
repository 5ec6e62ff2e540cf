//! Form controller: dispatches inbound events to the form components and
//! collects the resulting UI effects

use super::answers::{FieldChange, FieldId, FormAnswers};
use super::autosave::Autosave;
use super::completion::{self, CharCount};
use super::events::{FormEvent, Position, UiEffect};
use super::field_store::FieldStore;
use super::navigation::{self, Navigator};
use super::persistence::{self, Persistence};
use super::phone::format_phone;
use super::preferences::{PreferenceAction, PreferenceSource, Preferences};
use super::questions;
use super::timings::Timings;
use super::validation;
use crate::storage::KeyValueStore;
use chrono::Local;
use std::time::Instant;

const CLEAR_PROMPT: &str = "Are you sure you want to clear all form data?";
const SUBMIT_SUCCESS: &str = "Form submitted successfully! Thank you for your feedback.";
const SUBMIT_FAILURE: &str = "Please correct the errors on the form.";

/// Owns every piece of form state. Each event produces a list of effects
/// for the host to apply; nothing here touches the display directly.
pub struct FormController {
    fields: FieldStore,
    persistence: Persistence,
    navigator: Navigator,
    autosave: Autosave,
    preferences: Preferences,
    timings: Timings,
    /// When an in-flight submission completes
    pending_submit: Option<Instant>,
}

impl FormController {
    pub fn new(store: Box<dyn KeyValueStore>, timings: Timings, total_questions: usize) -> Self {
        let persistence = Persistence::new(store);
        let preferences = Preferences::load(persistence.store());
        Self {
            fields: FieldStore::new(),
            persistence,
            navigator: Navigator::new(total_questions),
            autosave: Autosave::new(timings.autosave_delay, timings.manual_save_delay),
            preferences,
            timings,
            pending_submit: None,
        }
    }

    /// Restore saved progress and describe the initial display
    pub fn start(&mut self) -> Vec<UiEffect> {
        let mut effects = vec![UiEffect::Preferences(self.preferences)];

        if let Some(saved) = self.persistence.load() {
            let start_index = persistence::restoration_index(&saved);
            let restored = persistence::was_restored(&saved);

            let mut answers = saved;
            answers.retain_known_options();
            self.fields.replace(answers);
            self.navigator = Navigator::starting_at(self.navigator.total(), start_index);

            effects.push(UiEffect::FieldValues(self.fields.get().clone()));
            if restored {
                tracing::info!("Restored saved progress at question {start_index}");
                effects.push(UiEffect::Toast("Progress restored!".to_string()));
                effects.push(UiEffect::Status(self.autosave.mark_saved(Local::now())));
            }
        }

        effects.extend(navigation::initial_effects(self.navigator.position()));
        effects.push(UiEffect::CharCounter(CharCount::of(&self.fields.get().feedback)));
        effects.push(UiEffect::Completion(completion::compute(self.fields.get())));
        effects
    }

    pub fn handle(&mut self, event: FormEvent, now: Instant) -> Vec<UiEffect> {
        match event {
            FormEvent::FieldChanged(change) => self.on_field_changed(change, now),
            FormEvent::FieldBlurred(field) => self.on_field_blurred(field),
            FormEvent::QuestionFocused(index) => {
                let moved = self.navigator.jump_to(index);
                self.transition(moved)
            }
            FormEvent::NextQuestion => {
                let moved = self.navigator.next();
                self.transition(moved)
            }
            FormEvent::PreviousQuestion => {
                let moved = self.navigator.previous();
                self.transition(moved)
            }
            FormEvent::SaveRequested => {
                self.autosave.request_manual(now);
                Vec::new()
            }
            FormEvent::SubmitRequested => self.on_submit(now),
            FormEvent::ClearRequested => vec![UiEffect::ConfirmClear(CLEAR_PROMPT.to_string())],
            FormEvent::ClearConfirmed => self.on_clear(),
            FormEvent::Preference(action, source) => self.on_preference(action, source),
            FormEvent::SpeakQuestion(index) => questions::speech_text(index)
                .map(UiEffect::Speak)
                .into_iter()
                .collect(),
        }
    }

    /// Fire any timers that are due
    pub fn tick(&mut self, now: Instant) -> Vec<UiEffect> {
        let mut effects = Vec::new();

        if let Some(pending) = self.autosave.take_due(now) {
            let succeeded = match self.persistence.save(self.fields.get()) {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!("Autosave failed: {err}");
                    false
                }
            };
            effects.push(UiEffect::Status(
                self.autosave.complete(succeeded, Local::now()),
            ));
            if pending.manual && succeeded {
                effects.push(UiEffect::Toast("Progress saved manually!".to_string()));
            }
        }

        if self.pending_submit.is_some_and(|due| due <= now) {
            self.pending_submit = None;
            effects.extend(self.finish_submit());
        }

        effects
    }

    /// Earliest instant at which `tick` has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.autosave.next_deadline(), self.pending_submit) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn answers(&self) -> &FormAnswers {
        self.fields.get()
    }

    pub fn position(&self) -> Position {
        self.navigator.position()
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    pub fn is_unsaved(&self) -> bool {
        self.autosave.is_unsaved()
    }

    pub fn is_submitting(&self) -> bool {
        self.pending_submit.is_some()
    }

    /// Unsaved edits in a field worth warning about before leaving
    pub fn has_unsaved_work(&self) -> bool {
        let answers = self.fields.get();
        self.autosave.is_unsaved()
            && (!answers.name.is_empty()
                || !answers.email.is_empty()
                || !answers.feedback.is_empty())
    }

    fn transition(&self, moved: bool) -> Vec<UiEffect> {
        if !moved {
            return Vec::new();
        }
        navigation::transition_effects(self.navigator.position(), self.preferences.reduced_motion)
    }

    fn on_field_changed(&mut self, change: FieldChange, now: Instant) -> Vec<UiEffect> {
        let mut effects = Vec::new();

        let change = match change {
            FieldChange::Phone(raw) => {
                let formatted = format_phone(&raw);
                if formatted != raw {
                    effects.push(UiEffect::FieldText {
                        field: FieldId::Phone,
                        value: formatted.clone(),
                    });
                }
                FieldChange::Phone(formatted)
            }
            other => other,
        };
        let field = change.field();
        self.fields.set(change);

        match field {
            FieldId::Experience if self.fields.get().experience.is_some() => {
                effects.push(UiEffect::FieldError {
                    field,
                    visible: false,
                });
            }
            FieldId::Feedback => {
                effects.push(UiEffect::CharCounter(CharCount::of(
                    &self.fields.get().feedback,
                )));
            }
            _ => {}
        }

        effects.push(UiEffect::Status(self.autosave.field_changed(now)));
        effects.push(UiEffect::Completion(completion::compute(self.fields.get())));
        effects
    }

    fn on_field_blurred(&self, field: FieldId) -> Vec<UiEffect> {
        validation::check_blur(field, self.fields.get())
            .error_visible()
            .map(|visible| UiEffect::FieldError { field, visible })
            .into_iter()
            .collect()
    }

    fn on_submit(&mut self, now: Instant) -> Vec<UiEffect> {
        if self.pending_submit.is_some() {
            tracing::debug!("Ignoring submit while a submission is in flight");
            return Vec::new();
        }

        let report = validation::validate_for_submit(self.fields.get());
        let mut effects: Vec<UiEffect> = report
            .verdicts
            .iter()
            .filter_map(|(field, verdict)| {
                verdict.error_visible().map(|visible| UiEffect::FieldError {
                    field: *field,
                    visible,
                })
            })
            .collect();

        if report.is_valid() {
            tracing::info!("Submitting form");
            self.pending_submit = Some(now + self.timings.submit_delay);
            effects.push(UiEffect::Submitting(true));
            effects.push(UiEffect::Announce("Submitting form".to_string()));
        } else {
            effects.push(UiEffect::Message(SUBMIT_FAILURE.to_string()));
            effects.push(UiEffect::Announce(SUBMIT_FAILURE.to_string()));
        }
        effects
    }

    fn finish_submit(&mut self) -> Vec<UiEffect> {
        if let Err(err) = self.persistence.remove() {
            tracing::warn!("Failed to remove saved progress after submit: {err}");
        }
        tracing::info!("Form submitted");

        vec![
            UiEffect::Submitting(false),
            UiEffect::Message(SUBMIT_SUCCESS.to_string()),
            UiEffect::Announce(SUBMIT_SUCCESS.to_string()),
            UiEffect::Status(self.autosave.mark_submitted()),
            UiEffect::Completion(completion::compute(self.fields.get())),
        ]
    }

    fn on_clear(&mut self) -> Vec<UiEffect> {
        tracing::info!("Clearing form");
        self.fields.clear();
        self.autosave.cancel();

        let mut effects = Vec::new();
        if self.pending_submit.take().is_some() {
            effects.push(UiEffect::Submitting(false));
        }
        if let Err(err) = self.persistence.remove() {
            tracing::warn!("Failed to remove saved progress: {err}");
        }

        for field in [FieldId::Name, FieldId::Email, FieldId::Experience] {
            effects.push(UiEffect::FieldError {
                field,
                visible: false,
            });
        }
        effects.push(UiEffect::FieldValues(FormAnswers::default()));

        self.navigator.reset();
        effects.extend(navigation::transition_effects(
            self.navigator.position(),
            self.preferences.reduced_motion,
        ));

        effects.push(UiEffect::Toast("Form cleared!".to_string()));
        effects.push(UiEffect::CharCounter(CharCount::of("")));
        effects.push(UiEffect::Status(self.autosave.mark_saved(Local::now())));
        effects.push(UiEffect::Completion(completion::compute(self.fields.get())));
        effects
    }

    fn on_preference(&mut self, action: PreferenceAction, source: PreferenceSource) -> Vec<UiEffect> {
        let message = self
            .preferences
            .apply(action, self.persistence.store_mut());
        let notice = match source {
            PreferenceSource::Toolbar => UiEffect::Announce(message),
            PreferenceSource::Shortcut => UiEffect::Toast(message),
        };
        vec![UiEffect::Preferences(self.preferences), notice]
    }
}
