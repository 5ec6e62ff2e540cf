//! Completion tracking derived from the current answers

use super::answers::{FieldId, FormAnswers};
use super::validation::is_email;
use std::collections::BTreeMap;

/// Number of fields that count towards the completion percentage
const REQUIRED_FIELDS: u32 = 3;

/// Display bound of the feedback field
pub const FEEDBACK_LIMIT: usize = 500;

/// Character count at which the feedback counter turns into a warning
pub const FEEDBACK_WARNING_AT: usize = 450;

/// Per-field completion plus the overall percentage
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionResult {
    pub per_field: BTreeMap<FieldId, bool>,
    pub percentage: u8,
}

impl CompletionResult {
    pub fn is_complete(&self, field: FieldId) -> bool {
        self.per_field.get(&field).copied().unwrap_or(false)
    }

    pub fn label(&self) -> String {
        format!("{}% Complete", self.percentage)
    }
}

/// Compute completion. Only name, email and experience count towards the
/// percentage; the optional fields are tracked per field only.
pub fn compute(answers: &FormAnswers) -> CompletionResult {
    let per_field = BTreeMap::from([
        (FieldId::Name, !answers.name.trim().is_empty()),
        (
            FieldId::Email,
            !answers.email.is_empty() && is_email(&answers.email),
        ),
        (FieldId::Phone, !answers.phone.trim().is_empty()),
        (FieldId::Experience, answers.has_value(FieldId::Experience)),
        (FieldId::Features, !answers.features.is_empty()),
        (FieldId::Feedback, !answers.feedback.trim().is_empty()),
    ]);

    let completed = [FieldId::Name, FieldId::Email, FieldId::Experience]
        .iter()
        .filter(|f| per_field[f])
        .count() as u32;
    let percentage = ((completed * 100) as f64 / REQUIRED_FIELDS as f64).round() as u8;

    CompletionResult {
        per_field,
        percentage,
    }
}

/// Feedback character counter state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCount {
    pub count: usize,
    pub warning: bool,
}

impl CharCount {
    pub fn of(text: &str) -> Self {
        let count = text.chars().count();
        Self {
            count,
            warning: count >= FEEDBACK_WARNING_AT,
        }
    }

    pub fn label(&self) -> String {
        format!("{} / {} characters", self.count, FEEDBACK_LIMIT)
    }
}
