//! Field validation rules
//!
//! Blur-time checks only flag malformed input; leaving a field empty is not
//! reported until the form is submitted.

use super::answers::{is_experience_option, FieldId, FormAnswers};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// When a check runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMode {
    /// The user left the field
    Blur,
    /// The user asked to submit the form
    Submit,
}

/// Result of checking one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid,
    /// Nothing to report; the error display is left as it is
    Skipped,
}

impl Verdict {
    pub fn is_valid(self) -> bool {
        self == Verdict::Valid
    }

    /// Error visibility to apply, if the display should change
    pub fn error_visible(self) -> Option<bool> {
        match self {
            Verdict::Valid => Some(false),
            Verdict::Invalid => Some(true),
            Verdict::Skipped => None,
        }
    }
}

fn check_text(value: &str, mode: CheckMode, well_formed: impl Fn(&str) -> bool) -> Verdict {
    if value.is_empty() {
        return match mode {
            CheckMode::Blur => Verdict::Skipped,
            CheckMode::Submit => Verdict::Invalid,
        };
    }
    if well_formed(value) {
        Verdict::Valid
    } else {
        Verdict::Invalid
    }
}

/// Name must have at least two characters once trimmed
pub fn validate_name(value: &str, mode: CheckMode) -> Verdict {
    check_text(value, mode, |v| v.trim().chars().count() >= 2)
}

/// True when `value` has the `local@domain.tld` shape
pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

pub fn validate_email(value: &str, mode: CheckMode) -> Verdict {
    check_text(value, mode, is_email)
}

/// Exactly one known experience option must be selected.
///
/// There is no partial check: at blur time an unselected group is skipped.
pub fn validate_experience(selected: Option<&str>, mode: CheckMode) -> Verdict {
    match (selected, mode) {
        (Some(value), _) if is_experience_option(value) => Verdict::Valid,
        (_, CheckMode::Blur) => Verdict::Skipped,
        (_, CheckMode::Submit) => Verdict::Invalid,
    }
}

/// Run the blur-time check for a field. Fields without rules are skipped.
pub fn check_blur(field: FieldId, answers: &FormAnswers) -> Verdict {
    match field {
        FieldId::Name => validate_name(&answers.name, CheckMode::Blur),
        FieldId::Email => validate_email(&answers.email, CheckMode::Blur),
        FieldId::Experience => {
            validate_experience(answers.experience.as_deref(), CheckMode::Blur)
        }
        _ => Verdict::Skipped,
    }
}

/// Outcome of validating the whole form for submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReport {
    pub verdicts: BTreeMap<FieldId, Verdict>,
}

impl SubmitReport {
    pub fn is_valid(&self) -> bool {
        self.verdicts.values().all(|v| v.is_valid())
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.verdicts
            .iter()
            .filter(|(_, v)| !v.is_valid())
            .map(|(f, _)| *f)
    }
}

/// Submit-time validation of every required field
pub fn validate_for_submit(answers: &FormAnswers) -> SubmitReport {
    let verdicts = BTreeMap::from([
        (
            FieldId::Name,
            validate_name(&answers.name, CheckMode::Submit),
        ),
        (
            FieldId::Email,
            validate_email(&answers.email, CheckMode::Submit),
        ),
        (
            FieldId::Experience,
            validate_experience(answers.experience.as_deref(), CheckMode::Submit),
        ),
    ]);
    SubmitReport { verdicts }
}
