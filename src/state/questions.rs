//! The question blocks that make up the form, in display order

use super::answers::FieldId;

/// One step of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub field: FieldId,
    pub prompt: &'static str,
    pub hint: Option<&'static str>,
    pub required: bool,
}

pub const QUESTIONS: [Question; 6] = [
    Question {
        field: FieldId::Name,
        prompt: "What is your full name?",
        hint: None,
        required: true,
    },
    Question {
        field: FieldId::Email,
        prompt: "What is your email address?",
        hint: Some("We will only use it to follow up on your feedback"),
        required: true,
    },
    Question {
        field: FieldId::Phone,
        prompt: "What is your phone number?",
        hint: Some("Optional, digits only"),
        required: false,
    },
    Question {
        field: FieldId::Experience,
        prompt: "How would you rate your experience with assistive technology?",
        hint: None,
        required: true,
    },
    Question {
        field: FieldId::Features,
        prompt: "Which accessibility features do you use?",
        hint: Some("Select all that apply"),
        required: false,
    },
    Question {
        field: FieldId::Feedback,
        prompt: "Any other feedback?",
        hint: Some("Up to 500 characters"),
        required: false,
    },
];

pub const QUESTION_COUNT: usize = QUESTIONS.len();

pub fn question(index: usize) -> Option<&'static Question> {
    QUESTIONS.get(index)
}

/// Inline error text shown when a required field fails validation
pub fn error_message(field: FieldId) -> Option<&'static str> {
    match field {
        FieldId::Name => Some("Please enter your full name (at least 2 characters)."),
        FieldId::Email => Some("Please enter a valid email address."),
        FieldId::Experience => Some("Please select your experience level."),
        _ => None,
    }
}

/// Text read aloud for a question: the prompt alone, without numbering,
/// required markers or completion indicators
pub fn speech_text(index: usize) -> Option<String> {
    question(index).map(|q| q.prompt.trim().to_string())
}
