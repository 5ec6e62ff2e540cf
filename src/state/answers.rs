//! Form answer snapshot and field identifiers

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// A fixed choice offered by a single- or multi-select question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Value written to storage
    pub value: &'static str,
    /// Label shown to the user
    pub label: &'static str,
}

/// Experience levels (single select)
pub const EXPERIENCE_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption {
        value: "beginner",
        label: "Beginner",
    },
    ChoiceOption {
        value: "intermediate",
        label: "Intermediate",
    },
    ChoiceOption {
        value: "advanced",
        label: "Advanced",
    },
    ChoiceOption {
        value: "expert",
        label: "Expert",
    },
];

/// Accessibility features the user relies on (multi select)
pub const FEATURE_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption {
        value: "screen-reader",
        label: "Screen reader support",
    },
    ChoiceOption {
        value: "keyboard-navigation",
        label: "Keyboard navigation",
    },
    ChoiceOption {
        value: "high-contrast",
        label: "High contrast mode",
    },
    ChoiceOption {
        value: "text-to-speech",
        label: "Text to speech",
    },
    ChoiceOption {
        value: "virtual-keyboard",
        label: "On-screen keyboard",
    },
];

pub fn is_experience_option(value: &str) -> bool {
    EXPERIENCE_OPTIONS.iter().any(|o| o.value == value)
}

pub fn is_feature_option(value: &str) -> bool {
    FEATURE_OPTIONS.iter().any(|o| o.value == value)
}

/// Identifies one answer field of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    Name,
    Email,
    Phone,
    Experience,
    Features,
    Feedback,
}

impl FieldId {
    pub const ALL: [FieldId; 6] = [
        FieldId::Name,
        FieldId::Email,
        FieldId::Phone,
        FieldId::Experience,
        FieldId::Features,
        FieldId::Feedback,
    ];

    /// Index of the question block that holds this field
    pub fn question_index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Email => 1,
            Self::Phone => 2,
            Self::Experience => 3,
            Self::Features => 4,
            Self::Feedback => 5,
        }
    }

    /// Whether the field is edited as free text
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Self::Name | Self::Email | Self::Phone | Self::Feedback
        )
    }
}

/// Serializable snapshot of everything the user has entered.
///
/// Missing or `null` values in stored JSON read back as the empty default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormAnswers {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    pub experience: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub features: BTreeSet<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub feedback: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl FormAnswers {
    /// True when no field carries a value
    pub fn is_empty(&self) -> bool {
        !FieldId::ALL.iter().any(|f| self.has_value(*f))
    }

    /// Whether a field holds a non-default value
    pub fn has_value(&self, field: FieldId) -> bool {
        match field {
            FieldId::Name => !self.name.is_empty(),
            FieldId::Email => !self.email.is_empty(),
            FieldId::Phone => !self.phone.is_empty(),
            FieldId::Experience => self.experience.as_deref().is_some_and(|e| !e.is_empty()),
            FieldId::Features => !self.features.is_empty(),
            FieldId::Feedback => !self.feedback.is_empty(),
        }
    }

    /// Text value of a free-text field
    pub fn text(&self, field: FieldId) -> Option<&str> {
        match field {
            FieldId::Name => Some(&self.name),
            FieldId::Email => Some(&self.email),
            FieldId::Phone => Some(&self.phone),
            FieldId::Feedback => Some(&self.feedback),
            FieldId::Experience | FieldId::Features => None,
        }
    }

    /// Drop choice values outside the fixed option sets
    pub fn retain_known_options(&mut self) {
        if self
            .experience
            .as_deref()
            .is_some_and(|e| !is_experience_option(e))
        {
            self.experience = None;
        }
        self.features.retain(|f| is_feature_option(f));
    }
}

/// A single-field update to the answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Name(String),
    Email(String),
    Phone(String),
    Experience(Option<String>),
    Feature { value: String, checked: bool },
    Feedback(String),
}

impl FieldChange {
    pub fn field(&self) -> FieldId {
        match self {
            Self::Name(_) => FieldId::Name,
            Self::Email(_) => FieldId::Email,
            Self::Phone(_) => FieldId::Phone,
            Self::Experience(_) => FieldId::Experience,
            Self::Feature { .. } => FieldId::Features,
            Self::Feedback(_) => FieldId::Feedback,
        }
    }

    /// Build a text change for a free-text field
    pub fn text(field: FieldId, value: String) -> Option<Self> {
        match field {
            FieldId::Name => Some(Self::Name(value)),
            FieldId::Email => Some(Self::Email(value)),
            FieldId::Phone => Some(Self::Phone(value)),
            FieldId::Feedback => Some(Self::Feedback(value)),
            FieldId::Experience | FieldId::Features => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_empty() {
        assert!(FormAnswers::default().is_empty());
    }

    #[test]
    fn test_serializes_all_fields() {
        let answers = FormAnswers {
            name: "Ada".to_string(),
            features: ["text-to-speech".to_string()].into_iter().collect(),
            ..Default::default()
        };
        let value: serde_json::Value = serde_json::to_value(&answers).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Ada",
                "email": "",
                "phone": "",
                "experience": null,
                "features": ["text-to-speech"],
                "feedback": ""
            })
        );
    }

    #[test]
    fn test_nulls_and_missing_fields_read_as_empty() {
        let json = r#"{"name": null, "email": "a@b.co", "features": null}"#;
        let answers: FormAnswers = serde_json::from_str(json).unwrap();
        assert_eq!(answers.name, "");
        assert_eq!(answers.email, "a@b.co");
        assert_eq!(answers.phone, "");
        assert_eq!(answers.experience, None);
        assert!(answers.features.is_empty());
    }

    #[test]
    fn test_retain_known_options() {
        let mut answers = FormAnswers {
            experience: Some("wizard".to_string()),
            features: ["screen-reader", "telepathy"]
                .into_iter()
                .map(String::from)
                .collect(),
            ..Default::default()
        };
        answers.retain_known_options();
        assert_eq!(answers.experience, None);
        assert_eq!(
            answers.features.into_iter().collect::<Vec<_>>(),
            vec!["screen-reader".to_string()]
        );
    }

    #[test]
    fn test_empty_experience_string_has_no_value() {
        let answers = FormAnswers {
            experience: Some(String::new()),
            ..Default::default()
        };
        assert!(!answers.has_value(FieldId::Experience));
    }

    #[test]
    fn test_question_indices_follow_field_order() {
        for (i, field) in FieldId::ALL.iter().enumerate() {
            assert_eq!(field.question_index(), i);
        }
    }
}
