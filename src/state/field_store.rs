//! In-memory owner of the current answers

use super::answers::{FieldChange, FormAnswers};

/// Holds the live answers. Setting values has no side effects of its own;
/// callers drive validation, completion and autosave explicitly.
#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    answers: FormAnswers,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &FormAnswers {
        &self.answers
    }

    pub fn set(&mut self, change: FieldChange) {
        match change {
            FieldChange::Name(value) => self.answers.name = value,
            FieldChange::Email(value) => self.answers.email = value,
            FieldChange::Phone(value) => self.answers.phone = value,
            FieldChange::Experience(value) => {
                self.answers.experience = value.filter(|v| !v.is_empty())
            }
            FieldChange::Feature { value, checked } => {
                if checked {
                    self.answers.features.insert(value);
                } else {
                    self.answers.features.remove(&value);
                }
            }
            FieldChange::Feedback(value) => self.answers.feedback = value,
        }
    }

    /// Replace every field at once (used when restoring saved progress)
    pub fn replace(&mut self, answers: FormAnswers) {
        self.answers = answers;
    }

    pub fn clear(&mut self) {
        self.answers = FormAnswers::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_is_idempotent() {
        let mut store = FieldStore::new();
        store.set(FieldChange::Name("Ada".to_string()));
        store.set(FieldChange::Name("Ada".to_string()));
        assert_eq!(store.get().name, "Ada");
    }

    #[test]
    fn test_feature_toggle() {
        let mut store = FieldStore::new();
        store.set(FieldChange::Feature {
            value: "screen-reader".to_string(),
            checked: true,
        });
        store.set(FieldChange::Feature {
            value: "screen-reader".to_string(),
            checked: true,
        });
        assert_eq!(store.get().features.len(), 1);

        store.set(FieldChange::Feature {
            value: "screen-reader".to_string(),
            checked: false,
        });
        assert!(store.get().features.is_empty());
    }

    #[test]
    fn test_empty_experience_clears_selection() {
        let mut store = FieldStore::new();
        store.set(FieldChange::Experience(Some("expert".to_string())));
        store.set(FieldChange::Experience(Some(String::new())));
        assert_eq!(store.get().experience, None);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut store = FieldStore::new();
        store.set(FieldChange::Email("a@b.co".to_string()));
        store.set(FieldChange::Experience(Some("beginner".to_string())));
        store.set(FieldChange::Feedback("great".to_string()));
        store.clear();
        assert_eq!(store.get(), &FormAnswers::default());
    }
}
