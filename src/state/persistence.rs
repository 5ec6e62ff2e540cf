//! Persistence adapter: saves, restores and removes form progress

use super::answers::{FieldId, FormAnswers};
use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the serialized answers
pub const PROGRESS_KEY: &str = "formProgress";

/// Field priority used to pick the resume question, latest first
const RESUME_PRIORITY: [FieldId; 6] = [
    FieldId::Feedback,
    FieldId::Features,
    FieldId::Experience,
    FieldId::Phone,
    FieldId::Email,
    FieldId::Name,
];

/// Serializes [`FormAnswers`] to a key-value storage medium
pub struct Persistence {
    store: Box<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Overwrite the stored progress with `answers`
    pub fn save(&mut self, answers: &FormAnswers) -> Result<(), StorageError> {
        let json = serde_json::to_string(answers)?;
        self.store.set(PROGRESS_KEY, &json)?;
        tracing::debug!("Saved form progress ({} bytes)", json.len());
        Ok(())
    }

    /// Read stored progress. Absent, unreadable or malformed data all mean
    /// "no saved progress".
    pub fn load(&self) -> Option<FormAnswers> {
        let raw = match self.store.get(PROGRESS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::debug!("Could not read saved progress: {err}");
                return None;
            }
        };

        match serde_json::from_str::<Option<FormAnswers>>(&raw) {
            Ok(answers) => answers,
            Err(err) => {
                tracing::debug!("Discarding malformed saved progress: {err}");
                None
            }
        }
    }

    pub fn remove(&mut self) -> Result<(), StorageError> {
        self.store.remove(PROGRESS_KEY)
    }

    /// Underlying store, shared with the preference keys
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> &mut dyn KeyValueStore {
        self.store.as_mut()
    }
}

/// Question to resume at: the latest question in sequence whose field has
/// a value, or the first question when nothing was entered
pub fn restoration_index(answers: &FormAnswers) -> usize {
    RESUME_PRIORITY
        .iter()
        .find(|field| answers.has_value(**field))
        .map(|field| field.question_index())
        .unwrap_or(0)
}

/// Whether restored data carries anything worth telling the user about
pub fn was_restored(answers: &FormAnswers) -> bool {
    !answers.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, MockKeyValueStore};

    fn persistence() -> Persistence {
        Persistence::new(Box::new(MemoryStore::new()))
    }

    mod restoration {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_name_only_resumes_at_first_question() {
            let answers = FormAnswers {
                name: "A".to_string(),
                ..Default::default()
            };
            assert_eq!(restoration_index(&answers), 0);
        }

        #[test]
        fn test_nothing_entered_resumes_at_first_question() {
            assert_eq!(restoration_index(&FormAnswers::default()), 0);
        }

        #[test]
        fn test_fully_populated_resumes_at_feedback() {
            let answers = FormAnswers {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: "(555) 123-4567".to_string(),
                experience: Some("expert".to_string()),
                features: ["screen-reader".to_string()].into_iter().collect(),
                feedback: "x".to_string(),
            };
            assert_eq!(restoration_index(&answers), 5);
        }

        #[test]
        fn test_latest_field_wins_even_with_gaps() {
            let answers = FormAnswers {
                name: "Ada".to_string(),
                phone: "(555".to_string(),
                ..Default::default()
            };
            assert_eq!(restoration_index(&answers), 2);

            let answers = FormAnswers {
                features: ["high-contrast".to_string()].into_iter().collect(),
                ..Default::default()
            };
            assert_eq!(restoration_index(&answers), 4);
        }

        #[test]
        fn test_experience_and_email() {
            let answers = FormAnswers {
                email: "a@b.co".to_string(),
                experience: Some("beginner".to_string()),
                ..Default::default()
            };
            assert_eq!(restoration_index(&answers), 3);

            let answers = FormAnswers {
                email: "a@b.co".to_string(),
                ..Default::default()
            };
            assert_eq!(restoration_index(&answers), 1);
        }

        #[test]
        fn test_was_restored() {
            assert!(!was_restored(&FormAnswers::default()));
            assert!(was_restored(&FormAnswers {
                phone: "(5".to_string(),
                ..Default::default()
            }));
        }
    }

    mod adapter {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_load_without_saved_data() {
            assert_eq!(persistence().load(), None);
        }

        #[test]
        fn test_save_then_load() {
            let mut p = persistence();
            let answers = FormAnswers {
                name: "Ada".to_string(),
                experience: Some("advanced".to_string()),
                ..Default::default()
            };
            p.save(&answers).unwrap();
            assert_eq!(p.load(), Some(answers));
        }

        #[test]
        fn test_save_overwrites_instead_of_merging() {
            let mut p = persistence();
            p.save(&FormAnswers {
                name: "Ada".to_string(),
                feedback: "first".to_string(),
                ..Default::default()
            })
            .unwrap();
            p.save(&FormAnswers {
                email: "a@b.co".to_string(),
                ..Default::default()
            })
            .unwrap();

            let loaded = p.load().unwrap();
            assert_eq!(loaded.name, "");
            assert_eq!(loaded.feedback, "");
            assert_eq!(loaded.email, "a@b.co");
        }

        #[test]
        fn test_malformed_data_is_no_progress() {
            let mut store = MemoryStore::new();
            store.set(PROGRESS_KEY, "{not json").unwrap();
            let p = Persistence::new(Box::new(store));
            assert_eq!(p.load(), None);
        }

        #[test]
        fn test_json_null_is_no_progress() {
            let mut store = MemoryStore::new();
            store.set(PROGRESS_KEY, "null").unwrap();
            let p = Persistence::new(Box::new(store));
            assert_eq!(p.load(), None);
        }

        #[test]
        fn test_read_error_is_no_progress() {
            let mut store = MockKeyValueStore::new();
            store.expect_get().returning(|_| {
                Err(StorageError::Io(std::io::Error::other("disk unplugged")))
            });
            let p = Persistence::new(Box::new(store));
            assert_eq!(p.load(), None);
        }

        #[test]
        fn test_remove() {
            let mut p = persistence();
            p.save(&FormAnswers {
                name: "Ada".to_string(),
                ..Default::default()
            })
            .unwrap();
            p.remove().unwrap();
            assert_eq!(p.load(), None);
        }
    }
}
