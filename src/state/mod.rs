//! Form state: answers, validation, navigation and autosave

mod answers;
mod app_state;
mod autosave;
mod completion;
mod controller;
mod events;
mod field_store;
mod keyboard;
mod navigation;
mod persistence;
mod phone;
mod preferences;
mod questions;
mod text_input;
mod timings;
mod validation;

pub use answers::*;
pub use app_state::*;
pub use autosave::AutosaveStatus;
pub use completion::{CharCount, CompletionResult};
pub use controller::FormController;
pub use events::*;
pub use keyboard::{KeyOutcome, VirtualKey, VirtualKeyboard, KEY_ROWS};
pub use preferences::{PreferenceAction, PreferenceSource, Preferences};
pub use questions::{error_message, question, Question, QUESTIONS, QUESTION_COUNT};
pub use text_input::TextInput;
pub use timings::Timings;
