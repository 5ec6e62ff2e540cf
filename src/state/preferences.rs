//! Accessibility preferences: font size, contrast, motion, on-screen keyboard

use crate::storage::KeyValueStore;

pub const FONT_SIZE_KEY: &str = "fontSize";
pub const HIGH_CONTRAST_KEY: &str = "highContrast";
pub const REDUCED_MOTION_KEY: &str = "reducedMotion";
pub const VIRTUAL_KEYBOARD_KEY: &str = "virtualKeyboard";

pub const MIN_FONT_SIZE: u8 = 12;
pub const MAX_FONT_SIZE: u8 = 24;
pub const DEFAULT_FONT_SIZE: u8 = 16;
const FONT_STEP: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceAction {
    IncreaseFont,
    DecreaseFont,
    ToggleContrast,
    ToggleMotion,
    ToggleKeyboard,
    CloseKeyboard,
}

/// Where a preference change came from; toolbar changes are announced,
/// shortcut changes are shown as a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceSource {
    Toolbar,
    Shortcut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub font_size: u8,
    pub high_contrast: bool,
    pub reduced_motion: bool,
    pub keyboard_visible: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            high_contrast: false,
            reduced_motion: false,
            keyboard_visible: false,
        }
    }
}

fn clamp_font(size: i64) -> u8 {
    size.clamp(MIN_FONT_SIZE as i64, MAX_FONT_SIZE as i64) as u8
}

fn read_flag(store: &dyn KeyValueStore, key: &str) -> bool {
    matches!(store.get(key), Ok(Some(value)) if value == "true")
}

impl Preferences {
    /// Read saved preferences. Unreadable or unparsable values fall back
    /// to the defaults.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let font_size = match store.get(FONT_SIZE_KEY) {
            Ok(Some(raw)) => raw
                .trim()
                .parse::<i64>()
                .map(clamp_font)
                .unwrap_or(DEFAULT_FONT_SIZE),
            _ => DEFAULT_FONT_SIZE,
        };

        Self {
            font_size,
            high_contrast: read_flag(store, HIGH_CONTRAST_KEY),
            reduced_motion: read_flag(store, REDUCED_MOTION_KEY),
            keyboard_visible: read_flag(store, VIRTUAL_KEYBOARD_KEY),
        }
    }

    /// Apply an action, persist the changed key and return the message
    /// describing the change
    pub fn apply(&mut self, action: PreferenceAction, store: &mut dyn KeyValueStore) -> String {
        let (key, value, message) = match action {
            PreferenceAction::IncreaseFont => {
                self.font_size = clamp_font(self.font_size as i64 + FONT_STEP as i64);
                (
                    FONT_SIZE_KEY,
                    self.font_size.to_string(),
                    "Font size increased",
                )
            }
            PreferenceAction::DecreaseFont => {
                self.font_size = clamp_font(self.font_size as i64 - FONT_STEP as i64);
                (
                    FONT_SIZE_KEY,
                    self.font_size.to_string(),
                    "Font size decreased",
                )
            }
            PreferenceAction::ToggleContrast => {
                self.high_contrast = !self.high_contrast;
                (
                    HIGH_CONTRAST_KEY,
                    self.high_contrast.to_string(),
                    if self.high_contrast {
                        "High contrast enabled"
                    } else {
                        "High contrast disabled"
                    },
                )
            }
            PreferenceAction::ToggleMotion => {
                self.reduced_motion = !self.reduced_motion;
                (
                    REDUCED_MOTION_KEY,
                    self.reduced_motion.to_string(),
                    if self.reduced_motion {
                        "Reduced motion enabled"
                    } else {
                        "Reduced motion disabled"
                    },
                )
            }
            PreferenceAction::ToggleKeyboard => {
                self.keyboard_visible = !self.keyboard_visible;
                (
                    VIRTUAL_KEYBOARD_KEY,
                    self.keyboard_visible.to_string(),
                    if self.keyboard_visible {
                        "Virtual keyboard opened"
                    } else {
                        "Virtual keyboard closed"
                    },
                )
            }
            PreferenceAction::CloseKeyboard => {
                self.keyboard_visible = false;
                (
                    VIRTUAL_KEYBOARD_KEY,
                    false.to_string(),
                    "Virtual keyboard closed",
                )
            }
        };

        if let Err(err) = store.set(key, &value) {
            tracing::warn!("Failed to persist preference {key}: {err}");
        }
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_defaults_without_saved_values() {
        let store = MemoryStore::new();
        assert_eq!(Preferences::load(&store), Preferences::default());
    }

    #[test]
    fn test_load_clamps_font_size() {
        let mut store = MemoryStore::new();
        store.set(FONT_SIZE_KEY, "40").unwrap();
        assert_eq!(Preferences::load(&store).font_size, MAX_FONT_SIZE);

        store.set(FONT_SIZE_KEY, "3").unwrap();
        assert_eq!(Preferences::load(&store).font_size, MIN_FONT_SIZE);

        store.set(FONT_SIZE_KEY, "large").unwrap();
        assert_eq!(Preferences::load(&store).font_size, DEFAULT_FONT_SIZE);
    }

    #[test]
    fn test_flags_require_literal_true() {
        let mut store = MemoryStore::new();
        store.set(HIGH_CONTRAST_KEY, "true").unwrap();
        store.set(REDUCED_MOTION_KEY, "yes").unwrap();
        let prefs = Preferences::load(&store);
        assert!(prefs.high_contrast);
        assert!(!prefs.reduced_motion);
    }

    #[test]
    fn test_font_steps_are_bounded() {
        let mut store = MemoryStore::new();
        let mut prefs = Preferences::default();
        for _ in 0..10 {
            prefs.apply(PreferenceAction::IncreaseFont, &mut store);
        }
        assert_eq!(prefs.font_size, MAX_FONT_SIZE);
        assert_eq!(store.get(FONT_SIZE_KEY).unwrap().as_deref(), Some("24"));

        let message = prefs.apply(PreferenceAction::DecreaseFont, &mut store);
        assert_eq!(message, "Font size decreased");
        assert_eq!(prefs.font_size, 22);
    }

    #[test]
    fn test_toggles_persist_and_describe_change() {
        let mut store = MemoryStore::new();
        let mut prefs = Preferences::default();

        let message = prefs.apply(PreferenceAction::ToggleMotion, &mut store);
        assert_eq!(message, "Reduced motion enabled");
        assert_eq!(store.get(REDUCED_MOTION_KEY).unwrap().as_deref(), Some("true"));

        let message = prefs.apply(PreferenceAction::ToggleContrast, &mut store);
        assert_eq!(message, "High contrast enabled");
        let message = prefs.apply(PreferenceAction::ToggleContrast, &mut store);
        assert_eq!(message, "High contrast disabled");

        prefs.apply(PreferenceAction::ToggleKeyboard, &mut store);
        assert!(prefs.keyboard_visible);
        let message = prefs.apply(PreferenceAction::CloseKeyboard, &mut store);
        assert_eq!(message, "Virtual keyboard closed");
        assert_eq!(
            store.get(VIRTUAL_KEYBOARD_KEY).unwrap().as_deref(),
            Some("false")
        );

        assert_eq!(Preferences::load(&store), prefs);
    }
}
