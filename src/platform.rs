//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Modifier for form shortcuts
/// - macOS: SUPER (Cmd key) when the terminal reports it, CONTROL otherwise
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIERS: &[KeyModifiers] = &[KeyModifiers::SUPER, KeyModifiers::CONTROL];

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIERS: &[KeyModifiers] = &[KeyModifiers::CONTROL];

/// Modifier name shown in hints
#[cfg(target_os = "macos")]
pub const MODIFIER_LABEL: &str = "Cmd";

#[cfg(not(target_os = "macos"))]
pub const MODIFIER_LABEL: &str = "Ctrl";

/// Whether a key event carries the platform shortcut modifier
pub fn has_shortcut_modifier(modifiers: KeyModifiers) -> bool {
    SHORTCUT_MODIFIERS.iter().any(|m| modifiers.contains(*m))
}

/// Shortcut display, e.g. "Ctrl+S"
pub fn shortcut(key: &str) -> String {
    format!("{MODIFIER_LABEL}+{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_is_always_accepted() {
        assert!(has_shortcut_modifier(KeyModifiers::CONTROL));
        assert!(!has_shortcut_modifier(KeyModifiers::NONE));
        assert!(!has_shortcut_modifier(KeyModifiers::SHIFT));
    }

    #[test]
    fn test_shortcut_label() {
        assert!(shortcut("S").ends_with("+S"));
    }
}
