//! On-screen keyboard behavior (caps lock, one-shot shift, editing)

use super::text_input::TextInput;

/// A key on the on-screen keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VirtualKey {
    /// Inserts its text (single letters follow caps/shift)
    Text(&'static str),
    Backspace,
    CapsLock,
    Shift,
    /// Hides the keyboard panel
    Close,
}

impl VirtualKey {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text(" ") => "Space",
            Self::Text(text) => text,
            Self::Backspace => "⌫",
            Self::CapsLock => "Caps",
            Self::Shift => "Shift",
            Self::Close => "Close",
        }
    }
}

use VirtualKey::{Backspace, CapsLock, Close, Shift, Text};

/// Key rows, top to bottom
pub const KEY_ROWS: &[&[VirtualKey]] = &[
    &[
        Text("1"),
        Text("2"),
        Text("3"),
        Text("4"),
        Text("5"),
        Text("6"),
        Text("7"),
        Text("8"),
        Text("9"),
        Text("0"),
        Backspace,
    ],
    &[
        Text("q"),
        Text("w"),
        Text("e"),
        Text("r"),
        Text("t"),
        Text("y"),
        Text("u"),
        Text("i"),
        Text("o"),
        Text("p"),
    ],
    &[
        CapsLock,
        Text("a"),
        Text("s"),
        Text("d"),
        Text("f"),
        Text("g"),
        Text("h"),
        Text("j"),
        Text("k"),
        Text("l"),
        Text("@"),
    ],
    &[
        Shift,
        Text("z"),
        Text("x"),
        Text("c"),
        Text("v"),
        Text("b"),
        Text("n"),
        Text("m"),
        Text("."),
        Text("-"),
        Text("_"),
    ],
    &[Text(".com"), Text(" "), Close],
];

/// What a key press did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// No text input was focused; nothing changed
    NoTarget,
    /// The target's text changed
    Edited,
    /// A modifier toggled, optionally with an announcement
    Modifier(Option<String>),
    /// The keyboard asked to be hidden
    Close,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VirtualKeyboard {
    pub caps_lock: bool,
    pub shift: bool,
}

impl VirtualKeyboard {
    pub fn press(&mut self, key: VirtualKey, target: Option<&mut TextInput>) -> KeyOutcome {
        if key == Close {
            return KeyOutcome::Close;
        }
        let Some(input) = target else {
            return KeyOutcome::NoTarget;
        };

        match key {
            Backspace => {
                input.backspace();
                KeyOutcome::Edited
            }
            CapsLock => {
                self.caps_lock = !self.caps_lock;
                let message = if self.caps_lock {
                    "Caps lock on"
                } else {
                    "Caps lock off"
                };
                KeyOutcome::Modifier(Some(message.to_string()))
            }
            Shift => {
                self.shift = !self.shift;
                KeyOutcome::Modifier(None)
            }
            Close => KeyOutcome::Close,
            Text(text) => {
                let is_single = text.chars().count() == 1;
                let inserted = if is_single && (self.caps_lock || self.shift) {
                    text.to_uppercase()
                } else if is_single {
                    text.to_lowercase()
                } else {
                    text.to_string()
                };
                input.insert_str(&inserted);
                self.shift = false;
                KeyOutcome::Edited
            }
        }
    }
}
