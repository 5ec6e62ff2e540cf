//! Application state and input handling
//!
//! Terminal key and mouse events are translated into [`FormEvent`]s for the
//! form controller; the effects it returns are applied to [`AppState`].

use crate::config::FormConfig;
use crate::platform::has_shortcut_modifier;
use crate::state::{
    ConfirmAction, Dialog, FieldChange, FieldId, Focus, FormController, FormEvent, KeyOutcome,
    PendingConfirm, PreferenceAction, PreferenceSource, UiEffect, VirtualKey, AppState,
    EXPERIENCE_OPTIONS, FEATURE_OPTIONS, QUESTION_COUNT,
};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::ui::{self, ToolbarButton};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::time::Instant;

const QUIT_PROMPT: &str = "You have unsaved changes. Quit anyway?";
const NO_TARGET_HINT: &str = "Please click on an input field first";

/// Main application struct
pub struct App {
    /// The form being filled in
    pub form: FormController,
    /// Display mirror of the form
    pub state: AppState,
    /// Whether the app should quit
    quit: bool,
    /// Terminal size for hit testing (height, width)
    pub terminal_size: Option<(u16, u16)>,
}

impl App {
    /// Create a new App, restoring any saved progress
    pub fn new(config: &FormConfig) -> Self {
        let store = open_store(config);
        let timings = config.timings();
        let now = Instant::now();

        let mut form = FormController::new(store, timings, QUESTION_COUNT);
        let mut state = AppState::new(timings, now);
        for effect in form.start() {
            state.apply(effect, now);
        }

        Self {
            form,
            state,
            quit: false,
            terminal_size: None,
        }
    }

    /// Build an App around an existing controller (used by tests)
    #[cfg(test)]
    pub fn with_form(mut form: FormController) -> Self {
        let now = Instant::now();
        let mut state = AppState::new(*form.timings(), now);
        for effect in form.start() {
            state.apply(effect, now);
        }
        Self {
            form,
            state,
            quit: false,
            terminal_size: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Fire due timers and expire transient messages
    pub fn tick(&mut self, now: Instant) {
        let effects = self.form.tick(now);
        self.apply(effects, now);
        self.state.expire(now);
    }

    /// Whether something on screen is moving and needs fast redraws
    pub fn is_animating(&self, now: Instant) -> bool {
        self.state.scroll.is_animating(now)
    }

    /// Earliest instant at which the app has work to do without input
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.form.next_deadline(), self.state.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn apply(&mut self, effects: Vec<UiEffect>, now: Instant) {
        for effect in effects {
            self.state.apply(effect, now);
        }
    }

    fn dispatch(&mut self, event: FormEvent) {
        let now = Instant::now();
        let effects = self.form.handle(event, now);
        self.apply(effects, now);
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.dialog.is_some() {
            self.handle_dialog_key(key);
            return Ok(());
        }

        if self.handle_shortcut(key) {
            return Ok(());
        }

        match self.state.focus {
            Focus::Page => self.handle_page_key(key),
            Focus::Input(index) => self.handle_input_key(index, key),
        }
        Ok(())
    }

    /// Global shortcuts; returns true when the key was consumed
    fn handle_shortcut(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::F(10) {
            self.dispatch(FormEvent::SubmitRequested);
            return true;
        }
        if !has_shortcut_modifier(key.modifiers) {
            return false;
        }

        let shortcut = |action| FormEvent::Preference(action, PreferenceSource::Shortcut);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => self.request_quit(),
            KeyCode::Char('s') => self.dispatch(FormEvent::SaveRequested),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.dispatch(shortcut(PreferenceAction::IncreaseFont))
            }
            KeyCode::Char('-') => self.dispatch(shortcut(PreferenceAction::DecreaseFont)),
            KeyCode::Char('h') => self.dispatch(shortcut(PreferenceAction::ToggleContrast)),
            KeyCode::Char('r') => self.dispatch(shortcut(PreferenceAction::ToggleMotion)),
            KeyCode::Char('k') => self.dispatch(shortcut(PreferenceAction::ToggleKeyboard)),
            KeyCode::Char('l') => self.dispatch(FormEvent::ClearRequested),
            _ => return false,
        }
        true
    }

    fn request_quit(&mut self) {
        if self.form.has_unsaved_work() {
            self.state.dialog = Some(Dialog::Confirm(PendingConfirm::new(
                ConfirmAction::Quit,
                QUIT_PROMPT,
            )));
        } else {
            self.quit = true;
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        let Some(dialog) = self.state.dialog.as_mut() else {
            return;
        };

        match dialog {
            Dialog::Message(_) | Dialog::Help => {
                if matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('?')
                ) {
                    self.state.dialog = None;
                }
            }
            Dialog::Confirm(pending) => match key.code {
                KeyCode::Esc => self.state.dialog = None,
                KeyCode::Left
                | KeyCode::Right
                | KeyCode::Up
                | KeyCode::Down
                | KeyCode::Tab
                | KeyCode::BackTab => {
                    pending.confirm_selected = !pending.confirm_selected;
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let confirmed = pending.confirm_selected;
                    let action = pending.action;
                    self.state.dialog = None;
                    if confirmed {
                        self.confirm(action);
                    }
                }
                _ => {}
            },
        }
    }

    fn confirm(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::Clear => self.dispatch(FormEvent::ClearConfirmed),
            ConfirmAction::Quit => self.quit = true,
        }
    }

    fn handle_page_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('?') => self.state.dialog = Some(Dialog::Help),
            KeyCode::Up => self.dispatch(FormEvent::PreviousQuestion),
            KeyCode::Down => self.dispatch(FormEvent::NextQuestion),
            KeyCode::Char('t') => {
                self.dispatch(FormEvent::SpeakQuestion(self.state.position.index))
            }
            KeyCode::Enter | KeyCode::Char('i') | KeyCode::Tab => {
                self.focus_input(self.state.position.index)
            }
            _ => {}
        }
    }

    /// Put input focus on a question, blurring the one it leaves
    fn focus_input(&mut self, index: usize) {
        match self.state.focus {
            Focus::Input(current) if current != index => self.move_focus(current, index),
            Focus::Input(_) => {}
            Focus::Page => {
                self.state.focus_question(index);
                self.dispatch(FormEvent::QuestionFocused(index));
            }
        }
    }

    /// Move input focus between questions, as the host reports it
    fn move_focus(&mut self, from: usize, to: usize) {
        self.blur(from);
        self.state.focus_question(to);
        self.dispatch(FormEvent::QuestionFocused(to));
    }

    fn blur(&mut self, index: usize) {
        if let Some(q) = crate::state::question(index) {
            self.dispatch(FormEvent::FieldBlurred(q.field));
        }
    }

    fn handle_input_key(&mut self, index: usize, key: KeyEvent) {
        let Some(field) = self.state.focused_field() else {
            return;
        };

        match key.code {
            KeyCode::Esc => {
                self.blur(index);
                self.state.focus = Focus::Page;
                return;
            }
            KeyCode::Tab => {
                if index + 1 < QUESTION_COUNT {
                    self.move_focus(index, index + 1);
                }
                return;
            }
            KeyCode::BackTab => {
                if index > 0 {
                    self.move_focus(index, index - 1);
                }
                return;
            }
            _ => {}
        }

        if field.is_text() {
            self.handle_text_key(index, field, key);
        } else {
            self.handle_choice_key(field, key);
        }
    }

    fn handle_text_key(&mut self, index: usize, field: FieldId, key: KeyEvent) {
        let Some(input) = self.state.input_mut(field) else {
            return;
        };

        let edited = match key.code {
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                input.push_char(c);
                true
            }
            KeyCode::Enter if input.is_multiline => {
                input.push_char('\n');
                true
            }
            KeyCode::Enter => {
                if index + 1 < QUESTION_COUNT {
                    self.move_focus(index, index + 1);
                }
                return;
            }
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => {
                input.move_left();
                false
            }
            KeyCode::Right => {
                input.move_right();
                false
            }
            KeyCode::Home => {
                input.move_home();
                false
            }
            KeyCode::End => {
                input.move_end();
                false
            }
            _ => false,
        };

        if edited {
            self.text_changed(field);
        }
    }

    fn text_changed(&mut self, field: FieldId) {
        let value = self
            .state
            .input(field)
            .map(|i| i.value().to_string())
            .unwrap_or_default();
        if let Some(change) = FieldChange::text(field, value) {
            self.dispatch(FormEvent::FieldChanged(change));
        }
    }

    fn handle_choice_key(&mut self, field: FieldId, key: KeyEvent) {
        let options = match field {
            FieldId::Experience => EXPERIENCE_OPTIONS,
            FieldId::Features => FEATURE_OPTIONS,
            _ => return,
        };
        let cursor = self.state.choice_cursor(field);

        match key.code {
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => {
                let next = cursor.checked_sub(1).unwrap_or(options.len() - 1);
                self.state.choice_cursor.insert(field, next);
            }
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => {
                self.state.choice_cursor.insert(field, (cursor + 1) % options.len());
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                let value = options[cursor].value.to_string();
                self.choose(field, value);
            }
            _ => {}
        }
    }

    fn choose(&mut self, field: FieldId, value: String) {
        let change = if field == FieldId::Experience {
            self.state.experience = Some(value.clone());
            FieldChange::Experience(Some(value))
        } else {
            let checked = !self.state.features.contains(&value);
            if checked {
                self.state.features.insert(value.clone());
            } else {
                self.state.features.remove(&value);
            }
            FieldChange::Feature { value, checked }
        };
        self.dispatch(FormEvent::FieldChanged(change));
    }

    /// Press a key on the on-screen keyboard
    pub fn press_virtual_key(&mut self, key: VirtualKey) {
        let now = Instant::now();
        let target = self.state.active_text_field;
        let mut keyboard = self.state.keyboard;
        let outcome = keyboard.press(key, target.and_then(|f| self.state.inputs.get_mut(&f)));
        self.state.keyboard = keyboard;

        match outcome {
            KeyOutcome::NoTarget => self.state.show_toast(NO_TARGET_HINT, now),
            KeyOutcome::Edited => {
                if let Some(field) = target {
                    self.text_changed(field);
                    // Typing on the keyboard puts focus back into the field
                    self.focus_input(field.question_index());
                }
            }
            KeyOutcome::Modifier(Some(message)) => self.state.announce(message, now),
            KeyOutcome::Modifier(None) => {}
            KeyOutcome::Close => self.dispatch(FormEvent::Preference(
                PreferenceAction::CloseKeyboard,
                PreferenceSource::Toolbar,
            )),
        }
    }

    fn press_toolbar(&mut self, button: ToolbarButton) {
        match button.preference() {
            Some(action) => {
                self.dispatch(FormEvent::Preference(action, PreferenceSource::Toolbar));
                if action == PreferenceAction::ToggleKeyboard
                    && self.state.preferences.keyboard_visible
                {
                    if let Some(field) = self.state.active_text_field {
                        self.focus_input(field.question_index());
                    }
                }
            }
            None => match button {
                ToolbarButton::Help => self.state.dialog = Some(Dialog::Help),
                ToolbarButton::Submit => self.dispatch(FormEvent::SubmitRequested),
                ToolbarButton::Clear => self.dispatch(FormEvent::ClearRequested),
                _ => {}
            },
        }
    }

    fn screen_area(&self) -> Rect {
        let (height, width) = self.terminal_size.unwrap_or((24, 80));
        Rect::new(0, 0, width, height)
    }

    /// Handle mouse events
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if self.state.dialog.is_some() {
            return Ok(());
        }

        let pos = Position::new(mouse.column, mouse.row);
        let layout = ui::AppLayout::new(self.screen_area(), self.state.preferences.keyboard_visible);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(button) = ui::toolbar_button_at(layout.toolbar, pos) {
                    self.press_toolbar(button);
                } else if let Some(key) = layout.keyboard.and_then(|k| ui::virtual_key_at(k, pos)) {
                    self.press_virtual_key(key);
                } else if let Some(index) =
                    ui::question_at(layout.questions, &self.state, Instant::now(), pos)
                {
                    self.focus_input(index);
                }
            }
            MouseEventKind::ScrollUp => self.dispatch(FormEvent::PreviousQuestion),
            MouseEventKind::ScrollDown => self.dispatch(FormEvent::NextQuestion),
            _ => {}
        }
        Ok(())
    }
}

/// Open the configured storage, falling back to memory when no data
/// directory can be resolved
fn open_store(config: &FormConfig) -> Box<dyn KeyValueStore> {
    let dir = config.storage_dir.clone().or_else(FileStore::default_dir);
    match dir {
        Some(dir) => {
            let store = FileStore::open(&dir);
            tracing::info!("Using storage at {}", store.path().display());
            Box::new(store)
        }
        None => {
            tracing::warn!("No data directory available, progress will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Timings;
    use crossterm::event::KeyEventState;

    fn app() -> App {
        App::with_form(FormController::new(
            Box::new(MemoryStore::new()),
            Timings::default(),
            QUESTION_COUNT,
        ))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char(c))
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    mod typing {
        use super::*;

        #[test]
        fn test_typing_updates_form_and_mirror() {
            let mut app = app();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            type_text(&mut app, "Ada");
            assert_eq!(app.form.answers().name, "Ada");
            assert_eq!(app.state.input(FieldId::Name).unwrap().value(), "Ada");
            assert!(app.state.status.is_saving());
        }

        #[test]
        fn test_phone_input_is_reformatted_in_mirror() {
            let mut app = app();
            app.state.focus_question(2);
            type_text(&mut app, "5551234567");
            assert_eq!(
                app.state.input(FieldId::Phone).unwrap().value(),
                "(555) 123-4567"
            );
        }

        #[test]
        fn test_tab_blurs_and_flags_short_name() {
            let mut app = app();
            app.state.focus_question(0);
            type_text(&mut app, "A");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            assert!(app.state.field_errors.contains(&FieldId::Name));
            assert_eq!(app.state.focus, Focus::Input(1));
            assert_eq!(app.form.position().index, 1);
        }

        #[test]
        fn test_choice_selection() {
            let mut app = app();
            app.state.focus_question(3);
            app.handle_key(key(KeyCode::Down)).unwrap();
            app.handle_key(key(KeyCode::Char(' '))).unwrap();
            assert_eq!(app.form.answers().experience.as_deref(), Some("intermediate"));

            app.state.focus_question(4);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(app.form.answers().features.is_empty());
        }
    }

    mod page {
        use super::*;

        #[test]
        fn test_arrows_navigate_outside_inputs() {
            let mut app = app();
            assert_eq!(app.state.focus, Focus::Page);
            app.handle_key(key(KeyCode::Down)).unwrap();
            assert_eq!(app.form.position().index, 1);
            assert_eq!(app.state.position.index, 1);
            assert!(app.state.announcement.is_some());
        }

        #[test]
        fn test_question_mark_opens_help() {
            let mut app = app();
            app.handle_key(key(KeyCode::Char('?'))).unwrap();
            assert_eq!(app.state.dialog, Some(Dialog::Help));
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.state.dialog, None);
        }
    }

    mod shortcuts {
        use super::*;

        #[test]
        fn test_clear_requires_confirmation() {
            let mut app = app();
            app.state.focus_question(0);
            type_text(&mut app, "Ada");

            app.handle_key(ctrl('l')).unwrap();
            // Cancel is preselected
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.form.answers().name, "Ada");

            app.handle_key(ctrl('l')).unwrap();
            app.handle_key(key(KeyCode::Right)).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.form.answers().name, "");
            assert_eq!(app.state.input(FieldId::Name).unwrap().value(), "");
        }

        #[test]
        fn test_quit_with_unsaved_work_asks_first() {
            let mut app = app();
            app.state.focus_question(0);
            type_text(&mut app, "Ada");
            app.handle_key(ctrl('q')).unwrap();
            assert!(!app.should_quit());
            assert!(matches!(app.state.dialog, Some(Dialog::Confirm(_))));

            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert!(!app.should_quit());
        }

        #[test]
        fn test_quit_without_changes() {
            let mut app = app();
            app.handle_key(ctrl('q')).unwrap();
            assert!(app.should_quit());
        }

        #[test]
        fn test_font_shortcut_shows_toast() {
            let mut app = app();
            app.handle_key(ctrl('=')).unwrap();
            assert_eq!(app.state.preferences.font_size, 18);
            assert_eq!(
                app.state.toast.as_ref().map(|t| t.text.as_str()),
                Some("Font size increased")
            );
        }

        #[test]
        fn test_submit_empty_form_shows_message() {
            let mut app = app();
            app.handle_key(key(KeyCode::F(10))).unwrap();
            assert!(matches!(app.state.dialog, Some(Dialog::Message(_))));
            assert!(app.state.field_errors.contains(&FieldId::Experience));
        }
    }

    mod virtual_keyboard {
        use super::*;

        #[test]
        fn test_press_without_target_shows_hint() {
            let mut app = app();
            app.press_virtual_key(VirtualKey::Text("a"));
            assert_eq!(
                app.state.toast.as_ref().map(|t| t.text.as_str()),
                Some(NO_TARGET_HINT)
            );
            assert!(app.form.answers().is_empty());
        }

        #[test]
        fn test_press_types_into_last_text_field() {
            let mut app = app();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.handle_key(key(KeyCode::Tab)).unwrap();
            // A click on the features question leaves email as keyboard target
            app.focus_input(4);
            assert_eq!(app.state.focus, Focus::Input(4));
            assert_eq!(app.form.position().index, 4);

            app.press_virtual_key(VirtualKey::Shift);
            app.press_virtual_key(VirtualKey::Text("a"));
            app.press_virtual_key(VirtualKey::Text("@"));
            assert_eq!(app.form.answers().email, "A@");
            assert_eq!(app.state.focus, Focus::Input(1));
            assert_eq!(app.form.position().index, 1);
            assert_eq!(app.state.position.index, 1);
        }

        #[test]
        fn test_opening_keyboard_returns_focus_to_text_field() {
            let mut app = app();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.handle_key(key(KeyCode::Tab)).unwrap();
            app.focus_input(3);
            assert_eq!(app.form.position().index, 3);

            app.press_toolbar(ToolbarButton::Keyboard);
            assert!(app.state.preferences.keyboard_visible);
            assert_eq!(app.state.focus, Focus::Input(1));
            assert_eq!(app.form.position().index, 1);
        }

        #[test]
        fn test_close_key_hides_keyboard() {
            let mut app = app();
            app.press_toolbar(ToolbarButton::Keyboard);
            assert!(app.state.preferences.keyboard_visible);

            app.press_virtual_key(VirtualKey::Close);
            assert!(!app.state.preferences.keyboard_visible);
            assert!(app.state.toast.is_none());
            assert_eq!(
                app.state.announcement.as_ref().map(|a| a.text.as_str()),
                Some("Virtual keyboard closed")
            );
        }
    }
}
