//! UI module for rendering the TUI

mod components;
mod keyboard;
mod layout;
mod questions;
mod theme;
mod toolbar;

pub use keyboard::virtual_key_at;
pub use layout::AppLayout;
pub use questions::question_at;
pub use toolbar::{toolbar_button_at, ToolbarButton};

use crate::app::App;
use crate::state::Dialog;
use components::{render_confirm_dialog, render_help_dialog, render_message_dialog};
use ratatui::{layout::Rect, widgets::Block, Frame};
use std::time::Instant;
use theme::Theme;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App, now: Instant) {
    let state = &app.state;
    let theme = Theme::from_preferences(&state.preferences);
    let area = frame.area();
    let layout = AppLayout::new(area, state.preferences.keyboard_visible);

    frame.render_widget(Block::default().style(theme.base()), area);

    layout::draw_header(frame, layout.header, app, &theme);
    toolbar::draw(frame, layout.toolbar, &state.preferences, &theme);
    questions::draw(frame, layout.questions, state, &theme, now);
    if let Some(keyboard_area) = layout.keyboard {
        keyboard::draw(frame, keyboard_area, &state.keyboard, &theme);
    }
    layout::draw_status_bar(frame, layout.status, app, &theme);

    let above_status = Rect {
        height: layout.status.y.saturating_sub(area.y),
        ..area
    };
    layout::draw_toast(frame, above_status, app, &theme);

    match &state.dialog {
        Some(Dialog::Message(message)) => render_message_dialog(frame, message, &theme),
        Some(Dialog::Confirm(pending)) => render_confirm_dialog(frame, pending, &theme),
        Some(Dialog::Help) => render_help_dialog(frame, &theme),
        None => {}
    }
}
