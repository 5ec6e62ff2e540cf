//! Reusable UI components

mod dialog;
mod text_field;

pub use dialog::{render_confirm_dialog, render_help_dialog, render_message_dialog};
pub use text_field::text_field_lines;
