//! Convenience helpers for common widget chrome patterns.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

/// Create a bordered block with focus-dependent border color.
///
/// Uses cyan when focused, dark gray when unfocused.
pub fn focus_block(title: &str, focused: bool) -> Block<'_> {
    let color = if focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    Block::new()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(color))
}

/// Block for a form field: [`focus_block`] plus a dimmed title when disabled
/// and a thick border when the field is invalid.
pub fn field_block(title: &str, focused: bool, disabled: bool, invalid: bool) -> Block<'_> {
    let block = focus_block(title, focused && !disabled);
    let block = if disabled {
        block.title_style(Style::default().add_modifier(Modifier::DIM))
    } else {
        block
    };
    if invalid {
        block
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(Color::Red))
    } else {
        block
    }
}
