use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

/// Terminal events produced by the runtime's event pump.
///
/// `TerminalEvent` is delivered through
/// [`terminal_events`](crate::subscriptions::terminal_events) and
/// [`pointer_events`](crate::subscriptions::pointer_events). Every
/// subscriber sees every event, so an application-wide key handler and a
/// widget's outside-click listener can both observe the same click.
///
/// # Example
///
/// ```rust,ignore
/// use plaza_core::{subscriptions::terminal_events, TerminalEvent, Subscription};
///
/// fn subscriptions() -> Vec<Subscription<Msg>> {
///     vec![terminal_events(|ev| match ev {
///         TerminalEvent::Key(k) => Some(Msg::Key(k)),
///         _ => None,
///     })]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// A mouse event.
    Mouse(MouseEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Terminal window gained focus.
    FocusGained,
    /// Terminal window lost focus.
    FocusLost,
    /// Bracketed paste content.
    Paste(String),
}

impl TerminalEvent {
    /// The mouse event if this is a left-button press.
    pub fn pointer_down(&self) -> Option<MouseEvent> {
        match self {
            TerminalEvent::Mouse(m) if is_pointer_down(m) => Some(*m),
            _ => None,
        }
    }
}

impl From<crossterm::event::Event> for TerminalEvent {
    fn from(event: crossterm::event::Event) -> Self {
        match event {
            crossterm::event::Event::Key(k) => TerminalEvent::Key(k),
            crossterm::event::Event::Mouse(m) => TerminalEvent::Mouse(m),
            crossterm::event::Event::Resize(w, h) => TerminalEvent::Resize(w, h),
            crossterm::event::Event::FocusGained => TerminalEvent::FocusGained,
            crossterm::event::Event::FocusLost => TerminalEvent::FocusLost,
            crossterm::event::Event::Paste(s) => TerminalEvent::Paste(s),
        }
    }
}

/// Whether `event` is a left-button press.
pub fn is_pointer_down(event: &MouseEvent) -> bool {
    matches!(event.kind, MouseEventKind::Down(MouseButton::Left))
}

/// Whether the mouse event's cell lies inside `area`.
pub fn hits(area: Rect, event: &MouseEvent) -> bool {
    area.contains(Position::new(event.column, event.row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn pointer_down_only_for_left_press() {
        let down = TerminalEvent::Mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        let up = TerminalEvent::Mouse(mouse(MouseEventKind::Up(MouseButton::Left), 1, 1));
        let right = TerminalEvent::Mouse(mouse(MouseEventKind::Down(MouseButton::Right), 1, 1));
        assert!(down.pointer_down().is_some());
        assert!(up.pointer_down().is_none());
        assert!(right.pointer_down().is_none());
        assert!(TerminalEvent::FocusLost.pointer_down().is_none());
    }

    #[test]
    fn hits_respects_bounds() {
        let area = Rect::new(2, 3, 10, 2);
        assert!(hits(area, &mouse(MouseEventKind::Moved, 2, 3)));
        assert!(hits(area, &mouse(MouseEventKind::Moved, 11, 4)));
        assert!(!hits(area, &mouse(MouseEventKind::Moved, 12, 4)));
        assert!(!hits(area, &mouse(MouseEventKind::Moved, 5, 5)));
    }
}
