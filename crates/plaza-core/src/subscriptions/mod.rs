//! Built-in subscription sources.
//!
//! All terminal-backed subscriptions read from one shared event pump, so any
//! number of them can be active at once:
//!
//! - [`terminal_events`] -- every keyboard, mouse, resize, focus and paste
//!   event, mapped by the application.
//! - [`pointer_events`] -- left-button presses only, keyed so each widget
//!   instance owns its own listener.

mod terminal;

pub use terminal::*;
