//! **plaza** -- terminal forms for the plaza administration console.
//!
//! This is the umbrella crate that re-exports everything needed to build a
//! console form from a single dependency:
//!
//! ```toml
//! [dependencies]
//! plaza = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`plaza_core`] are available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Subscription`], [`Program`],
//!   [`run`], [`run_with`], etc.).
//! * The [`widgets`] module re-exports everything from [`plaza_widgets`]
//!   (the searchable select and its supporting modules).
//! * [`ratatui`], [`crossterm`], [`tokio`] and [`serde_json`] are re-exported
//!   so downstream crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use plaza::widgets::searchable_select::{self, SearchableSelect};
//! use plaza::widgets::Record;
//! use plaza::{terminal_events, Command, Component, Model, Subscription, TerminalEvent};
//! use ratatui::Frame;
//!
//! struct Form {
//!     authorizer: SearchableSelect,
//! }
//!
//! enum Msg {
//!     Authorizer(searchable_select::Message),
//! }
//!
//! impl Model for Form {
//!     type Message = Msg;
//!     type Flags = Vec<Record>;
//!
//!     fn init(people: Vec<Record>) -> (Self, Command<Msg>) {
//!         let authorizer = SearchableSelect::records(people).with_label("Authorizer");
//!         (Form { authorizer }, Command::none())
//!     }
//!     fn update(&mut self, msg: Msg) -> Command<Msg> {
//!         match msg {
//!             Msg::Authorizer(searchable_select::Message::Changed(id)) => {
//!                 self.authorizer.set_value(id);
//!                 Command::none()
//!             }
//!             Msg::Authorizer(m) => self.authorizer.update(m).map(Msg::Authorizer),
//!         }
//!     }
//!     fn view(&self, frame: &mut Frame) {
//!         self.authorizer.view(frame, frame.area());
//!     }
//!     fn subscriptions(&self) -> Vec<Subscription<Msg>> {
//!         let mut subs = vec![terminal_events(|ev| match ev {
//!             TerminalEvent::Key(k) => Some(Msg::Authorizer(searchable_select::Message::KeyPress(k))),
//!             TerminalEvent::Mouse(m) => Some(Msg::Authorizer(searchable_select::Message::Mouse(m))),
//!             _ => None,
//!         })];
//!         subs.extend(self.authorizer.subscriptions().into_iter().map(|s| s.map(Msg::Authorizer)));
//!         subs
//!     }
//! }
//! ```

pub use plaza_core::*;
pub mod widgets {
    pub use plaza_widgets::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use ratatui;
pub use serde_json;
pub use tokio;
