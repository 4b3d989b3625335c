//! Core runtime for the **plaza** administration console.
//!
//! `plaza-core` provides the traits, types, and runtime the console's forms
//! are built on. The design follows the [Elm Architecture]: a program is an
//! **init -> update -> view** cycle, with side effects pushed to the edges
//! through [`Command`]s and [`Subscription`]s.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view) |
//! | [`Component`] | Reusable sub-model that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Describes a side effect to be executed by the runtime |
//! | [`Subscription`] | Long-lived event source, diffed every cycle |
//! | [`Program`] | Wires a [`Model`] to a real terminal and drives the event loop |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for unit-testing a [`Model`] |
//!
//! Terminal input is read once and broadcast, so the application's own
//! [`terminal_events`] subscription and the per-widget [`pointer_events`]
//! listeners all see the same events.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod subscriptions;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{init_file_logging, Program, ProgramError, ProgramOptions};
pub use subscription::{Subscription, SubscriptionId};
pub use subscriptions::{pointer_events, terminal_events};

/// Run a plaza application with default options.
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags)?.run().await
}

/// Run with custom options.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
