//! Form widgets for the **plaza** administration console.
//!
//! The centrepiece is [`SearchableSelect`](searchable_select::SearchableSelect),
//! a single-choice select over a possibly large option list with
//! type-to-filter search, Spanish collation and paged reveal on scroll. It
//! implements [`plaza_core::Component`], so it can be embedded in any
//! [`plaza_core::Model`] and laid out with [`ratatui`].
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`searchable_select`] | The select component |
//! | [`option`] | Resolving options to display text and values; JSON [`Record`](option::Record)s |
//! | [`catalog`] | Resolved, sorted, filterable option index |
//! | [`collate`] | Spanish base-strength collation |
//! | [`selection`] | Highlight and scroll state |
//! | [`text_edit`] | Search term editing |
//! | [`focus`] | [`FocusGroup`](focus::FocusGroup) for cycling focus across fields |
//! | [`key`] | Key-binding helpers and help lines |
//! | [`chrome`] | Bordered blocks for fields |
//! | [`runeutil`] | Unicode-aware width and truncation |

pub mod catalog;
pub mod chrome;
pub mod collate;
pub mod focus;
pub mod key;
pub mod option;
pub mod runeutil;
pub mod searchable_select;
pub mod selection;
pub mod text_edit;

pub use option::{FieldResolver, OptionResolver, Record, RecordError, SelectItem};
pub use searchable_select::{SearchableSelect, SelectState};
