//! Text presentation layer for the consumption dashboard.
//!
//! # Overview
//! The views are pure renderers over a borrowed `ConsumptionStore`: they read
//! state and return text, never mutate. `Shell` owns the store and the
//! transport, turns user commands into store actions, and composes the list
//! and detail views into one screen.

pub mod views;

pub use views::detail::DetailView;
pub use views::shell::{Command, CommandError, Control, Shell};
