//! Terminal presenter for the scoring form.
//!
//! Observes the controller through [`SubmissionHandle::subscribe`] and
//! renders with ratatui. Nothing in the core depends on this module.
//!
//! [`SubmissionHandle::subscribe`]: crate::submission::SubmissionHandle::subscribe

pub mod app;
pub mod editor;
pub mod events;
pub mod footer;
pub mod header;
pub mod input;
pub mod layout;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;

pub use runtime::run;
