//! Terminal client for a bank marketing term-deposit scoring service.
//!
//! A fixed customer-profile form is edited locally, snapshotted into a
//! JSON request and POSTed to a prediction endpoint. The outcome is kept
//! in a single-flight submission state machine that presenters observe.

pub mod client;
pub mod config;
pub mod form;
pub mod logging;
pub mod mvi;
pub mod schema;
pub mod submission;
pub mod ui;
pub mod wire;
