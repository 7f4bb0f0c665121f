//! Submission lifecycle of a prediction request.
//!
//! # Architecture
//!
//! Uses the MVI pattern from [`crate::mvi`]:
//! - `state.rs` - Lifecycle state (Idle → Submitting → Succeeded | Failed)
//! - `intent.rs` - Submit requests and network resolutions
//! - `reducer.rs` - State transitions (pure, no side effects)
//! - `controller.rs` - Owns the form and the state, performs the network call
//! - `handle.rs` - Shareable handle that spawns calls and notifies observers
//!
//! Whether a request is in flight is read from the state tag itself;
//! there is no separate loading flag.

mod controller;
mod handle;
mod intent;
mod reducer;
mod state;

pub use controller::{ControllerView, PendingSubmission, SubmissionController};
pub use handle::SubmissionHandle;
pub use intent::SubmissionIntent;
pub use reducer::SubmissionReducer;
pub use state::{SubmissionId, SubmissionState};
