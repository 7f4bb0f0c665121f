//! Intents for the submission lifecycle.

use crate::mvi::Intent;
use crate::wire::PredictionResult;

use super::state::SubmissionId;

/// Intents that can be dispatched to the submission reducer.
#[derive(Debug, Clone)]
pub enum SubmissionIntent {
    /// Start a new attempt. Ignored while another attempt is in flight.
    Submit { id: SubmissionId },

    /// The form failed validation; no request was sent.
    Rejected { message: String },

    /// The network call of attempt `id` finished.
    /// Ignored unless `id` is the attempt currently in flight.
    Resolved {
        id: SubmissionId,
        outcome: Result<PredictionResult, String>,
    },

    /// The network call of attempt `id` was aborted before it finished.
    Cancelled { id: SubmissionId },
}

impl Intent for SubmissionIntent {}
