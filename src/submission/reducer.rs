//! Reducer for the submission lifecycle.

use crate::mvi::Reducer;

use super::intent::SubmissionIntent;
use super::state::SubmissionState;

/// Reducer for submission state transitions.
///
/// Pure function: building the request and performing the network call
/// are handled by the controller around the dispatch call.
pub struct SubmissionReducer;

impl Reducer for SubmissionReducer {
    type State = SubmissionState;
    type Intent = SubmissionIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SubmissionIntent::Submit { id } => match state {
                in_flight @ SubmissionState::Submitting { .. } => in_flight,
                _ => SubmissionState::Submitting { id },
            },

            SubmissionIntent::Rejected { message } => match state {
                in_flight @ SubmissionState::Submitting { .. } => in_flight,
                _ => SubmissionState::Failed(message),
            },

            SubmissionIntent::Resolved { id, outcome } => match state {
                SubmissionState::Submitting { id: current } if current == id => match outcome {
                    Ok(result) => SubmissionState::Succeeded(result),
                    Err(message) => SubmissionState::Failed(message),
                },
                // Superseded or unexpected resolution
                other => other,
            },

            SubmissionIntent::Cancelled { id } => match state {
                SubmissionState::Submitting { id: current } if current == id => {
                    SubmissionState::Idle
                }
                other => other,
            },
        }
    }
}
