//! State for the submission lifecycle.

use std::fmt;

use crate::mvi::ViewState;
use crate::wire::PredictionResult;

/// Identifies one submission attempt.
///
/// Ids increase monotonically per controller, so a resolution can be
/// matched against the attempt currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubmissionId(pub u64);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the current prediction request stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    /// Nothing submitted yet.
    #[default]
    Idle,

    /// A request is in flight.
    Submitting { id: SubmissionId },

    /// The last request produced a prediction.
    Succeeded(PredictionResult),

    /// The last request failed; the message is shown as-is.
    Failed(String),
}

impl ViewState for SubmissionState {}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }

    /// Id of the in-flight attempt, if any.
    pub fn in_flight_id(&self) -> Option<SubmissionId> {
        match self {
            Self::Submitting { id } => Some(*id),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            Self::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::Prediction;

    fn result() -> PredictionResult {
        PredictionResult {
            prediction: Prediction::Yes,
            probability_yes: 0.82,
            probability_no: 0.18,
        }
    }

    #[test]
    fn idle_is_default() {
        assert_eq!(SubmissionState::default(), SubmissionState::Idle);
    }

    #[test]
    fn in_flight_only_when_submitting() {
        assert!(!SubmissionState::Idle.is_in_flight());
        assert!(SubmissionState::Submitting { id: SubmissionId(1) }.is_in_flight());
        assert!(!SubmissionState::Succeeded(result()).is_in_flight());
        assert!(!SubmissionState::Failed("boom".into()).is_in_flight());
    }

    #[test]
    fn accessors() {
        assert_eq!(
            SubmissionState::Submitting { id: SubmissionId(7) }.in_flight_id(),
            Some(SubmissionId(7))
        );
        assert_eq!(SubmissionState::Idle.in_flight_id(), None);
        assert_eq!(SubmissionState::Succeeded(result()).result(), Some(&result()));
        assert_eq!(SubmissionState::Failed("boom".into()).error_message(), Some("boom"));
        assert_eq!(SubmissionState::Idle.error_message(), None);
    }
}
