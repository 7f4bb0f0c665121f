use std::sync::Arc;

use crate::client::{ClientError, ScoringBackend};
use crate::form::{FormError, FormStore, FormValues};
use crate::mvi::{dispatch_mvi, Reducer};
use crate::schema::FieldSchema;
use crate::wire::{build_request, PredictionRequest, PredictionResult};

use super::intent::SubmissionIntent;
use super::reducer::SubmissionReducer;
use super::state::{SubmissionId, SubmissionState};

/// Read-only snapshot handed to observers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ControllerView {
    pub values: FormValues,
    pub state: SubmissionState,
}

/// An attempt that has entered `Submitting` and still needs its network call.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub id: SubmissionId,
    pub request: PredictionRequest,
}

/// Owns the live form and the submission state.
///
/// Form edits and submissions are independent: editing while a request is
/// in flight only changes the live form, never the request already sent.
pub struct SubmissionController {
    form: FormStore,
    state: SubmissionState,
    backend: Arc<dyn ScoringBackend>,
    next_id: u64,
}

impl SubmissionController {
    pub fn new(schema: Arc<FieldSchema>, backend: Arc<dyn ScoringBackend>) -> Self {
        Self {
            form: FormStore::new(schema),
            state: SubmissionState::Idle,
            backend,
            next_id: 1,
        }
    }

    pub fn values(&self) -> &FormValues {
        self.form.get_all()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn backend(&self) -> Arc<dyn ScoringBackend> {
        Arc::clone(&self.backend)
    }

    pub fn view(&self) -> ControllerView {
        ControllerView {
            values: self.form.get_all().clone(),
            state: self.state.clone(),
        }
    }

    /// Apply a user edit to the live form.
    pub fn on_field_change(&mut self, name: &str, raw: &str) -> Result<(), FormError> {
        self.form.set_field(name, raw).map(|_| ())
    }

    /// Move into `Submitting` and hand back the request to send.
    ///
    /// Returns `None` when a request is already in flight (nothing changes)
    /// or when the form fails validation (the state becomes `Failed` and no
    /// request is built).
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        if let Some(current) = self.state.in_flight_id() {
            tracing::debug!(submission_id = %current, "Submit ignored, request already in flight");
            return None;
        }

        if let Err(err) = self.form.validate() {
            tracing::info!(error = %err, "Submit rejected by form validation");
            dispatch_mvi!(
                self,
                state,
                SubmissionReducer,
                SubmissionIntent::Rejected {
                    message: err.to_string(),
                }
            );
            return None;
        }

        let id = SubmissionId(self.next_id);
        self.next_id += 1;
        let request = build_request(self.form.get_all());
        dispatch_mvi!(self, state, SubmissionReducer, SubmissionIntent::Submit { id });

        tracing::info!(submission_id = %id, backend = %self.backend.name(), "Submitting prediction request");
        Some(PendingSubmission { id, request })
    }

    /// Record the outcome of attempt `id`.
    ///
    /// Outcomes of attempts that are no longer in flight are dropped.
    pub fn resolve(&mut self, id: SubmissionId, outcome: Result<PredictionResult, ClientError>) {
        if self.state.in_flight_id() != Some(id) {
            tracing::debug!(submission_id = %id, "Dropping resolution of superseded submission");
            return;
        }

        let outcome = match outcome {
            Ok(result) => {
                tracing::info!(
                    submission_id = %id,
                    prediction = result.prediction.label(),
                    probability_yes = result.probability_yes,
                    "Prediction succeeded"
                );
                Ok(result)
            }
            Err(err) => {
                tracing::warn!(
                    submission_id = %id,
                    kind = err.kind(),
                    error = %err,
                    "Prediction failed"
                );
                Err(err.user_message())
            }
        };

        dispatch_mvi!(
            self,
            state,
            SubmissionReducer,
            SubmissionIntent::Resolved { id, outcome }
        );
    }

    /// Abandon the in-flight attempt, if any, and return to `Idle`.
    ///
    /// A resolution arriving later for the abandoned attempt is dropped.
    pub fn cancel(&mut self) {
        let Some(id) = self.state.in_flight_id() else {
            return;
        };
        tracing::info!(submission_id = %id, "Submission cancelled");
        dispatch_mvi!(self, state, SubmissionReducer, SubmissionIntent::Cancelled { id });
    }

    /// Run one complete submission on the current task.
    ///
    /// Returns the state reached. While `&mut self` is held no second
    /// submission can start, which keeps one request in flight at a time.
    pub async fn submit(&mut self) -> &SubmissionState {
        if let Some(pending) = self.begin_submit() {
            let backend = self.backend();
            let outcome = backend.predict(&pending.request).await;
            self.resolve(pending.id, outcome);
        }
        &self.state
    }
}
