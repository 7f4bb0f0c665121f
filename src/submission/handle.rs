//! Shareable front of the controller for event-driven presenters.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::form::FormError;

use super::controller::{ControllerView, SubmissionController};

/// Cloneable handle around a [`SubmissionController`].
///
/// Every change is published as a [`ControllerView`] on a watch channel,
/// so presenters redraw from notifications instead of polling the
/// controller. The controller lock is never held across an await.
#[derive(Clone)]
pub struct SubmissionHandle {
    inner: Arc<HandleInner>,
}

struct HandleInner {
    controller: Mutex<SubmissionController>,
    view_tx: watch::Sender<ControllerView>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl HandleInner {
    fn publish(&self, controller: &SubmissionController) {
        self.view_tx.send_replace(controller.view());
    }
}

impl SubmissionHandle {
    pub fn new(controller: SubmissionController) -> Self {
        let (view_tx, _) = watch::channel(controller.view());
        Self {
            inner: Arc::new(HandleInner {
                controller: Mutex::new(controller),
                view_tx,
                in_flight: Mutex::new(None),
            }),
        }
    }

    /// Subscribe to state-change notifications.
    pub fn subscribe(&self) -> watch::Receiver<ControllerView> {
        self.inner.view_tx.subscribe()
    }

    /// The most recently published view.
    pub fn view(&self) -> ControllerView {
        self.inner.view_tx.borrow().clone()
    }

    pub fn on_field_change(&self, name: &str, raw: &str) -> Result<(), FormError> {
        let mut controller = self.inner.controller.lock();
        controller.on_field_change(name, raw)?;
        self.inner.publish(&controller);
        Ok(())
    }

    /// Start a submission in the background.
    ///
    /// Returns false when nothing was sent: a request is already in flight
    /// or the form failed validation. Must be called inside a Tokio runtime.
    pub fn submit(&self) -> bool {
        let (pending, backend) = {
            let mut controller = self.inner.controller.lock();
            let pending = controller.begin_submit();
            self.inner.publish(&controller);
            (pending, controller.backend())
        };
        let Some(pending) = pending else {
            return false;
        };

        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let outcome = backend.predict(&pending.request).await;
            let mut controller = inner.controller.lock();
            controller.resolve(pending.id, outcome);
            inner.publish(&controller);
        });
        *self.inner.in_flight.lock() = Some(task);
        true
    }

    /// Wait until no request is in flight and return that view.
    pub async fn settled(&self) -> ControllerView {
        let mut rx = self.subscribe();
        let settled = rx
            .wait_for(|view| !view.state.is_in_flight())
            .await
            .map(|view| view.clone());
        match settled {
            Ok(view) => view,
            Err(_) => self.view(),
        }
    }

    /// Abort the in-flight network call, if any, and return to `Idle`.
    ///
    /// Used on teardown so no state update lands after the presenter is gone.
    pub fn shutdown(&self) {
        if let Some(task) = self.inner.in_flight.lock().take() {
            if !task.is_finished() {
                tracing::debug!("Aborting in-flight submission on shutdown");
            }
            task.abort();
        }
        let mut controller = self.inner.controller.lock();
        controller.cancel();
        self.inner.publish(&controller);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, ScoringBackend};
    use crate::schema::FieldSchema;
    use crate::submission::SubmissionState;
    use crate::wire::{Prediction, PredictionRequest, PredictionResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct SlowBackend {
        calls: AtomicUsize,
        delay: Duration,
    }

    #[async_trait]
    impl ScoringBackend for SlowBackend {
        fn name(&self) -> &str {
            "slow"
        }

        async fn predict(
            &self,
            _request: &PredictionRequest,
        ) -> Result<PredictionResult, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(PredictionResult {
                prediction: Prediction::No,
                probability_yes: 0.1,
                probability_no: 0.9,
            })
        }
    }

    fn handle(delay: Duration) -> (SubmissionHandle, Arc<SlowBackend>) {
        let backend = Arc::new(SlowBackend {
            calls: AtomicUsize::new(0),
            delay,
        });
        let controller =
            SubmissionController::new(Arc::new(FieldSchema::bank_marketing()), backend.clone());
        (SubmissionHandle::new(controller), backend)
    }

    #[tokio::test]
    async fn rapid_submits_issue_one_call() {
        let (handle, backend) = handle(Duration::from_millis(50));
        assert!(handle.submit());
        assert!(!handle.submit());
        assert!(handle.view().state.is_in_flight());

        let view = handle.settled().await;
        assert!(matches!(view.state, SubmissionState::Succeeded(_)));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn edits_are_published() {
        let (handle, _) = handle(Duration::ZERO);
        let mut rx = handle.subscribe();
        handle.on_field_change("loan", "yes").unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            rx.borrow_and_update().values.get("loan").and_then(|v| v.as_text()),
            Some("yes")
        );
    }

    #[tokio::test]
    async fn shutdown_aborts_in_flight_call() {
        let (handle, backend) = handle(Duration::from_secs(30));
        assert!(handle.submit());
        tokio::task::yield_now().await;
        handle.shutdown();
        assert_eq!(handle.view().state, SubmissionState::Idle);

        let view = tokio::time::timeout(Duration::from_secs(2), handle.settled())
            .await
            .expect("settles after shutdown");
        assert_eq!(view.state, SubmissionState::Idle);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn submit_is_accepted_after_shutdown() {
        let (handle, backend) = handle(Duration::from_secs(30));
        assert!(handle.submit());
        handle.shutdown();

        let other = handle.clone();
        assert!(other.submit());
        assert!(other.view().state.is_in_flight());
        other.shutdown();
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }
}
