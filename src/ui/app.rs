use std::sync::Arc;

use tokio::sync::watch;

use crate::mvi::{dispatch_mvi, Reducer};
use crate::schema::{FieldDescriptor, FieldSchema};
use crate::submission::{ControllerView, SubmissionHandle};
use crate::ui::editor::{EditorIntent, EditorReducer, EditorState};

pub const SUBMIT_LABEL: &str = "Get Prediction";
pub const SUBMITTING_LABEL: &str = "Scoring...";

pub struct App {
    should_quit: bool,
    /// Focus and in-progress edit (MVI pattern).
    editor: EditorState,
    handle: SubmissionHandle,
    view_rx: watch::Receiver<ControllerView>,
    /// Last view received from the controller.
    view: ControllerView,
    schema: Arc<FieldSchema>,
    endpoint: String,
    edit_error: Option<String>,
    spinner_frame: usize,
}

impl App {
    pub fn new(handle: SubmissionHandle, schema: Arc<FieldSchema>, endpoint: String) -> Self {
        let mut view_rx = handle.subscribe();
        let view = view_rx.borrow_and_update().clone();
        Self {
            should_quit: false,
            editor: EditorState::default(),
            handle,
            view_rx,
            view,
            schema,
            endpoint,
            edit_error: None,
            spinner_frame: 0,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn view(&self) -> &ControllerView {
        &self.view
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Rejection of the last committed edit, if any.
    pub fn edit_error(&self) -> Option<&str> {
        self.edit_error.as_deref()
    }

    pub fn spinner_frame(&self) -> usize {
        self.spinner_frame
    }

    pub fn submit_label(&self) -> &'static str {
        if self.view.state.is_in_flight() {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub fn focused_field(&self) -> Option<&FieldDescriptor> {
        self.schema.fields().get(self.editor.focused())
    }

    pub fn on_tick(&mut self) {
        self.sync_view();
        if self.view.state.is_in_flight() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    pub fn move_up(&mut self) {
        self.commit_edit();
        let field_count = self.schema.len();
        dispatch_mvi!(self, editor, EditorReducer, EditorIntent::MoveUp { field_count });
    }

    pub fn move_down(&mut self) {
        self.commit_edit();
        let field_count = self.schema.len();
        dispatch_mvi!(self, editor, EditorReducer, EditorIntent::MoveDown { field_count });
    }

    /// Start editing the focused field from its current value.
    pub fn begin_edit(&mut self) {
        if self.editor.is_editing() {
            return;
        }
        let initial = self
            .focused_field()
            .and_then(|field| self.view.values.get(&field.name))
            .map(|value| value.to_string())
            .unwrap_or_default();
        self.edit_error = None;
        dispatch_mvi!(self, editor, EditorReducer, EditorIntent::BeginEdit { initial });
    }

    /// Typing while browsing replaces the focused value.
    pub fn input_char(&mut self, ch: char) {
        if !self.editor.is_editing() {
            self.edit_error = None;
            dispatch_mvi!(
                self,
                editor,
                EditorReducer,
                EditorIntent::BeginEdit {
                    initial: String::new()
                }
            );
        }
        dispatch_mvi!(self, editor, EditorReducer, EditorIntent::Input(ch));
    }

    pub fn backspace(&mut self) {
        self.begin_edit();
        dispatch_mvi!(self, editor, EditorReducer, EditorIntent::Backspace);
    }

    /// Apply the edit buffer to the form and return to browsing.
    pub fn commit_edit(&mut self) {
        let EditorState::Editing { focused, buffer } = &self.editor else {
            return;
        };
        if let Some(field) = self.schema.fields().get(*focused) {
            if let Err(err) = self.handle.on_field_change(&field.name, buffer) {
                tracing::warn!(field = %field.name, error = %err, "Edit rejected");
                self.edit_error = Some(err.to_string());
            }
        }
        dispatch_mvi!(self, editor, EditorReducer, EditorIntent::Commit);
        self.sync_view();
    }

    pub fn cancel_edit(&mut self) {
        dispatch_mvi!(self, editor, EditorReducer, EditorIntent::Cancel);
    }

    /// Commit any pending edit and start a submission.
    pub fn submit(&mut self) {
        self.commit_edit();
        if !self.handle.submit() {
            tracing::debug!("Submit produced no request");
        }
        self.sync_view();
    }

    fn sync_view(&mut self) {
        if self.view_rx.has_changed().unwrap_or(false) {
            self.view = self.view_rx.borrow_and_update().clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, ScoringBackend};
    use crate::form::FieldValue;
    use crate::submission::{SubmissionController, SubmissionState};
    use crate::wire::{PredictionRequest, PredictionResult};
    use async_trait::async_trait;

    struct Unreachable;

    #[async_trait]
    impl ScoringBackend for Unreachable {
        fn name(&self) -> &str {
            "unreachable"
        }

        async fn predict(
            &self,
            _request: &PredictionRequest,
        ) -> Result<PredictionResult, ClientError> {
            Err(ClientError::Transport {
                message: "Connection refused".into(),
            })
        }
    }

    fn app() -> App {
        let schema = Arc::new(FieldSchema::bank_marketing());
        let controller = SubmissionController::new(Arc::clone(&schema), Arc::new(Unreachable));
        App::new(
            SubmissionHandle::new(controller),
            schema,
            "http://localhost:8000/predict".into(),
        )
    }

    #[test]
    fn typing_replaces_focused_value_on_commit() {
        let mut app = app();
        for ch in "52".chars() {
            app.input_char(ch);
        }
        assert_eq!(app.editor().buffer(), Some("52"));
        assert_eq!(app.view().values.get("age"), Some(&FieldValue::Number(35.0)));

        app.commit_edit();
        assert!(!app.editor().is_editing());
        assert_eq!(app.view().values.get("age"), Some(&FieldValue::Number(52.0)));
    }

    #[test]
    fn begin_edit_starts_from_current_value() {
        let mut app = app();
        app.move_down();
        app.begin_edit();
        assert_eq!(app.editor().buffer(), Some("admin."));
        app.backspace();
        assert_eq!(app.editor().buffer(), Some("admin"));
    }

    #[test]
    fn moving_commits_pending_edit() {
        let mut app = app();
        app.move_down();
        for ch in "retired".chars() {
            app.input_char(ch);
        }
        app.move_down();
        assert_eq!(app.editor().focused(), 2);
        assert_eq!(
            app.view().values.get("job"),
            Some(&FieldValue::Text("retired".into()))
        );
    }

    #[test]
    fn cancel_discards_buffer() {
        let mut app = app();
        app.input_char('9');
        app.cancel_edit();
        assert_eq!(app.view().values.get("age"), Some(&FieldValue::Number(35.0)));
    }

    #[test]
    fn move_up_wraps_to_last_field() {
        let mut app = app();
        app.move_up();
        assert_eq!(app.focused_field().map(|f| f.name.as_str()), Some("poutcome"));
    }

    #[tokio::test]
    async fn submit_with_invalid_number_fails_without_request() {
        let mut app = app();
        app.input_char('x');
        app.submit();
        assert_eq!(
            app.view().state,
            SubmissionState::Failed("Field 'age' must be a finite number".into())
        );
        assert_eq!(app.submit_label(), SUBMIT_LABEL);
    }

    #[tokio::test]
    async fn submit_label_tracks_state() {
        let mut app = app();
        app.submit();
        assert_eq!(app.submit_label(), SUBMITTING_LABEL);
        app.handle.settled().await;
        app.on_tick();
        assert_eq!(app.view().state.error_message(), Some("Connection refused"));
        assert_eq!(app.submit_label(), SUBMIT_LABEL);
    }
}
