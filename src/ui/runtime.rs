use crate::schema::FieldSchema;
use crate::submission::SubmissionHandle;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use std::io;
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

const TICK_RATE: Duration = Duration::from_millis(120);

/// Run the interactive form until the user quits.
///
/// Blocks the calling thread; submissions are spawned onto the ambient
/// Tokio runtime, so the caller must have entered one.
pub fn run(handle: SubmissionHandle, schema: Arc<FieldSchema>, endpoint: String) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let mut app = App::new(handle.clone(), schema, endpoint);
    let events = EventHandler::new(TICK_RATE);
    tracing::info!("Form opened");

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(TICK_RATE) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Tick) => app.on_tick(),
            // The next draw picks up the new size
            Ok(AppEvent::Resize) => {}
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    handle.shutdown();
    drop(guard);
    tracing::info!("Form closed");
    Ok(())
}
