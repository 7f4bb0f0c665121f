use crate::ui::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press means for the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    Submit,
    MoveUp,
    MoveDown,
    BeginEdit,
    Commit,
    Cancel,
    Backspace,
    Char(char),
}

/// Map a key to an action. `editing` is true while an edit buffer is open.
pub fn classify_key(key: KeyEvent, editing: bool) -> InputAction {
    if key.kind != KeyEventKind::Press {
        return InputAction::None;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        return InputAction::Quit;
    }
    if is_ctrl_char(key, 's') {
        return InputAction::Submit;
    }

    match key.code {
        KeyCode::Up | KeyCode::BackTab => InputAction::MoveUp,
        KeyCode::Down | KeyCode::Tab => InputAction::MoveDown,
        KeyCode::Enter if editing => InputAction::Commit,
        KeyCode::Enter => InputAction::BeginEdit,
        KeyCode::Esc if editing => InputAction::Cancel,
        KeyCode::Esc => InputAction::Quit,
        KeyCode::Backspace => InputAction::Backspace,
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::Char(ch)
        }
        _ => InputAction::None,
    }
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    match classify_key(key, app.editor().is_editing()) {
        InputAction::None => {}
        InputAction::Quit => app.request_quit(),
        InputAction::Submit => app.submit(),
        InputAction::MoveUp => app.move_up(),
        InputAction::MoveDown => app.move_down(),
        InputAction::BeginEdit => app.begin_edit(),
        InputAction::Commit => app.commit_edit(),
        InputAction::Cancel => app.cancel_edit(),
        InputAction::Backspace => app.backspace(),
        InputAction::Char(ch) => app.input_char(ch),
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
