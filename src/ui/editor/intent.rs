use crate::mvi::Intent;

#[derive(Debug, Clone)]
pub enum EditorIntent {
    MoveUp { field_count: usize },
    MoveDown { field_count: usize },
    /// Start editing the focused field with `initial` as the buffer.
    BeginEdit { initial: String },
    Input(char),
    Backspace,
    /// Leave editing mode. The caller applies the buffer before dispatching.
    Commit,
    /// Leave editing mode, discarding the buffer.
    Cancel,
}

impl Intent for EditorIntent {}
