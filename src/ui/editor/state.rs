use crate::mvi::ViewState;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorState {
    /// Moving between fields.
    Browsing { focused: usize },
    /// Typing into the focused field. `buffer` is not yet applied to the form.
    Editing { focused: usize, buffer: String },
}

impl Default for EditorState {
    fn default() -> Self {
        EditorState::Browsing { focused: 0 }
    }
}

impl ViewState for EditorState {}

impl EditorState {
    pub fn focused(&self) -> usize {
        match self {
            Self::Browsing { focused } | Self::Editing { focused, .. } => *focused,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    pub fn buffer(&self) -> Option<&str> {
        match self {
            Self::Editing { buffer, .. } => Some(buffer),
            Self::Browsing { .. } => None,
        }
    }
}
