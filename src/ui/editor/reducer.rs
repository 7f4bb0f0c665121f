use crate::mvi::Reducer;

use super::intent::EditorIntent;
use super::state::EditorState;

pub struct EditorReducer;

impl Reducer for EditorReducer {
    type State = EditorState;
    type Intent = EditorIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            EditorIntent::MoveUp { field_count } => {
                let focused = state.focused();
                let new_focused = if focused == 0 {
                    field_count.saturating_sub(1)
                } else {
                    focused - 1
                };
                EditorState::Browsing {
                    focused: new_focused,
                }
            }
            EditorIntent::MoveDown { field_count } => {
                let focused = state.focused();
                let new_focused = if focused + 1 >= field_count {
                    0
                } else {
                    focused + 1
                };
                EditorState::Browsing {
                    focused: new_focused,
                }
            }
            EditorIntent::BeginEdit { initial } => match state {
                EditorState::Browsing { focused } => EditorState::Editing {
                    focused,
                    buffer: initial,
                },
                editing => editing,
            },
            EditorIntent::Input(ch) => match state {
                EditorState::Editing {
                    focused,
                    mut buffer,
                } => {
                    buffer.push(ch);
                    EditorState::Editing { focused, buffer }
                }
                other => other,
            },
            EditorIntent::Backspace => match state {
                EditorState::Editing {
                    focused,
                    mut buffer,
                } => {
                    buffer.pop();
                    EditorState::Editing { focused, buffer }
                }
                other => other,
            },
            EditorIntent::Commit | EditorIntent::Cancel => EditorState::Browsing {
                focused: state.focused(),
            },
        }
    }
}
