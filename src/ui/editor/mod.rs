//! Form editor feature module.
//!
//! Tracks which field has focus and the text being typed into it. The
//! typed text reaches the form store only when the edit is committed.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Browsing / Editing state
//! - `intent.rs` - Navigation and typing actions
//! - `reducer.rs` - State transitions

mod intent;
mod reducer;
mod state;

pub use intent::EditorIntent;
pub use reducer::EditorReducer;
pub use state::EditorState;
