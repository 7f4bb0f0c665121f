//! Base trait for intents (user/system actions) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (key presses, submit requests)
/// - System events (a prediction request resolving)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
