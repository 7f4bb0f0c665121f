//! Base trait for observable state in MVI architecture.

/// Marker trait for state objects a view renders from.
///
/// States are cloned into observers, compared to detect changes and
/// start from a well-defined initial value.
pub trait ViewState: Clone + PartialEq + Default + Send + 'static {}
