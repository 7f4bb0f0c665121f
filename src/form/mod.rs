//! Form field values and the store that owns them.
//!
//! - `value.rs` - [`FieldValue`] and string-to-number coercion
//! - `store.rs` - [`FormValues`] snapshot type and the mutable [`FormStore`]

mod store;
mod value;

pub use store::{FormError, FormStore, FormValues};
pub use value::{coerce_number, FieldValue};
