use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::schema::{FieldKind, FieldSchema};

use super::value::{coerce_number, FieldValue};

/// Errors raised by form edits and submit-time validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("Unknown field '{name}'")]
    UnknownField { name: String },

    #[error("Field '{field}' must be a finite number")]
    InvalidNumber { field: String },
}

/// Current value of every schema field, in schema order.
///
/// Keys are fixed when the values are created from a schema; only values
/// change afterwards. Cloning yields an independent snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormValues {
    entries: Vec<(String, FieldValue)>,
}

impl FormValues {
    pub(crate) fn from_entries(entries: Vec<(String, FieldValue)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the value of an existing key. Returns false for unknown keys.
    fn replace(&mut self, name: &str, value: FieldValue) -> bool {
        match self.entries.iter_mut().find(|(key, _)| key == name) {
            Some((_, slot)) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

impl Serialize for FormValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Owner of the live form values.
///
/// Edits are coerced according to the field kind and never rejected for
/// their content; [`FormStore::validate`] is the gate used before a
/// submission is allowed to start.
#[derive(Debug, Clone)]
pub struct FormStore {
    schema: Arc<FieldSchema>,
    values: FormValues,
}

impl FormStore {
    pub fn new(schema: Arc<FieldSchema>) -> Self {
        let values = schema.defaults();
        Self { schema, values }
    }

    /// Apply a raw edit to a field.
    ///
    /// Numeric fields store [`coerce_number`] of the input (possibly `NaN`),
    /// text fields store the input unchanged.
    pub fn set_field(&mut self, name: &str, raw: &str) -> Result<&FieldValue, FormError> {
        let kind = self
            .schema
            .get(name)
            .map(|field| field.kind)
            .ok_or_else(|| FormError::UnknownField {
                name: name.to_string(),
            })?;

        let value = match kind {
            FieldKind::Numeric => FieldValue::Number(coerce_number(raw)),
            FieldKind::Text => FieldValue::Text(raw.to_string()),
        };

        if !value.is_finite() {
            tracing::debug!(field = %name, raw = %raw, "Numeric field holds a non-finite value");
        }

        self.values.replace(name, value);
        self.values
            .get(name)
            .ok_or_else(|| FormError::UnknownField {
                name: name.to_string(),
            })
    }

    pub fn get_all(&self) -> &FormValues {
        &self.values
    }

    /// Check every field can be put on the wire.
    ///
    /// Returns the first numeric field (in schema order) whose value is
    /// not a finite number.
    pub fn validate(&self) -> Result<(), FormError> {
        match self.values.iter().find(|(_, value)| !value.is_finite()) {
            Some((name, _)) => Err(FormError::InvalidNumber {
                field: name.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> FormStore {
        FormStore::new(Arc::new(FieldSchema::bank_marketing()))
    }

    #[test]
    fn starts_with_schema_defaults() {
        let store = store();
        assert_eq!(store.get_all(), &FieldSchema::bank_marketing().defaults());
    }

    #[test]
    fn numeric_edit_is_coerced() {
        let mut store = store();
        store.set_field("age", "123").unwrap();
        assert_eq!(store.get_all().get("age"), Some(&FieldValue::Number(123.0)));
    }

    #[test]
    fn invalid_numeric_edit_is_accepted_as_nan() {
        let mut store = store();
        let value = store.set_field("balance", "abc").unwrap().clone();
        assert!(matches!(value, FieldValue::Number(n) if n.is_nan()));
        assert_eq!(store.get_all().len(), 15);
    }

    #[test]
    fn text_edit_is_stored_verbatim() {
        let mut store = store();
        store.set_field("job", "  blue-collar ").unwrap();
        assert_eq!(
            store.get_all().get("job"),
            Some(&FieldValue::Text("  blue-collar ".to_string()))
        );
        store.set_field("job", "").unwrap();
        assert_eq!(store.get_all().get("job"), Some(&FieldValue::Text(String::new())));
    }

    #[test]
    fn unknown_field_is_rejected_and_values_untouched() {
        let mut store = store();
        let before = store.get_all().clone();
        assert_eq!(
            store.set_field("salary", "10"),
            Err(FormError::UnknownField {
                name: "salary".to_string()
            })
        );
        assert_eq!(store.get_all(), &before);
    }

    #[test]
    fn validate_reports_first_non_finite_field() {
        let mut store = store();
        assert!(store.validate().is_ok());
        store.set_field("pdays", "x").unwrap();
        store.set_field("age", "Infinity").unwrap();
        assert_eq!(
            store.validate(),
            Err(FormError::InvalidNumber {
                field: "age".to_string()
            })
        );
        store.set_field("age", "40").unwrap();
        assert_eq!(
            store.validate(),
            Err(FormError::InvalidNumber {
                field: "pdays".to_string()
            })
        );
    }

    #[test]
    fn serializes_as_object_in_schema_order() {
        let json = serde_json::to_string(store().get_all()).unwrap();
        assert!(json.starts_with(r#"{"age":35.0,"job":"admin.","marital":"married""#));
        assert!(json.ends_with(r#""previous":0.0,"poutcome":"unknown"}"#));
    }
}
