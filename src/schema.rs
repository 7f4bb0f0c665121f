//! Static description of the customer profile form.
//!
//! The schema is plain data handed to the controller at construction time.
//! [`FieldSchema::bank_marketing`] is the built-in profile; a config file
//! may supply a different field list (see [`crate::config::Config::schema`]).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::{FieldValue, FormValues};

/// Semantic type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Coerced to a number on every edit.
    Numeric,
    /// Stored exactly as typed.
    Text,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Numeric => "numeric",
            FieldKind::Text => "text",
        }
    }
}

/// One input field of the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Wire key (unique within a schema).
    pub name: String,
    /// Human readable label shown by the presenter.
    pub label: String,
    pub kind: FieldKind,
    /// Value the form starts with.
    pub default: FieldValue,
}

impl FieldDescriptor {
    pub fn numeric(name: &str, label: &str, default: f64) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Numeric,
            default: FieldValue::Number(default),
        }
    }

    pub fn text(name: &str, label: &str, default: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Text,
            default: FieldValue::Text(default.to_string()),
        }
    }
}

/// Errors raised when a field list cannot form a schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("Schema must contain at least one field")]
    Empty,

    #[error("Field name must not be empty (label '{label}')")]
    EmptyName { label: String },

    #[error("Duplicate field name '{name}'")]
    DuplicateName { name: String },

    #[error("Default for field '{name}' does not match its {kind} kind")]
    DefaultKindMismatch { name: String, kind: &'static str },

    #[error("Default for numeric field '{name}' must be a finite number")]
    NonFiniteDefault { name: String },
}

/// Ordered, validated sequence of field descriptors.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    fields: Vec<FieldDescriptor>,
}

impl FieldSchema {
    /// Build a schema, rejecting empty, duplicate or ill-typed fields.
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if field.name.trim().is_empty() {
                return Err(SchemaError::EmptyName {
                    label: field.label.clone(),
                });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateName {
                    name: field.name.clone(),
                });
            }
            match (&field.kind, &field.default) {
                (FieldKind::Numeric, FieldValue::Number(n)) if !n.is_finite() => {
                    return Err(SchemaError::NonFiniteDefault {
                        name: field.name.clone(),
                    });
                }
                (FieldKind::Numeric, FieldValue::Number(_))
                | (FieldKind::Text, FieldValue::Text(_)) => {}
                (kind, _) => {
                    return Err(SchemaError::DefaultKindMismatch {
                        name: field.name.clone(),
                        kind: kind.as_str(),
                    });
                }
            }
        }

        Ok(Self { fields })
    }

    /// The bank marketing customer profile scored by the prediction service.
    pub fn bank_marketing() -> Self {
        Self {
            fields: vec![
                FieldDescriptor::numeric("age", "Age", 35.0),
                FieldDescriptor::text("job", "Job", "admin."),
                FieldDescriptor::text("marital", "Marital Status", "married"),
                FieldDescriptor::text("education", "Education", "tertiary"),
                FieldDescriptor::text("default", "Default", "no"),
                FieldDescriptor::numeric("balance", "Balance", 1500.0),
                FieldDescriptor::text("housing", "Housing", "yes"),
                FieldDescriptor::text("loan", "Loan", "no"),
                FieldDescriptor::text("contact", "Contact", "cellular"),
                FieldDescriptor::numeric("day", "Day", 5.0),
                FieldDescriptor::text("month", "Month", "may"),
                FieldDescriptor::numeric("campaign", "Campaign", 2.0),
                FieldDescriptor::numeric("pdays", "Pdays", 999.0),
                FieldDescriptor::numeric("previous", "Previous", 0.0),
                FieldDescriptor::text("poutcome", "Poutcome", "unknown"),
            ],
        }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Default values, one entry per descriptor in schema order.
    pub fn defaults(&self) -> FormValues {
        FormValues::from_entries(
            self.fields
                .iter()
                .map(|f| (f.name.clone(), f.default.clone()))
                .collect(),
        )
    }
}

impl Default for FieldSchema {
    fn default() -> Self {
        Self::bank_marketing()
    }
}
