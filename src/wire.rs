//! JSON shapes exchanged with the scoring service.
//!
//! ```text
//! POST <endpoint>   {"data": {"age": 35, "job": "admin.", ...}}
//! 2xx               {"prediction": 1, "probability_yes": 0.82, "probability_no": 0.18}
//! non-2xx           {"detail": "..."}  (detail optional)
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::form::FormValues;

/// Message used when a failed response carries no usable detail.
pub const GENERIC_FAILURE_MESSAGE: &str = "Prediction failed";

/// Tolerance for `probability_yes + probability_no == 1`.
const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// Request body sent to the scoring endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub data: FormValues,
}

/// Build the wire request from a snapshot of the form.
///
/// The request owns a copy of the values; later edits to the live form
/// do not reach an already built request.
pub fn build_request(values: &FormValues) -> PredictionRequest {
    PredictionRequest {
        data: values.clone(),
    }
}

/// Binary outcome returned by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Prediction {
    No,
    Yes,
}

impl Prediction {
    pub fn label(&self) -> &'static str {
        match self {
            Prediction::No => "No",
            Prediction::Yes => "Yes",
        }
    }
}

impl TryFrom<u8> for Prediction {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Prediction::No),
            1 => Ok(Prediction::Yes),
            other => Err(format!("prediction must be 0 or 1, got {}", other)),
        }
    }
}

impl From<Prediction> for u8 {
    fn from(value: Prediction) -> Self {
        match value {
            Prediction::No => 0,
            Prediction::Yes => 1,
        }
    }
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: Prediction,
    pub probability_yes: f64,
    pub probability_no: f64,
}

impl PredictionResult {
    /// True when both probabilities lie in `[0, 1]` and sum to one.
    ///
    /// The server is trusted; an inconsistent result is still shown, just
    /// flagged.
    pub fn is_consistent(&self) -> bool {
        let in_range = |p: f64| (0.0..=1.0).contains(&p);
        in_range(self.probability_yes)
            && in_range(self.probability_no)
            && ((self.probability_yes + self.probability_no) - 1.0).abs()
                <= PROBABILITY_SUM_TOLERANCE
    }
}

/// Error body of a non-2xx response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Human readable detail, if the body carries one.
    ///
    /// `detail` is a string for explicit service errors and a list of
    /// `{loc, msg, type}` objects for request validation errors.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(text) => non_empty(text.clone()),
            Value::Array(items) => {
                let messages: Vec<String> = items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(text) => Some(text.clone()),
                        Value::Object(obj) => {
                            obj.get("msg").and_then(Value::as_str).map(String::from)
                        }
                        _ => None,
                    })
                    .collect();
                non_empty(messages.join("; "))
            }
            Value::Object(obj) => obj
                .get("msg")
                .and_then(Value::as_str)
                .and_then(|text| non_empty(text.to_string())),
            _ => None,
        }
    }
}

/// Extract the failure detail from a raw error response body.
///
/// Empty, non-JSON or detail-less bodies yield `None`.
pub fn detail_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message())
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
