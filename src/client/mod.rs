//! Network boundary to the scoring service.
//!
//! The submission controller only sees the [`ScoringBackend`] trait, so
//! tests can swap the HTTP client for an in-process double.

mod error;
mod http;

use async_trait::async_trait;

use crate::wire::{PredictionRequest, PredictionResult};

pub use error::{describe_error, ClientError};
pub use http::{HealthStatus, HttpScoringClient};

/// Something that can score a prediction request.
#[async_trait]
pub trait ScoringBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Send one request and wait for its outcome.
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, ClientError>;
}
