use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio::time::timeout;

use crate::config::EndpointConfig;
use crate::wire::{detail_message, PredictionRequest, PredictionResult};

use super::error::{describe_error, ClientError};
use super::ScoringBackend;

/// Body of the service's `GET /health` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// HTTP client for the scoring endpoint.
pub struct HttpScoringClient {
    client: Client,
    endpoint: Url,
    request_timeout: Duration,
}

impl HttpScoringClient {
    pub fn new(config: &EndpointConfig) -> Result<Self, ClientError> {
        let endpoint = parse_endpoint(&config.url)?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .build()
            .map_err(|e| ClientError::Transport {
                message: describe_error(&e),
            })?;

        Ok(Self {
            client,
            endpoint,
            request_timeout: Duration::from_secs(u64::from(config.timeout_seconds)),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `health` next to the prediction path (`/predict` → `/health`).
    ///
    /// A trailing slash on the endpoint is ignored, so `/predict/` also
    /// maps to `/health`.
    pub fn health_url(&self) -> Result<Url, ClientError> {
        let mut base = self.endpoint.clone();
        let trimmed = base.path().trim_end_matches('/').to_string();
        base.set_path(&trimmed);
        base.join("health")
            .map_err(|e| ClientError::InvalidEndpoint {
                url: self.endpoint.to_string(),
                reason: e.to_string(),
            })
    }

    /// Probe the service's health endpoint.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = self.health_url()?;
        let result = timeout(self.request_timeout, async {
            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(transport_error)?;
            let status = response.status();
            let body = response.bytes().await.map_err(transport_error)?;

            if !status.is_success() {
                return Err(ClientError::Server {
                    status: status.as_u16(),
                    detail: detail_message(&body),
                });
            }

            serde_json::from_slice::<HealthStatus>(&body).map_err(|e| ClientError::Parse {
                message: e.to_string(),
            })
        })
        .await;

        match result {
            Ok(outcome) => {
                tracing::debug!(url = %url, ok = outcome.is_ok(), "Health check finished");
                outcome
            }
            Err(_) => Err(ClientError::Timeout {
                seconds: self.request_timeout.as_secs(),
            }),
        }
    }

    async fn send(&self, request: &PredictionRequest) -> Result<PredictionResult, ClientError> {
        let start = Instant::now();
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        let latency_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let detail = detail_message(&body);
            tracing::warn!(
                status = status.as_u16(),
                latency_ms,
                detail = detail.as_deref().unwrap_or("<none>"),
                "Scoring service returned an error"
            );
            return Err(ClientError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        let result: PredictionResult =
            serde_json::from_slice(&body).map_err(|e| ClientError::Parse {
                message: e.to_string(),
            })?;

        if !result.is_consistent() {
            tracing::warn!(
                probability_yes = result.probability_yes,
                probability_no = result.probability_no,
                "Scoring service returned inconsistent probabilities"
            );
        }

        tracing::debug!(
            status = status.as_u16(),
            latency_ms,
            prediction = result.prediction.label(),
            "Prediction received"
        );

        Ok(result)
    }
}

#[async_trait]
impl ScoringBackend for HttpScoringClient {
    fn name(&self) -> &str {
        self.endpoint.as_str()
    }

    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, ClientError> {
        match timeout(self.request_timeout, self.send(request)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ClientError::Timeout {
                seconds: self.request_timeout.as_secs(),
            }),
        }
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw).map_err(|e| ClientError::InvalidEndpoint {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ClientError::InvalidEndpoint {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

fn transport_error(err: reqwest::Error) -> ClientError {
    ClientError::Transport {
        message: describe_error(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> EndpointConfig {
        EndpointConfig {
            url: url.to_string(),
            ..EndpointConfig::default()
        }
    }

    #[test]
    fn accepts_http_endpoint() {
        let client = HttpScoringClient::new(&config("http://localhost:8000/predict")).unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:8000/predict");
        assert_eq!(client.name(), "http://localhost:8000/predict");
    }

    #[test]
    fn rejects_unparseable_endpoint() {
        assert!(matches!(
            HttpScoringClient::new(&config("not a url")),
            Err(ClientError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn rejects_non_http_scheme() {
        match HttpScoringClient::new(&config("ftp://example.com/predict")) {
            Err(ClientError::InvalidEndpoint { reason, .. }) => {
                assert!(reason.contains("ftp"));
            }
            _ => panic!("Expected InvalidEndpoint"),
        }
    }

    #[test]
    fn health_url_is_sibling_of_endpoint() {
        let client = HttpScoringClient::new(&config("http://localhost:8000/predict")).unwrap();
        assert_eq!(
            client.health_url().unwrap().as_str(),
            "http://localhost:8000/health"
        );

        let nested = HttpScoringClient::new(&config("http://host/api/v1/predict")).unwrap();
        assert_eq!(nested.health_url().unwrap().as_str(), "http://host/api/v1/health");
    }

    #[test]
    fn health_url_ignores_trailing_slash() {
        let slashed = HttpScoringClient::new(&config("http://host/predict/")).unwrap();
        assert_eq!(slashed.health_url().unwrap().as_str(), "http://host/health");

        let root = HttpScoringClient::new(&config("http://host/")).unwrap();
        assert_eq!(root.health_url().unwrap().as_str(), "http://host/health");
    }
}
