//! Shared test utilities and mock infrastructure.

#![allow(dead_code)]

pub mod mock_scoring;

use bankpredict::client::HttpScoringClient;
use bankpredict::config::EndpointConfig;
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Find an available port for testing.
///
/// Nothing listens on the port once this returns, so connecting to it is
/// refused.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// URL of a prediction endpoint nobody is listening on.
pub fn dead_endpoint() -> String {
    format!("http://127.0.0.1:{}/predict", free_port())
}

/// Write `content` to a `config.toml` inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn client_for(url: &str, timeout_seconds: u32) -> Arc<HttpScoringClient> {
    let config = EndpointConfig {
        url: url.to_string(),
        timeout_seconds,
        connect_timeout_seconds: 2,
    };
    Arc::new(HttpScoringClient::new(&config).expect("valid endpoint"))
}
