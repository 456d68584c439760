//! Shared helpers for infra integration tests

use std::net::TcpListener;

use devtracker_domain::Config;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Collector stub answering every activity POST with `status`.
pub async fn collector(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/ide/activity"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

/// Config pointing at `server` with settings kept in a temp dir.
pub fn config_for(server: &MockServer, dir: &TempDir) -> Config {
    config_at(&server.uri(), dir)
}

/// Config pointing at `server_url` with settings kept in a temp dir.
pub fn config_at(server_url: &str, dir: &TempDir) -> Config {
    Config {
        server_url: server_url.to_string(),
        settings_path: Some(dir.path().join("settings.json")),
        ..Config::default()
    }
}

/// URL of a local port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener); // connections are refused once the port is released
    format!("http://{}", addr)
}

/// Parsed JSON bodies of every request the collector received.
pub async fn received_bodies(server: &MockServer) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|req| serde_json::from_slice(&req.body).unwrap_or(serde_json::Value::Null))
        .collect()
}
