#![allow(dead_code)]

use std::time::Duration;

use serde_json::json;
use shortlink_client::application::services::UrlService;
use shortlink_client::infrastructure::http::RequestClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TIMEOUT: Duration = Duration::from_secs(5);

/// Address nothing listens on.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

pub fn client_for(base: &str) -> RequestClient {
    RequestClient::new(base, TIMEOUT).unwrap()
}

pub fn service_for(base: &str) -> UrlService {
    UrlService::new(client_for(base))
}

pub async fn start_backend() -> (MockServer, UrlService) {
    let server = MockServer::start().await;
    let service = service_for(&server.uri());
    (server, service)
}

pub fn error_body(message: &str) -> serde_json::Value {
    json!({ "error": message })
}

/// Mounts a freshly created link answering on shorten, stats and redirect.
pub async fn mount_link(server: &MockServer, code: &str, original_url: &str) {
    Mock::given(method("POST"))
        .and(path("/shorten"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "short_code": code,
            "original_url": original_url,
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/stats/{code}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "short_code": code,
            "click_count": 0,
            "created_at": chrono::Utc::now().to_rfc3339(),
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/{code}")))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", original_url))
        .mount(server)
        .await;
}

/// Answers every unmatched request with the backend's 404 body.
pub async fn mount_not_found(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_body("URL not found")))
        .with_priority(u8::MAX)
        .mount(server)
        .await;
}
