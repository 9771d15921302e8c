mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use shortlink_client::application::services::{HealthMonitor, MonitorState};
use shortlink_client::domain::entities::HealthState;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_healthy_backend() {
    let (server, service) = common::start_backend().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "service": "gateway",
            "timestamp": "2024-01-15T10:30:00Z",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let status = service.health().await;

    assert_eq!(status.status, HealthState::Healthy);
    assert!(status.error.is_none());
}

#[tokio::test]
async fn test_unavailable_backend_never_fails() {
    let service = common::service_for(common::UNREACHABLE);

    let status = service.health().await;

    assert_eq!(status.status, HealthState::Unhealthy);
    let error = status.error.unwrap();
    assert!(!error.trim().is_empty());
    assert_eq!(error, "Service unavailable");
}

#[tokio::test]
async fn test_error_status_is_unhealthy() {
    let (server, service) = common::start_backend().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503).set_body_json(common::error_body("database down")))
        .mount(&server)
        .await;

    let status = service.health().await;

    assert_eq!(status.status, HealthState::Unhealthy);
    assert_eq!(status.error.as_deref(), Some("database down"));
}

#[tokio::test]
async fn test_degraded_report_is_unhealthy() {
    let (server, service) = common::start_backend().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "degraded" })))
        .mount(&server)
        .await;

    let status = service.health().await;

    assert_eq!(status.status, HealthState::Unhealthy);
    assert_eq!(
        status.error.as_deref(),
        Some("Service reported status 'degraded'")
    );
}

#[tokio::test]
async fn test_garbage_body_is_unhealthy() {
    let (server, service) = common::start_backend().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let status = service.health().await;

    assert_eq!(status.status, HealthState::Unhealthy);
    assert_eq!(status.error.as_deref(), Some("Service unavailable"));
}

#[tokio::test]
async fn test_monitor_against_live_backend() {
    let (server, service) = common::start_backend().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "healthy" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut monitor = HealthMonitor::new(Arc::new(service), Duration::from_secs(3600));
    let mut updates = monitor.subscribe();

    monitor.start();
    monitor.stop();

    let snapshot = tokio::time::timeout(Duration::from_secs(1), async {
        loop {
            updates.changed().await.unwrap();
            let snapshot = updates.borrow_and_update().clone();
            if snapshot.state != MonitorState::Checking {
                break snapshot;
            }
        }
    })
    .await;

    // The only check was issued before stop(), so its result is discarded.
    assert!(snapshot.is_err());
    assert_eq!(monitor.snapshot().state, MonitorState::Checking);
}
