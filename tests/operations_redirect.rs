mod common;

use shortlink_client::domain::entities::{RedirectProbe, ShortCodeRef};
use shortlink_client::error::ErrorKind;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn code(raw: &str) -> ShortCodeRef {
    ShortCodeRef::new(raw).unwrap()
}

#[tokio::test]
async fn test_known_code_reports_redirect_without_following() {
    let (server, service) = common::start_backend().await;
    common::mount_link(&server, "abc123", "https://example.com/landing").await;

    // Following the redirect would hit this and fail the expectation.
    Mock::given(method("GET"))
        .and(path("/landing"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let probe = service.test_redirect(&code("abc123")).await.unwrap();

    assert_eq!(
        probe,
        RedirectProbe {
            status_code: 302,
            location: "https://example.com/landing".to_string(),
        }
    );
}

#[tokio::test]
async fn test_shortened_link_redirects_to_original() {
    let (server, service) = common::start_backend().await;
    common::mount_link(&server, "k9", "https://example.com").await;

    let created = service.shorten("https://example.com", None).await.unwrap();
    let probe = service.test_redirect(&created.short_code).await.unwrap();

    assert_eq!(probe.status_code, 302);
    assert_eq!(probe.location, created.original_url);
}

#[tokio::test]
async fn test_unknown_code_is_not_found() {
    let (server, service) = common::start_backend().await;
    common::mount_not_found(&server).await;

    let err = service.test_redirect(&code("nope")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.message(), "URL not found");
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_non_302_redirects_are_not_found() {
    let (server, service) = common::start_backend().await;

    for (code_str, status) in [("perm", 301), ("temp", 307), ("ok", 200)] {
        Mock::given(method("GET"))
            .and(path(format!("/{code_str}")))
            .respond_with(
                ResponseTemplate::new(status).insert_header("Location", "https://example.com"),
            )
            .mount(&server)
            .await;

        let err = service.test_redirect(&code(code_str)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound, "status {status}");
        assert_eq!(err.status_code(), Some(status));
    }
}

#[tokio::test]
async fn test_302_without_location_is_unexpected() {
    let (server, service) = common::start_backend().await;

    Mock::given(method("GET"))
        .and(path("/bare"))
        .respond_with(ResponseTemplate::new(302))
        .mount(&server)
        .await;

    let err = service.test_redirect(&code("bare")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unexpected);
    assert_eq!(err.status_code(), Some(302));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let service = common::service_for(common::UNREACHABLE);

    let err = service.test_redirect(&code("abc")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.message(), "URL not found");
}
