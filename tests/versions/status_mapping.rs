use httpmock::Method::GET;

use crate::common;
use appversions_rs::{AvError, ErrorPayload, VersionsBuilder};

const INTERSTITIAL: &str = r#"<html><body>Redirecting…</body></html>"#;

async fn both_fail(server: &httpmock::MockServer, fallback_status: u16, fallback_body: &str) -> AvError {
    server.mock(|when, then| {
        when.method(GET).path("/primary");
        then.status(500).body("primary down");
    });
    server.mock(|when, then| {
        when.method(GET).path("/fallback");
        then.status(fallback_status).body(fallback_body);
    });

    let client = common::test_client(server);
    VersionsBuilder::new(&client, "31".parse().unwrap())
        .fetch()
        .await
        .unwrap_err()
}

#[tokio::test]
async fn generic_double_failure_maps_500() {
    let server = common::setup_server();
    let err = both_fail(&server, 500, "fallback down").await;

    assert_eq!(err.http_status(), 500);
    assert_eq!(err.reason(), "UPSTREAM_STATUS");

    let payload = ErrorPayload::new(&err, "31");
    assert_eq!(payload.error, "UPSTREAM_STATUS");
    assert_eq!(payload.app_id, "31");
    let json = serde_json::to_value(&payload).unwrap();
    assert!(json.get("appId").is_some());
    assert!(json.get("message").is_some());
}

#[tokio::test]
async fn fallback_not_found_maps_404() {
    let server = common::setup_server();
    let err = both_fail(&server, 404, "no such app").await;

    match err {
        AvError::Status { status, .. } => assert_eq!(status, 404),
        ref other => panic!("expected Status error, got {other:?}"),
    }
    assert_eq!(err.http_status(), 404);
}

#[tokio::test]
async fn fallback_redirect_maps_403() {
    let server = common::setup_server();
    let err = both_fail(&server, 200, INTERSTITIAL).await;

    match err {
        AvError::UpstreamRedirect { .. } => {}
        ref other => panic!("expected UpstreamRedirect, got {other:?}"),
    }
    assert_eq!(err.http_status(), 403);
    assert_eq!(err.reason(), "UPSTREAM_REDIRECT");
}
