use std::time::Duration;

use httpmock::Method::GET;

use crate::common;
use appversions_rs::{AvError, VersionsBuilder};

#[tokio::test]
async fn primary_timeouts_exhaust_retries_then_fallback_answers() {
    let server = common::setup_server();

    // Primary answers far too late for the 100ms per-attempt budget.
    let primary = server.mock(|when, then| {
        when.method(GET).path("/primary").query_param("id", "77");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::version_page(0, 50))
            .delay(Duration::from_millis(500));
    });
    let fallback = server.mock(|when, then| {
        when.method(GET).path("/fallback").query_param("id", "77");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::version_page(0, 50));
    });

    let client = common::test_client_builder(&server)
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let history = VersionsBuilder::new(&client, "77".parse().unwrap())
        .fetch()
        .await
        .unwrap();

    // All three attempts hit chunk 1 of the primary before giving up.
    primary.assert_hits(3);
    fallback.assert();

    assert_eq!(history.metadata.chunks_fetched, 1);
    assert!(!history.metadata.has_more);
    assert_eq!(history.metadata.total, 50);
    for pair in history.data.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[tokio::test]
async fn empty_primary_result_falls_back() {
    let server = common::setup_server();

    let primary = server.mock(|when, then| {
        when.method(GET).path("/primary").query_param("id", "77");
        then.status(200)
            .header("content-type", "application/json")
            .body("[]");
    });
    let fallback = server.mock(|when, then| {
        when.method(GET).path("/fallback").query_param("id", "77");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::version_page(0, 3));
    });

    let client = common::test_client(&server);
    let history = VersionsBuilder::new(&client, "77".parse().unwrap())
        .fetch()
        .await
        .unwrap();

    primary.assert_hits(1);
    fallback.assert();
    assert_eq!(history.metadata.chunks_fetched, 1);
    assert_eq!(history.metadata.total, 3);
}

#[tokio::test]
async fn non_array_primary_result_falls_back() {
    let server = common::setup_server();

    server.mock(|when, then| {
        when.method(GET).path("/primary").query_param("id", "77");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"error":"NOT_FOUND","message":"unknown app"}"#);
    });
    let fallback = server.mock(|when, then| {
        when.method(GET).path("/fallback").query_param("id", "77");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::version_page(0, 2));
    });

    let client = common::test_client(&server);
    let history = VersionsBuilder::new(&client, "77".parse().unwrap())
        .fetch()
        .await
        .unwrap();

    fallback.assert();
    assert_eq!(history.metadata.total, 2);
}

#[tokio::test]
async fn empty_fallback_result_is_no_data() {
    let server = common::setup_server();

    server.mock(|when, then| {
        when.method(GET).path("/primary").query_param("id", "77");
        then.status(500).body("boom");
    });
    server.mock(|when, then| {
        when.method(GET).path("/fallback").query_param("id", "77");
        then.status(200)
            .header("content-type", "application/json")
            .body("[]");
    });

    let client = common::test_client(&server);
    let err = VersionsBuilder::new(&client, "77".parse().unwrap())
        .fetch()
        .await
        .unwrap_err();

    match err {
        AvError::NoData { ref app_id } => assert_eq!(app_id, "77"),
        ref other => panic!("expected NoData, got {other:?}"),
    }
    assert_eq!(err.http_status(), 404);
    assert_eq!(err.reason(), "NO_DATA");
}
