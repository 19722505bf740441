use httpmock::Method::GET;

use crate::common;
use appversions_rs::VersionsBuilder;

#[tokio::test]
async fn collects_chunks_until_short_page() {
    let server = common::setup_server();

    // 1000 + 1000 + 400: the third page is short, so collection stops there.
    let p1 = server.mock(|when, then| {
        when.method(GET)
            .path("/primary")
            .query_param("id", "1234")
            .query_param("chunk", "1");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::version_page(0, 1000));
    });
    let p2 = server.mock(|when, then| {
        when.method(GET)
            .path("/primary")
            .query_param("id", "1234")
            .query_param("chunk", "2");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::version_page(1000, 1000));
    });
    let p3 = server.mock(|when, then| {
        when.method(GET)
            .path("/primary")
            .query_param("id", "1234")
            .query_param("chunk", "3");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::version_page(2000, 400));
    });

    let client = common::test_client(&server);
    let history = VersionsBuilder::new(&client, "1234".parse().unwrap())
        .fetch()
        .await
        .unwrap();

    p1.assert();
    p2.assert();
    p3.assert();

    assert_eq!(history.metadata.chunks_fetched, 3);
    assert!(!history.metadata.has_more);
    assert_eq!(history.metadata.total, 2400);
    assert_eq!(history.data.len(), 2400);
    // Highest id has the newest timestamp, so it comes first.
    assert_eq!(history.data[0].external_id, "2399");
}

#[tokio::test]
async fn short_first_page_means_no_second_request() {
    let server = common::setup_server();

    let p1 = server.mock(|when, then| {
        when.method(GET)
            .path("/primary")
            .query_param("id", "42")
            .query_param("chunk", "1");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::version_page(0, 3));
    });

    let client = common::test_client(&server);
    let history = VersionsBuilder::new(&client, "42".parse().unwrap())
        .fetch()
        .await
        .unwrap();

    p1.assert_hits(1);
    assert_eq!(history.metadata.chunks_fetched, 1);
    assert!(!history.metadata.has_more);
    assert_eq!(history.metadata.total, 3);
}

#[tokio::test]
async fn chunk_cap_with_full_pages_flags_more() {
    let server = common::setup_server();

    for chunk in 1..=3u64 {
        server.mock(|when, then| {
            when.method(GET)
                .path("/primary")
                .query_param("id", "42")
                .query_param("chunk", chunk.to_string());
            then.status(200)
                .header("content-type", "application/json")
                .body(common::version_page((chunk - 1) * 2, 2));
        });
    }

    let client = common::test_client(&server);
    let history = VersionsBuilder::new(&client, "42".parse().unwrap())
        .limit(2)
        .fetch()
        .await
        .unwrap();

    assert_eq!(history.metadata.chunks_fetched, 3);
    assert!(history.metadata.has_more);
    assert_eq!(history.metadata.total, 6);
}

#[tokio::test]
async fn non_array_page_stops_collection() {
    let server = common::setup_server();

    let p1 = server.mock(|when, then| {
        when.method(GET)
            .path("/primary")
            .query_param("id", "42")
            .query_param("chunk", "1");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::version_page(0, 2));
    });
    let p2 = server.mock(|when, then| {
        when.method(GET)
            .path("/primary")
            .query_param("id", "42")
            .query_param("chunk", "2");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"notice":"nothing further"}"#);
    });

    let client = common::test_client(&server);
    let history = VersionsBuilder::new(&client, "42".parse().unwrap())
        .limit(2)
        .fetch()
        .await
        .unwrap();

    p1.assert();
    p2.assert();
    assert_eq!(history.metadata.chunks_fetched, 2);
    assert!(!history.metadata.has_more);
    assert_eq!(history.metadata.total, 2);
}

#[tokio::test]
async fn per_request_chunk_cap_override() {
    let server = common::setup_server();

    let p1 = server.mock(|when, then| {
        when.method(GET)
            .path("/primary")
            .query_param("id", "42")
            .query_param("chunk", "1");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::version_page(0, 2));
    });

    let client = common::test_client(&server);
    let history = VersionsBuilder::new(&client, "42".parse().unwrap())
        .limit(2)
        .max_chunks(1)
        .fetch()
        .await
        .unwrap();

    p1.assert_hits(1);
    assert_eq!(history.metadata.chunks_fetched, 1);
    assert!(history.metadata.has_more);
    assert_eq!(history.metadata.total, 2);
}
