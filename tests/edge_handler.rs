//! Viewer-request events end to end, with index documents served over a socket.

use cf_url_rewriter::config::IndexConfig;
use cf_url_rewriter::{handle_event, CloudFrontRequestEvent, EdgeRewriter, HttpsJsonFetcher};
use serde_json::{json, Value};

mod common;

fn event(uri: &str) -> CloudFrontRequestEvent {
    serde_json::from_value(json!({
        "Records": [{
            "cf": {
                "config": { "eventType": "viewer-request" },
                "request": {
                    "uri": uri,
                    "headers": { "host": [{ "key": "Host", "value": "test.cloudfront.net" }] }
                }
            }
        }]
    }))
    .unwrap()
}

async fn run(addr: std::net::SocketAddr, uri: &str) -> Value {
    let config = IndexConfig {
        scheme: "http".into(),
        authority_override: Some(addr.to_string()),
        ..IndexConfig::default()
    };
    let rewriter = EdgeRewriter::new(HttpsJsonFetcher::new(&config).unwrap(), &config);
    serde_json::to_value(handle_event(&rewriter, event(uri)).await).unwrap()
}

fn not_found() -> Value {
    json!({
        "body": "The page is not found!",
        "status": "404",
        "statusDescription": "Not found"
    })
}

fn redirect(location: &str) -> Value {
    json!({
        "headers": {
            "cache-control": [{ "key": "Cache-Control", "value": "max-age=3600" }],
            "location": [{ "key": "Location", "value": location }]
        },
        "status": "302",
        "statusDescription": "Moved temporarily"
    })
}

#[tokio::test]
async fn test_released_version_falls_back_to_version_index() {
    let backend = common::start_mock_backend(|path| match path {
        "/ci/dbc/bundle-build-dashboards/1.2.0/index.json" => (200, r#"{"latest":"345"}"#.into()),
        _ => (200, String::new()),
    })
    .await;

    let result = run(backend.addr, "/ci/dbc/bundle-build-dashboards/1.2.0/latest/linux/x64/tar/").await;

    assert_eq!(result, redirect("/ci/dbc/bundle-build-dashboards/1.2.0/345/linux/x64/tar/"));
    assert_eq!(
        backend.paths(),
        vec![
            "/ci/dbc/bundle-build-dashboards/1.2.0/index/linux/x64/tar/index.json",
            "/ci/dbc/bundle-build-dashboards/1.2.0/index.json",
        ]
    );
}

#[tokio::test]
async fn test_upcoming_release_uses_platform_index() {
    let backend = common::start_mock_backend(|_| (200, r#"{"latest":"345"}"#.into())).await;

    let result = run(backend.addr, "/ci/dbc/bundle-build-dashboards/3.0.0/latest/linux/x64/tar/").await;

    assert_eq!(result, redirect("/ci/dbc/bundle-build-dashboards/3.0.0/345/linux/x64/tar/"));
    assert_eq!(
        backend.paths(),
        vec!["/ci/dbc/bundle-build-dashboards/3.0.0/index/linux/x64/tar/index.json"]
    );
}

#[tokio::test]
async fn test_invalid_index_files_are_not_found() {
    let backend = common::start_mock_backend(|_| (200, r#"{"latest":""}"#.into())).await;

    let result = run(backend.addr, "/ci/dbc/bundle-build-dashboards/3.1.0/latest/linux/x64/tar/").await;

    assert_eq!(result, not_found());
    assert_eq!(backend.paths().len(), 2);
}

#[tokio::test]
async fn test_unparsable_indexes_are_not_found() {
    let backend = common::start_mock_backend(|_| (500, "<html>oops</html>".into())).await;

    let result = run(backend.addr, "/ci/dbc/bundle-build-dashboards/3.1.0/latest/linux/x64/tar/").await;

    assert_eq!(result, not_found());
}

#[tokio::test]
async fn test_unreachable_index_host_is_not_found() {
    let addr = common::closed_addr().await;

    let result = run(addr, "/ci/dbc/bundle-build-dashboards/3.1.0/latest/linux/x64/tar/").await;

    assert_eq!(result, not_found());
}

#[tokio::test]
async fn test_without_ci_keyword_is_not_found() {
    let backend = common::start_mock_backend(|_| (200, r#"{"latest":"1"}"#.into())).await;

    for uri in [
        "/bundle-build-dashboards/1.2.0/456/linux/x64/",
        "/bundle-build-dashboards/1.2.0/8622/linux/x64/",
    ] {
        assert_eq!(run(backend.addr, uri).await, not_found());
    }
    assert!(backend.paths().is_empty());
}

#[tokio::test]
async fn test_ci_keyword_passes_through_with_headers() {
    let backend = common::start_mock_backend(|_| (200, r#"{"latest":"123"}"#.into())).await;

    for (uri, rewritten) in [
        (
            "/ci/dbc/bundle-build-dashboards/1.2.0/456/linux/x64/",
            "/bundle-build-dashboards/1.2.0/456/linux/x64/",
        ),
        (
            "/ci/dbc/bundle-build-dashboards/1.2.0/456/linux/x64/foollatestbar/",
            "/bundle-build-dashboards/1.2.0/456/linux/x64/foollatestbar/",
        ),
    ] {
        assert_eq!(
            run(backend.addr, uri).await,
            json!({
                "headers": { "host": [{ "key": "Host", "value": "test.cloudfront.net" }] },
                "uri": rewritten
            })
        );
    }
    assert!(backend.paths().is_empty());
}

#[tokio::test]
async fn test_event_without_records_is_not_found() {
    let config = IndexConfig::default();
    let rewriter = EdgeRewriter::new(HttpsJsonFetcher::new(&config).unwrap(), &config);
    let event: CloudFrontRequestEvent = serde_json::from_value(json!({ "Records": [] })).unwrap();

    let result = serde_json::to_value(handle_event(&rewriter, event).await).unwrap();
    assert_eq!(result, not_found());
}
