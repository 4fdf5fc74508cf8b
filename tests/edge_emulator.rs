//! Local edge emulator in front of a mock bucket.

use axum::http::StatusCode;
use cf_url_rewriter::config::RewriterConfig;
use cf_url_rewriter::EdgeServer;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

mod common;

/// Serves both the index documents and the artifacts.
async fn start_bucket() -> common::MockBackend {
    common::start_mock_backend(|path| match path {
        "/ci/dbc/bundle-build-dashboards/1.2.0/index.json" => (200, r#"{"latest":"345"}"#.into()),
        "/bundle-build-dashboards/1.2.0/456/linux/x64/" => (200, "artifact".into()),
        "/bundle-build-dashboards/1.2.0/456/linux/x64/?arch=x64" => (200, "artifact with query".into()),
        _ => (404, String::new()),
    })
    .await
}

async fn start_emulator(bucket: &common::MockBackend) -> (String, broadcast::Sender<()>) {
    let mut config = RewriterConfig::default();
    config.index.scheme = "http".into();
    config.index.authority_override = Some(bucket.addr.to_string());
    config.emulator.origin_address = bucket.addr.to_string();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    let server = EdgeServer::new(config).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener, shutdown_rx).await;
    });

    (format!("http://{}", addr), shutdown_tx)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_latest_redirects() {
    let bucket = start_bucket().await;
    let (base, _shutdown) = start_emulator(&bucket).await;

    let res = client()
        .get(format!("{}/ci/dbc/bundle-build-dashboards/1.2.0/latest/linux/x64/tar/", base))
        .send()
        .await
        .expect("Emulator unreachable");

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(
        res.headers()["location"],
        "/ci/dbc/bundle-build-dashboards/1.2.0/345/linux/x64/tar/"
    );
    assert_eq!(res.headers()["cache-control"], "max-age=3600");
    assert!(res.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_artifact_served_from_origin_without_prefix() {
    let bucket = start_bucket().await;
    let (base, _shutdown) = start_emulator(&bucket).await;

    let res = client()
        .get(format!("{}/ci/dbc/bundle-build-dashboards/1.2.0/456/linux/x64/", base))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "artifact");
    assert_eq!(bucket.paths(), vec!["/bundle-build-dashboards/1.2.0/456/linux/x64/"]);
}

#[tokio::test]
async fn test_query_string_reaches_origin() {
    let bucket = start_bucket().await;
    let (base, _shutdown) = start_emulator(&bucket).await;

    let res = client()
        .get(format!("{}/ci/dbc/bundle-build-dashboards/1.2.0/456/linux/x64/?arch=x64", base))
        .send()
        .await
        .unwrap();

    assert_eq!(res.text().await.unwrap(), "artifact with query");
}

#[tokio::test]
async fn test_outside_artifact_tree_is_not_found() {
    let bucket = start_bucket().await;
    let (base, _shutdown) = start_emulator(&bucket).await;

    let res = client()
        .get(format!("{}/bundle-build-dashboards/1.2.0/456/linux/x64/", base))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "The page is not found!");
    assert!(bucket.paths().is_empty());
}

#[tokio::test]
async fn test_only_get_and_head_allowed() {
    let bucket = start_bucket().await;
    let (base, _shutdown) = start_emulator(&bucket).await;

    let res = client()
        .post(format!("{}/ci/dbc/bundle-build-dashboards/1.2.0/456/linux/x64/", base))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()["allow"], "GET, HEAD");
    assert!(bucket.paths().is_empty());
}

#[tokio::test]
async fn test_origin_down_is_bad_gateway() {
    let bucket = start_bucket().await;
    let mut config = RewriterConfig::default();
    config.emulator.origin_address = common::closed_addr().await.to_string();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let server = EdgeServer::new(config).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener, shutdown_rx).await;
    });

    let res = client()
        .get(format!("http://{}/ci/dbc/bundle-build-dashboards/1.2.0/456/linux/x64/", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    assert!(bucket.paths().is_empty());
}
