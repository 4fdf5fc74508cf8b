//! Local edge emulator.
//!
//! # Responsibilities
//! - Accept viewer requests the way the distribution's default behavior does
//!   (GET and HEAD only)
//! - Run every request through the same EdgeRewriter the Lambda uses
//! - Serve synthesized responses, forward pass-through requests to the origin
//! - Request IDs, tracing, request timeout, graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RewriterConfig;
use crate::edge::event::EdgeResult;
use crate::fetch::{FetchError, HttpsJsonFetcher};
use crate::http::request::{request_id, viewer_request, MakeRequestUuid};
use crate::http::response::into_http;
use crate::observability::metrics;
use crate::rewrite::{EdgeRewriter, RewriteDecision};

#[derive(Debug, Error)]
pub enum EmulatorError {
    #[error("index fetcher: {0}")]
    Fetcher(#[from] FetchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub rewriter: Arc<EdgeRewriter<HttpsJsonFetcher>>,
    pub client: Client<HttpConnector, Body>,
    pub origin: String,
}

/// HTTP server standing in for the CloudFront distribution.
pub struct EdgeServer {
    router: Router,
    config: RewriterConfig,
}

impl EdgeServer {
    pub fn new(config: RewriterConfig) -> Result<Self, EmulatorError> {
        let fetcher = HttpsJsonFetcher::new(&config.index)?;
        let rewriter = Arc::new(EdgeRewriter::new(fetcher, &config.index));

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            rewriter,
            client,
            origin: config.emulator.origin_address.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RewriterConfig, state: AppState) -> Router {
        let timeout = Duration::from_secs(config.emulator.request_timeout_secs);

        Router::new()
            .route("/", any(edge_handler))
            .route("/{*path}", any(edge_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(timeout)),
            )
    }

    /// Serve until `shutdown` fires or Ctrl+C arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), EmulatorError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            origin = %self.config.emulator.origin_address,
            "Edge emulator starting"
        );

        let stop = async move {
            tokio::select! {
                _ = shutdown.recv() => {}
                result = tokio::signal::ctrl_c() => {
                    if let Err(e) = result {
                        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                        std::future::pending::<()>().await;
                    }
                }
            }
            tracing::info!("Shutdown signal received");
        };

        axum::serve(listener, self.router)
            .with_graceful_shutdown(stop)
            .await?;

        tracing::info!("Edge emulator stopped");
        Ok(())
    }
}

/// Viewer-request trigger followed by the origin fetch.
async fn edge_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let method = request.method().clone();
    let id = request_id(&request).to_string();

    if method != Method::GET && method != Method::HEAD {
        tracing::debug!(request_id = %id, method = %method, "Method not allowed");
        metrics::record_emulator_response(StatusCode::METHOD_NOT_ALLOWED.as_u16());
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "GET, HEAD")],
            "Method not allowed",
        )
            .into_response();
    }

    let viewer = viewer_request(&request);
    let decision = state.rewriter.decide(&viewer).await;

    let response = match decision {
        RewriteDecision::PassThrough { uri } => {
            tracing::debug!(request_id = %id, from = %viewer.uri, to = %uri, "Forwarding to origin");
            forward_to_origin(&state, request, &uri).await
        }
        other => match other.into_edge_result(viewer) {
            EdgeResult::Response(edge) => into_http(edge),
            EdgeResult::Request(_) => (StatusCode::BAD_GATEWAY, "Invalid edge result").into_response(),
        },
    };

    metrics::record_emulator_response(response.status().as_u16());
    response
}

async fn forward_to_origin(state: &AppState, request: Request<Body>, path: &str) -> Response {
    let (parts, _body) = request.into_parts();

    let target = match parts.uri.query() {
        Some(query) => format!("http://{}{}?{}", state.origin, path, query),
        None => format!("http://{}{}", state.origin, path),
    };
    let uri = match target.parse::<Uri>() {
        Ok(uri) => uri,
        Err(e) => {
            tracing::warn!(origin_uri = %target, error = %e, "Rewritten path is not a valid URI");
            return (StatusCode::BAD_GATEWAY, "Invalid origin request").into_response();
        }
    };

    let mut builder = Request::builder().method(parts.method).uri(uri);
    if let Some(headers) = builder.headers_mut() {
        for (k, v) in parts.headers.iter() {
            if *k != header::HOST {
                headers.append(k.clone(), v.clone());
            }
        }
    }
    let origin_request = match builder.body(Body::empty()) {
        Ok(req) => req,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to build origin request");
            return (StatusCode::BAD_GATEWAY, "Invalid origin request").into_response();
        }
    };

    match state.client.request(origin_request).await {
        Ok(response) => {
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(origin = %state.origin, error = %e, "Origin request failed");
            (StatusCode::BAD_GATEWAY, "Origin request failed").into_response()
        }
    }
}
