//! Lambda@Edge entry point (viewer-request trigger).
//!
//! # Architecture Overview
//!
//! ```text
//!   Viewer ──▶ CloudFront edge ──▶ viewer-request Lambda (this binary)
//!                                      │
//!                                      ├─ not under /ci/dbc/ ──────▶ 404
//!                                      ├─ no /latest/ segment ─────▶ strip /ci/xxx/ → S3 origin
//!                                      └─ /latest/ ──▶ GET <host>/.../index/<platform>/index.json
//!                                                        └─ miss ──▶ GET <host>/.../index.json
//!                                                                     ├─ hit ──▶ 302 /<latest>/
//!                                                                     └─ miss ─▶ 404
//! ```

use cf_url_rewriter::config::RewriterConfig;
use cf_url_rewriter::observability::{init_logging, LogTarget};
use cf_url_rewriter::{handle_event, CloudFrontRequestEvent, EdgeResult, EdgeRewriter, HttpsJsonFetcher};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use tracing::Instrument;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = RewriterConfig::default();
    init_logging(&config.observability.log_level, LogTarget::CloudWatch);

    let fetcher = HttpsJsonFetcher::new(&config.index)?;
    let rewriter = EdgeRewriter::new(fetcher, &config.index);
    let rewriter = &rewriter;

    tracing::info!(scheme = %config.index.scheme, "cf-url-rewriter ready");

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<CloudFrontRequestEvent>| async move {
            let (payload, context) = event.into_parts();
            let span = tracing::info_span!("viewer_request", request_id = %context.request_id);
            let result = handle_event(rewriter, payload).instrument(span).await;
            Ok::<EdgeResult, Error>(result)
        },
    ))
    .await
}
