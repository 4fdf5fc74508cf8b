//! Viewer-request rewriting.
//!
//! # Responsibilities
//! - Reject anything outside the artifact tree with 404
//! - Strip the routing prefix from ordinary artifact paths
//! - Resolve `/latest/` through the narrow, then broad, index document
//!
//! # Design Decisions
//! - One decision per call, returned directly; nothing is shared between calls
//! - Lookups run one after another; broad only starts once narrow gave nothing
//! - Lookup failures are logged and downgraded, never returned

use std::time::Instant;

use crate::config::IndexConfig;
use crate::edge::event::{CloudFrontRequest, EdgeResult};
use crate::fetch::{IndexFetcher, VersionIndex};
use crate::observability::metrics;
use crate::rewrite::decision::RewriteDecision;
use crate::rewrite::path;

/// Which index document a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexScope {
    /// Per-platform: `<version>/index/<os>/<arch>/<format>/index.json`.
    Narrow,
    /// Per-version: `<version>/index.json`.
    Broad,
}

impl IndexScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexScope::Narrow => "narrow",
            IndexScope::Broad => "broad",
        }
    }
}

/// Decides what the edge does with each viewer request.
#[derive(Debug, Clone)]
pub struct EdgeRewriter<F> {
    fetcher: F,
    scheme: String,
    authority_override: Option<String>,
}

impl<F: IndexFetcher> EdgeRewriter<F> {
    pub fn new(fetcher: F, config: &IndexConfig) -> Self {
        Self {
            fetcher,
            scheme: config.scheme.clone(),
            authority_override: config.authority_override.clone(),
        }
    }

    /// Run the request through the rewriter and render the platform result.
    pub async fn handle(&self, request: CloudFrontRequest) -> EdgeResult {
        let decision = self.decide(&request).await;
        decision.into_edge_result(request)
    }

    pub async fn decide(&self, request: &CloudFrontRequest) -> RewriteDecision {
        let start = Instant::now();
        let decision = self.evaluate(request).await;

        tracing::debug!(
            uri = %request.uri,
            decision = decision.kind(),
            "Viewer request decided"
        );
        metrics::record_decision(decision.kind(), start);

        decision
    }

    async fn evaluate(&self, request: &CloudFrontRequest) -> RewriteDecision {
        let uri = request.uri.as_str();

        if !path::is_routed(uri) {
            return RewriteDecision::NotFound;
        }

        if !path::has_latest_segment(uri) {
            return RewriteDecision::PassThrough {
                uri: path::strip_routing_prefix(uri),
            };
        }

        self.resolve_latest(request).await
    }

    async fn resolve_latest(&self, request: &CloudFrontRequest) -> RewriteDecision {
        let uri = request.uri.as_str();

        let authority = match self.authority_override.as_deref().or_else(|| request.host()) {
            Some(a) => a,
            None => {
                tracing::warn!(uri = %uri, "No host header, cannot look up index");
                return RewriteDecision::NotFound;
            }
        };

        let lookups = [
            (IndexScope::Narrow, path::narrow_index_uri(uri)),
            (IndexScope::Broad, path::broad_index_uri(uri)),
        ];

        for (scope, index_uri) in lookups {
            let Some(index_uri) = index_uri else { continue };
            if let Some(latest) = self.lookup(scope, authority, &index_uri).await {
                return RewriteDecision::redirect(path::redirect_location(uri, &latest));
            }
        }

        RewriteDecision::NotFound
    }

    /// Fetch one index document and pull out a usable `latest`.
    async fn lookup(&self, scope: IndexScope, authority: &str, index_uri: &str) -> Option<String> {
        let url = format!("{}://{}{}", self.scheme, authority, index_uri);

        match self.fetcher.fetch_json(&url).await {
            Ok(doc) => {
                let latest = VersionIndex::from_json(&doc).latest;
                let outcome = if latest.is_some() { "hit" } else { "miss" };
                tracing::debug!(scope = scope.as_str(), url = %url, outcome, "Index lookup");
                metrics::record_index_fetch(scope.as_str(), outcome);
                latest
            }
            Err(e) => {
                tracing::warn!(
                    scope = scope.as_str(),
                    url = %url,
                    error = %e,
                    "Index lookup failed"
                );
                metrics::record_index_fetch(scope.as_str(), e.kind());
                None
            }
        }
    }
}
