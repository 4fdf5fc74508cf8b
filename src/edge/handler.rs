//! Viewer-request event handling.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::edge::event::{CloudFrontRequestEvent, EdgeResult};
use crate::fetch::IndexFetcher;
use crate::rewrite::decision::not_found_response;
use crate::rewrite::EdgeRewriter;

#[derive(Debug, Error)]
pub enum EventFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid viewer-request event: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read a captured viewer-request event from a JSON file.
pub fn read_event(path: &Path) -> Result<CloudFrontRequestEvent, EventFileError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Answer one viewer-request event. Never fails: every path ends in a result.
pub async fn handle_event<F: IndexFetcher>(
    rewriter: &EdgeRewriter<F>,
    event: CloudFrontRequestEvent,
) -> EdgeResult {
    match event.records.into_iter().next() {
        Some(record) => rewriter.handle(record.cf.request).await,
        None => {
            tracing::error!("Viewer-request event has no records");
            EdgeResult::Response(not_found_response())
        }
    }
}
