//! CloudFront viewer-request event and result shapes.
//!
//! These mirror the JSON the Lambda@Edge platform sends and expects back.
//! Request fields the rewriter does not read (method, querystring, clientIp,
//! origin) are kept in `extra` so a pass-through result round-trips them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Multi-valued headers keyed by lowercase header name.
pub type CloudFrontHeaders = BTreeMap<String, Vec<HeaderEntry>>;

/// One header value as CloudFront encodes it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HeaderEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: String,
}

impl HeaderEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
        }
    }
}

/// Viewer-request event: the platform always sends exactly one record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CloudFrontRequestEvent {
    #[serde(rename = "Records")]
    pub records: Vec<CloudFrontRecord>,
}

impl CloudFrontRequestEvent {
    /// Wrap a single request in an event envelope.
    pub fn from_request(request: CloudFrontRequest) -> Self {
        Self {
            records: vec![CloudFrontRecord {
                cf: CloudFrontEvent {
                    config: Value::Null,
                    request,
                },
            }],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CloudFrontRecord {
    pub cf: CloudFrontEvent,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CloudFrontEvent {
    /// Distribution metadata, not read by the rewriter.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub config: Value,
    pub request: CloudFrontRequest,
}

/// The viewer request as seen at the edge.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CloudFrontRequest {
    pub uri: String,
    #[serde(default)]
    pub headers: CloudFrontHeaders,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CloudFrontRequest {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            headers: CloudFrontHeaders::new(),
            extra: Map::new(),
        }
    }

    /// Append a header value. `key` is the display name, e.g. `Host`.
    pub fn with_header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers
            .entry(key.to_ascii_lowercase())
            .or_default()
            .push(HeaderEntry::new(key, value));
        self
    }

    /// First value of the `host` header.
    pub fn host(&self) -> Option<&str> {
        self.headers
            .get("host")
            .and_then(|values| values.first())
            .map(|h| h.value.as_str())
    }
}

/// Response synthesized at the edge instead of going to the origin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CloudFrontResponse {
    pub status: String,
    #[serde(rename = "statusDescription")]
    pub status_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<CloudFrontHeaders>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// What the function hands back to CloudFront.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum EdgeResult {
    Response(CloudFrontResponse),
    Request(CloudFrontRequest),
}
