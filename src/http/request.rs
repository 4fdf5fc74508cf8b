//! Viewer request handling for the emulator.
//!
//! # Responsibilities
//! - Generate a request ID (UUID v4) for every viewer request
//! - Translate an HTTP request into the CloudFront request record
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Header names keep CloudFront's layout: lowercase map key, display-cased `key`

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use serde_json::Value;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::edge::event::{CloudFrontRequest, HeaderEntry};

pub const X_REQUEST_ID: &str = "x-request-id";

/// Issues UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Request ID of a request that went through the request-id layer.
pub fn request_id(request: &Request<Body>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// `x-request-id` → `X-Request-Id`.
fn display_case(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Build the record CloudFront would hand the function for this request.
///
/// Header values that are not valid UTF-8 are dropped.
pub fn viewer_request(request: &Request<Body>) -> CloudFrontRequest {
    let mut viewer = CloudFrontRequest::new(request.uri().path());

    for (name, value) in request.headers() {
        let Ok(value) = value.to_str() else { continue };
        viewer
            .headers
            .entry(name.as_str().to_string())
            .or_default()
            .push(HeaderEntry::new(display_case(name.as_str()), value));
    }

    viewer.extra.insert(
        "method".to_string(),
        Value::String(request.method().as_str().to_string()),
    );
    viewer.extra.insert(
        "querystring".to_string(),
        Value::String(request.uri().query().unwrap_or("").to_string()),
    );

    viewer
}
