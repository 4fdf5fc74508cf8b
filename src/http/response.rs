//! Rendering edge responses as HTTP.
//!
//! # Design Decisions
//! - The emulator serves exactly what the function would hand CloudFront
//! - A response the function built badly becomes 502, like CloudFront does

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::edge::event::CloudFrontResponse;

pub fn into_http(edge: CloudFrontResponse) -> Response {
    let Some(status) = edge
        .status
        .parse::<u16>()
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
    else {
        tracing::error!(status = %edge.status, "Edge response has an invalid status");
        return (StatusCode::BAD_GATEWAY, "Invalid edge response").into_response();
    };

    let mut response = Response::new(Body::from(edge.body.unwrap_or_default()));
    *response.status_mut() = status;

    for (name, entries) in edge.headers.unwrap_or_default() {
        let Ok(name) = HeaderName::from_bytes(name.as_bytes()) else {
            tracing::warn!(header = %name, "Dropping invalid header name");
            continue;
        };
        for entry in entries {
            match HeaderValue::from_str(&entry.value) {
                Ok(value) => {
                    response.headers_mut().append(name.clone(), value);
                }
                Err(_) => tracing::warn!(header = %name, "Dropping invalid header value"),
            }
        }
    }

    response
}
