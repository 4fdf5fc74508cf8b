//! The outcome of one viewer request.

use crate::edge::event::{CloudFrontHeaders, CloudFrontRequest, CloudFrontResponse, EdgeResult, HeaderEntry};

pub const NOT_FOUND_BODY: &str = "The page is not found!";
pub const REDIRECT_MAX_AGE_SECS: u64 = 3600;

/// What the edge does with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteDecision {
    /// Continue to the origin with a rewritten path.
    PassThrough { uri: String },
    /// Send the viewer to a concrete build.
    Redirect { location: String, max_age: u64 },
    NotFound,
}

impl RewriteDecision {
    pub fn redirect(location: String) -> Self {
        Self::Redirect {
            location,
            max_age: REDIRECT_MAX_AGE_SECS,
        }
    }

    /// Label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PassThrough { .. } => "pass_through",
            Self::Redirect { .. } => "redirect",
            Self::NotFound => "not_found",
        }
    }

    /// Render into the shape CloudFront expects. Only `PassThrough` keeps the request.
    pub fn into_edge_result(self, mut request: CloudFrontRequest) -> EdgeResult {
        match self {
            Self::PassThrough { uri } => {
                request.uri = uri;
                EdgeResult::Request(request)
            }
            Self::Redirect { location, max_age } => {
                EdgeResult::Response(redirect_response(location, max_age))
            }
            Self::NotFound => EdgeResult::Response(not_found_response()),
        }
    }
}

pub fn not_found_response() -> CloudFrontResponse {
    CloudFrontResponse {
        status: "404".to_string(),
        status_description: "Not found".to_string(),
        headers: None,
        body: Some(NOT_FOUND_BODY.to_string()),
    }
}

pub fn redirect_response(location: String, max_age: u64) -> CloudFrontResponse {
    let mut headers = CloudFrontHeaders::new();
    headers.insert(
        "location".to_string(),
        vec![HeaderEntry::new("Location", location)],
    );
    headers.insert(
        "cache-control".to_string(),
        vec![HeaderEntry::new("Cache-Control", format!("max-age={}", max_age))],
    );

    CloudFrontResponse {
        status: "302".to_string(),
        status_description: "Moved temporarily".to_string(),
        headers: Some(headers),
        body: None,
    }
}
