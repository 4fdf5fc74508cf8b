//! Path shape checks and index URI construction.
//!
//! # Design Decisions
//! - Plain substring scans, no regex in the request path
//! - Only the exact `/latest/` segment triggers resolution; `foollatestbar` does not
//! - The routing prefix is a fixed `/ci/` plus three characters, nothing is guessed
//!   for other shapes

/// Marker that every servable artifact path contains.
pub const ROUTE_MARKER: &str = "/ci/dbc/";

/// Segment that asks for the newest build.
pub const LATEST_SEGMENT: &str = "/latest/";

const LATEST_PREFIX: &str = "/latest";
const ROUTING_PREFIX: &str = "/ci/";
const ROUTING_ID_LEN: usize = 3;
const PLATFORM_PIECES: usize = 4;

pub fn is_routed(uri: &str) -> bool {
    uri.contains(ROUTE_MARKER)
}

pub fn has_latest_segment(uri: &str) -> bool {
    uri.contains(LATEST_SEGMENT)
}

/// Platform suffix that follows `/latest`, e.g. `/linux/x64/tar`.
///
/// Takes the text between the first and second `/latest` occurrences and keeps
/// its first four `/`-separated pieces. The leading piece is empty, so at most
/// three platform segments survive.
pub fn platform_suffix(uri: &str) -> String {
    let after = uri.split(LATEST_PREFIX).nth(1).unwrap_or("");
    after
        .split('/')
        .take(PLATFORM_PIECES)
        .collect::<Vec<_>>()
        .join("/")
}

/// Everything before the first `/latest/` segment.
fn before_latest(uri: &str) -> Option<&str> {
    uri.find(LATEST_SEGMENT).map(|idx| &uri[..idx])
}

/// Per-platform index: `<version path>/index<platform suffix>/index.json`.
pub fn narrow_index_uri(uri: &str) -> Option<String> {
    let base = before_latest(uri)?;
    Some(format!("{}/index{}/index.json", base, platform_suffix(uri)))
}

/// Per-version index: `<version path>/index.json`.
pub fn broad_index_uri(uri: &str) -> Option<String> {
    let base = before_latest(uri)?;
    Some(format!("{}/index.json", base))
}

/// Original URI with the first `/latest/` replaced by `/<version>/`.
pub fn redirect_location(uri: &str, version: &str) -> String {
    uri.replacen(LATEST_SEGMENT, &format!("/{}/", version), 1)
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Drop the `/ci/<3 chars>/` routing prefix, keeping the slash.
///
/// URIs without exactly that shape come back unchanged.
pub fn strip_routing_prefix(uri: &str) -> String {
    let Some(rest) = uri.strip_prefix(ROUTING_PREFIX) else {
        return uri.to_string();
    };

    let mut chars = rest.char_indices();
    for _ in 0..ROUTING_ID_LEN {
        match chars.next() {
            Some((_, c)) if !is_line_terminator(c) => {}
            _ => return uri.to_string(),
        }
    }

    match chars.next() {
        Some((idx, '/')) => rest[idx..].to_string(),
        _ => uri.to_string(),
    }
}
