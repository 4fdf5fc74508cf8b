//! Version index documents.

use serde_json::Value;

/// The part of an `index.json` the rewriter cares about.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionIndex {
    /// Usable `latest` value rendered as a path segment.
    pub latest: Option<String>,
}

impl VersionIndex {
    /// Read `latest` from any JSON value.
    ///
    /// Only a non-empty string, a non-zero number, or `true` counts. Everything
    /// else (missing, null, false, "", 0, arrays, objects, non-object documents)
    /// leaves `latest` empty.
    pub fn from_json(doc: &Value) -> Self {
        let latest = match doc.get("latest") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
            Some(Value::Bool(true)) => Some("true".to_string()),
            _ => None,
        };
        Self { latest }
    }
}
