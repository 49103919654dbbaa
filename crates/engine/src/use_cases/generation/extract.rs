//! JSON recovery from raw completions.
//!
//! The model is told not to wrap its output, but it sometimes does anyway.
//! A direct parse is attempted first; failing that, the substring between
//! the first `{` and the last `}` is tried. This is a best-effort
//! heuristic, not a general JSON-in-text parser: multiple top-level
//! objects or unbalanced interior braces are out of scope.

use serde_json::Value;

/// Recovers a JSON value from completion text, or None when nothing
/// parsable is found.
pub fn extract_json(raw: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(raw) {
        return Some(value);
    }

    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&raw[start..=end]).ok()
}
