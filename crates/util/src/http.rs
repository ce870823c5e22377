//! # HTTP Utilities
//!
//! Helpers for interpreting Torque API responses: body parsing, server error
//! message extraction, and user-facing hints for common status codes.

use serde_json::Value;
use torque_types::ResponseBody;

/// Return a user-friendly hint for common HTTP status codes.
///
/// # Example
/// ```rust
/// use torque_util::http::status_error_message;
///
/// let error_401 = status_error_message(401).unwrap();
/// assert!(error_401.contains("TORQUE_API_TOKEN"));
/// assert!(error_401.contains("Unauthorized"));
///
/// let error_403 = status_error_message(403).unwrap();
/// assert!(error_403.contains("Forbidden"));
///
/// assert!(status_error_message(404).is_none());
/// ```
pub fn status_error_message(status_code: u16) -> Option<String> {
    match status_code {
        401 => Some("Unauthorized (401). Hint: check the api_token parameter or TORQUE_API_TOKEN=...".into()),
        403 => Some("Forbidden (403). Hint: check the token's access to this space and environment".into()),
        _ => None,
    }
}

/// Parse response text into a [`ResponseBody`].
///
/// Whitespace-only bodies are [`ResponseBody::Empty`]; text that is not valid
/// JSON is preserved verbatim as [`ResponseBody::Text`].
///
/// # Example
/// ```rust
/// use torque_types::ResponseBody;
/// use torque_util::http::parse_response_body;
///
/// assert_eq!(parse_response_body("  "), ResponseBody::Empty);
/// assert!(matches!(parse_response_body(r#"{"id": "exec-1"}"#), ResponseBody::Json(_)));
/// assert_eq!(parse_response_body("queued"), ResponseBody::Text("queued".into()));
/// ```
pub fn parse_response_body(text: &str) -> ResponseBody {
    if text.trim().is_empty() {
        return ResponseBody::Empty;
    }
    match serde_json::from_str::<Value>(text) {
        Ok(value) => ResponseBody::Json(value),
        Err(_) => ResponseBody::Text(text.to_string()),
    }
}

/// Extract the server-provided `message` field from a JSON error body.
pub fn server_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

/// Collapse whitespace and cap a response body for log output.
pub fn truncate_response_preview(text: &str, limit: usize) -> String {
    if text.trim().is_empty() {
        return "<empty>".to_string();
    }

    let mut preview = String::new();
    for ch in text.chars() {
        if preview.len() >= limit {
            preview.push_str("...");
            break;
        }
        match ch {
            '\n' | '\r' | '\t' => {
                if !preview.ends_with(' ') {
                    preview.push(' ');
                }
            }
            _ => preview.push(ch),
        }
    }

    preview.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_response_body_prefers_json() {
        assert_eq!(parse_response_body(r#"{"id":"exec-1"}"#), ResponseBody::Json(json!({"id": "exec-1"})));
        assert_eq!(parse_response_body("[1,2]"), ResponseBody::Json(json!([1, 2])));
    }

    #[test]
    fn server_message_reads_message_field_only() {
        assert_eq!(server_message(r#"{"message":"Environment not found"}"#).as_deref(), Some("Environment not found"));
        assert_eq!(server_message(r#"{"error":"x"}"#), None);
        assert_eq!(server_message("<html>bad gateway</html>"), None);
    }

    #[test]
    fn preview_collapses_whitespace_and_truncates() {
        assert_eq!(truncate_response_preview("a\n\nb\tc", 50), "a b c");
        assert_eq!(truncate_response_preview("abcdefghij", 4), "abcd...");
        assert_eq!(truncate_response_preview("   ", 10), "<empty>");
    }
}
