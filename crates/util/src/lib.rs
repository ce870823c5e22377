pub mod async_runtime;
pub mod http;
pub mod path;
pub mod timestamps;

pub use async_runtime::block_on_future;
pub use path::{encode_path_segment, join_encoded_path};
pub use timestamps::{environment_timestamp, instantiation_timestamp, next_unique_timestamp};

use once_cell::sync::Lazy;
use regex::Regex;

static REDACTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(authorization: )([\w\-\.=:/+]+(?: [\w\-\.=:/+]+)?)",
        r"(?i)(bearer )([\w\-\.=:/+]+)",
        r"(?i)([A-Z0-9_]*?(KEY|TOKEN|SECRET|PASSWORD)=)([^\s]+)",
        r#"(?i)("(?:api_token|token|password|secret)"\s*:\s*)("[^"]*")"#,
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("redaction pattern compiles"))
    .collect()
});

/// Redacts values that look like secrets in a string.
pub fn redact_sensitive(input: &str) -> String {
    let mut redacted = input.to_string();
    for pattern in REDACTION_PATTERNS.iter() {
        redacted = pattern
            .replace_all(&redacted, |caps: &regex::Captures| {
                let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                format!("{}<redacted>", prefix)
            })
            .to_string();
    }
    redacted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_bearer_tokens_and_env_assignments() {
        let line = "Authorization: Bearer abc.def-123 TORQUE_API_TOKEN=xyz";
        let redacted = redact_sensitive(line);
        assert!(!redacted.contains("abc.def-123"));
        assert!(!redacted.contains("xyz"));
        assert!(redacted.contains("TORQUE_API_TOKEN=<redacted>"));
    }

    #[test]
    fn redacts_json_token_fields() {
        let body = r#"{"api_token": "s3cr3t", "space": "demo"}"#;
        let redacted = redact_sensitive(body);
        assert!(!redacted.contains("s3cr3t"));
        assert!(redacted.contains(r#""space": "demo""#));
    }

    #[test]
    fn leaves_plain_text_untouched() {
        assert_eq!(redact_sensitive("environment not found"), "environment not found");
    }
}
