use std::fmt;

use serde_json::Value;
use url::Url;

/// Bearer credential for the Torque API. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

/// A fully-formed POST request ready for the invoker.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub url: Url,
    pub token: ApiToken,
    pub body: Value,
}

impl PreparedRequest {
    /// Headers sent with every Torque API call.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Authorization", format!("Bearer {}", self.token.expose())),
            ("Content-Type", "application/json".to_string()),
            ("Accept", "application/json".to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn debug_output_hides_token() {
        let request = PreparedRequest {
            url: Url::parse("https://portal.qtorque.io/api/spaces/demo/environments").unwrap(),
            token: ApiToken::new("super-secret-token"),
            body: json!({}),
        };
        let rendered = format!("{request:?}");
        assert!(!rendered.contains("super-secret-token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn headers_carry_bearer_token_and_json_content_type() {
        let request = PreparedRequest {
            url: Url::parse("https://portal.qtorque.io/api").unwrap(),
            token: ApiToken::new("abc"),
            body: json!({}),
        };
        let headers = request.headers();
        assert!(headers.contains(&("Authorization", "Bearer abc".to_string())));
        assert!(headers.contains(&("Content-Type", "application/json".to_string())));
    }
}
