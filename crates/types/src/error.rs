//! Error taxonomy for a single invocation.
//!
//! Every variant is terminal: nothing in this workspace retries. The host
//! automation engine decides whether to rerun the whole step.

use thiserror::Error;

/// Local parameter problems detected before any network activity.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required parameter(s): {}", .names.join(", "))]
    MissingParameters { names: Vec<String> },

    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

/// Errors surfaced while building, sending, or classifying a Torque API call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvocationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("API token must be provided either via 'api_token' parameter or 'TORQUE_API_TOKEN' environment variable")]
    Authentication,

    #[error("Error making API call: {message}")]
    Connection { message: String, timed_out: bool },

    #[error("API call failed with status {status}: {body}")]
    Client { status: u16, body: String },

    #[error("API call failed with server status {status}: {body}")]
    Server { status: u16, body: String },

    #[error("API call returned unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

impl InvocationError {
    /// HTTP status code for errors produced from a received response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Client { status, .. } | Self::Server { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body for errors produced from a received response.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Client { body, .. } | Self::Server { body, .. } | Self::UnexpectedStatus { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    /// True when the failure happened before a request could be sent.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Authentication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameters_lists_every_name() {
        let error = ValidationError::MissingParameters {
            names: vec!["space".into(), "resource".into()],
        };
        assert_eq!(error.to_string(), "missing required parameter(s): space, resource");
    }

    #[test]
    fn status_and_body_only_present_for_http_failures() {
        let client = InvocationError::Client {
            status: 404,
            body: r#"{"message":"not found"}"#.into(),
        };
        assert_eq!(client.status_code(), Some(404));
        assert_eq!(client.body(), Some(r#"{"message":"not found"}"#));
        assert!(!client.is_local());

        assert_eq!(InvocationError::Authentication.status_code(), None);
        assert!(InvocationError::Authentication.is_local());
        assert!(InvocationError::Authentication.to_string().contains("TORQUE_API_TOKEN"));
    }
}
