//! Sending a prepared request and classifying the response.
//!
//! One call to [`ApiInvoker::invoke`] performs exactly one HTTP POST. There is
//! no retry, pagination, or follow-up request.

use std::error::Error as StdError;
use std::time::Instant;

use torque_types::{ApiOutcome, InvocationError, PreparedRequest};
use torque_util::http::{parse_response_body, server_message, truncate_response_preview};
use torque_util::{block_on_future, redact_sensitive};
use tracing::{debug, warn};

use crate::TorqueClient;

/// Execute a single prepared request.
///
/// Implementations other than [`TorqueClient`] exist for tests and previews.
pub trait ApiInvoker {
    /// Send `request` and classify the response by status code.
    fn invoke(&self, request: &PreparedRequest) -> Result<ApiOutcome, InvocationError>;
}

impl ApiInvoker for TorqueClient {
    fn invoke(&self, request: &PreparedRequest) -> Result<ApiOutcome, InvocationError> {
        let start = Instant::now();
        let url = request.url.clone();
        debug!(url = %url, timeout_ms = self.timeout.as_millis(), "torque api request started");

        let builder = self.request(request);
        let exchange = block_on_future(async move {
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, text))
        })
        .map_err(|error| InvocationError::Connection {
            message: format!("could not start the async runtime: {error}"),
            timed_out: false,
        })?;

        let (status, text) = exchange.map_err(|error| {
            warn!(
                url = %url,
                timed_out = error.is_timeout(),
                duration_ms = start.elapsed().as_millis(),
                error = %error,
                "torque api request could not be completed"
            );
            InvocationError::Connection {
                message: describe_transport_error(&error),
                timed_out: error.is_timeout(),
            }
        })?;

        debug!(
            url = %url,
            status,
            body_len = text.len(),
            duration_ms = start.elapsed().as_millis(),
            "torque api response received"
        );
        classify_response(status, text)
    }
}

/// Classify a received response.
///
/// - 2xx: success, body parsed as JSON when possible
/// - 4xx: [`InvocationError::Client`]
/// - 5xx: [`InvocationError::Server`]
/// - anything else: [`InvocationError::UnexpectedStatus`]
///
/// Failure variants keep the body verbatim.
pub fn classify_response(status: u16, body: String) -> Result<ApiOutcome, InvocationError> {
    if (200..300).contains(&status) {
        return Ok(ApiOutcome::success(status, parse_response_body(&body)));
    }

    warn!(
        status,
        server_message = server_message(&body).as_deref(),
        body_preview = %redact_sensitive(&truncate_response_preview(&body, 200)),
        "torque api request failed"
    );
    Err(match status {
        400..=499 => InvocationError::Client { status, body },
        500..=599 => InvocationError::Server { status, body },
        _ => InvocationError::UnexpectedStatus { status, body },
    })
}

fn describe_transport_error(error: &reqwest::Error) -> String {
    let mut message = if error.is_timeout() {
        format!("request timed out: {error}")
    } else {
        error.to_string()
    };
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
