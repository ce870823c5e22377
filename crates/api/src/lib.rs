//! Torque API client utilities.
//!
//! This crate provides a lightweight client for the Torque REST API.
//! It focuses on:
//!
//! - Constructing an HTTP client with a bounded timeout
//! - Resolving credentials from the `api_token` parameter or `TORQUE_API_TOKEN`
//! - Validating the API base URL for safety
//! - Sending exactly one request per invocation and classifying the response
//!
//! The primary entry point is [`TorqueClient`], which implements [`ApiInvoker`].
//!
//! # Example
//!
//! ```ignore
//! use torque_api::{ApiInvoker, TorqueClient, DEFAULT_TIMEOUT};
//!
//! let client = TorqueClient::new(DEFAULT_TIMEOUT)?;
//! let outcome = client.invoke(&prepared_request)?;
//! println!("status: {}", outcome.status_code);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod credentials;
pub mod invoker;

pub use credentials::{process_env, resolve_api_token, resolve_base_url};
pub use invoker::{ApiInvoker, classify_response};

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Url, header};
use torque_types::{PreparedRequest, ValidationError};
use tracing::debug;

/// Request timeout applied when the caller does not configure one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Hostnames allowed for local development regardless of scheme.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1", "[::1]"];

#[derive(Debug, Clone)]
/// Thin wrapper around a configured `reqwest::Client` for Torque API access.
///
/// The client carries no credentials of its own; each [`PreparedRequest`]
/// brings its bearer token and headers.
pub struct TorqueClient {
    pub http: Client,
    pub user_agent: String,
    pub timeout: Duration,
}

impl TorqueClient {
    /// Construct a [`TorqueClient`] whose requests fail after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build().context("build http client")?;

        Ok(Self {
            http,
            user_agent: format!("torque-collections/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
            timeout,
        })
    }

    /// Build a `reqwest::RequestBuilder` for a prepared POST.
    ///
    /// The resulting request carries the prepared headers, the configured
    /// User-Agent, and the JSON body.
    pub fn request(&self, prepared: &PreparedRequest) -> RequestBuilder {
        debug!(url = %prepared.url, "building request");

        let mut builder = self
            .http
            .post(prepared.url.clone())
            .header(header::USER_AGENT, &self.user_agent);
        for (name, value) in prepared.headers() {
            builder = builder.header(name, value);
        }
        // `json` keeps the Content-Type already set above.
        builder.json(&prepared.body)
    }
}

/// Validate that a base URL is acceptable for use by the client.
///
/// Rules:
/// - scheme must be `http` or `https`
/// - `localhost`, `127.0.0.1` or `[::1]`: either scheme is allowed
/// - otherwise: scheme must be HTTPS
pub fn validate_base_url(base: &str) -> Result<Url, ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidParameter {
        name: "api_url".to_string(),
        reason,
    };

    let parsed_base_url = Url::parse(base).map_err(|e| invalid(format!("'{}' is not a valid URL: {}", base, e)))?;

    let scheme = parsed_base_url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(invalid(format!("unsupported scheme '{}://'", scheme)));
    }

    let host_name = parsed_base_url
        .host_str()
        .ok_or_else(|| invalid("URL must include a host".to_string()))?;

    if LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
    {
        return Ok(parsed_base_url);
    }

    if scheme != "https" {
        return Err(invalid(format!("must use https for non-localhost hosts; got '{}://'", scheme)));
    }

    Ok(parsed_base_url)
}
