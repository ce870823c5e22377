//! Shared type definitions for invoking the Torque orchestration platform.
//!
//! The types in this crate describe a single invocation end to end:
//!
//! - [`ActionParams`] / [`WorkflowParams`]: raw parameters as supplied by the
//!   automation engine, validated into [`ActionInvocation`] / [`WorkflowInvocation`]
//! - [`PreparedRequest`]: the fully-formed HTTP request
//! - [`ApiOutcome`]: the classified response
//! - [`ExecutionResult`]: the record handed back to the caller
//!
//! Nothing here performs I/O.

pub mod error;
pub mod outcome;
pub mod params;
pub mod request;
pub mod result;

pub use error::{InvocationError, ValidationError};
pub use outcome::{ApiOutcome, ResponseBody};
pub use params::{ActionInvocation, ActionParams, ConnectionOverrides, ResourceTarget, WorkflowInvocation, WorkflowParams};
pub use request::{ApiToken, PreparedRequest};
pub use result::{ExecutionMode, ExecutionResult, InvocationKind, InvocationSubject};

/// Environment variable consulted when no `api_token` parameter is supplied.
pub const API_TOKEN_ENV_VAR: &str = "TORQUE_API_TOKEN";

/// Environment variable consulted when no `api_url` parameter is supplied.
pub const API_URL_ENV_VAR: &str = "TORQUE_API_URL";

/// Public Torque API root used when neither parameter nor environment supply one.
pub const DEFAULT_API_URL: &str = "https://portal.qtorque.io/api";
