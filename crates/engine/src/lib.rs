//! # Torque Engine
//!
//! The Torque Engine turns playbook parameters into a single Torque API call
//! and a structured result, and writes the outputs document the platform reads
//! back after a run.
//!
//! ## Key Features
//!
//! - **Request building**: validation that names every missing field, ordered
//!   credential and base-URL resolution, percent-encoded paths
//! - **Invocation**: at most one POST through an [`ApiInvoker`], skipped
//!   entirely in check mode
//! - **Reporting**: success, simulation and failure records for the caller
//! - **Outputs export**: deterministic `torque-outputs.json` writes
//!
//! ## Usage
//!
//! ```rust,no_run
//! use torque_api::{DEFAULT_TIMEOUT, TorqueClient, process_env};
//! use torque_engine::execute_action;
//! use torque_types::{ActionParams, ExecutionMode};
//!
//! let params = ActionParams {
//!     space: Some("my-space".into()),
//!     environment: Some("env-123".into()),
//!     grain_fullname: Some("web-grain".into()),
//!     resource: Some("aws_instance.web_1".into()),
//!     action: Some("restart-service".into()),
//!     ..ActionParams::default()
//! };
//! let client = TorqueClient::new(DEFAULT_TIMEOUT)?;
//! let result = execute_action(&params, ExecutionMode::Execute, process_env, &client)?;
//! println!("{}", result.message);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - **`request_builder`**: parameters to [`torque_types::PreparedRequest`]
//! - **`reporter`**: outcomes and errors to results and failure reports
//! - **`runner`**: wiring of the two around an [`ApiInvoker`]
//! - **`outputs`**: the outputs file writer, independent of the others

pub mod outputs;
pub mod reporter;
pub mod request_builder;
pub mod runner;

pub use outputs::{ExportError, OUTPUTS_FILE_NAME, export_outputs, export_outputs_to, render_outputs};
pub use reporter::{FailureReport, InvocationFailure, ResultReporter};
pub use request_builder::{BuiltRequest, build_action_request, build_workflow_request, synthesize_execution_name};
pub use runner::{execute_action, execute_workflow, run_invocation};
pub use torque_api::ApiInvoker;
