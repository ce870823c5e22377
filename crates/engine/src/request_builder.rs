//! Turning validated parameters into a [`PreparedRequest`].
//!
//! Building is pure apart from reading the environment accessor and the
//! monotonic clock used for synthesized names.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use torque_api::{resolve_api_token, resolve_base_url};
use torque_types::{
    ActionInvocation, ActionParams, InvocationError, InvocationSubject, PreparedRequest, ValidationError, WorkflowInvocation,
    WorkflowParams,
};
use torque_util::{environment_timestamp, instantiation_timestamp, join_encoded_path, next_unique_timestamp};
use tracing::debug;
use url::Url;

/// A request together with the subject used to phrase its result.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRequest {
    pub subject: InvocationSubject,
    pub request: PreparedRequest,
}

/// Validate action parameters and build the run-action request.
///
/// Checks run in order: required fields, base URL, then the API token, so a
/// missing token never masks a malformed parameter set.
pub fn build_action_request<E>(params: &ActionParams, env: E) -> Result<BuiltRequest, InvocationError>
where
    E: Fn(&str) -> Option<String>,
{
    let invocation = params.validate()?;
    let connection = params.connection();
    let base_url = resolve_base_url(connection.api_url, &env)?;
    let token = resolve_api_token(connection.api_token, &env)?;

    let url = action_url(&base_url, &invocation)?;
    debug!(url = %url, action = %invocation.action_id, "built action request");

    Ok(BuiltRequest {
        subject: InvocationSubject::action(&invocation.action_id, &invocation.target.resource_id),
        request: PreparedRequest {
            url,
            token,
            body: serde_json::json!({ "force": false }),
        },
    })
}

/// Validate workflow parameters and build the environment-launch request.
pub fn build_workflow_request<E>(params: &WorkflowParams, env: E) -> Result<BuiltRequest, InvocationError>
where
    E: Fn(&str) -> Option<String>,
{
    let invocation = params.validate()?;
    let connection = params.connection();
    let base_url = resolve_base_url(connection.api_url, &env)?;
    let token = resolve_api_token(connection.api_token, &env)?;

    let url = workflow_url(&base_url, &invocation.target.space)?;
    let body = workflow_body(&invocation, next_unique_timestamp())?;
    debug!(
        url = %url,
        workflow = %invocation.workflow_name,
        input_count = invocation.inputs.len(),
        "built workflow request"
    );

    Ok(BuiltRequest {
        subject: InvocationSubject::workflow(&invocation.workflow_name, &invocation.target.resource_id),
        request: PreparedRequest { url, token, body },
    })
}

/// `{base}/spaces/{space}/environments/{environment}/resources/{grain}/{resource}/actions/{action}`
pub fn action_url(base_url: &Url, invocation: &ActionInvocation) -> Result<Url, ValidationError> {
    let target = &invocation.target;
    let joined = join_encoded_path(
        base_url.as_str(),
        &[
            "spaces",
            route_segment("space", &target.space)?,
            "environments",
            route_segment("environment", &target.environment_id)?,
            "resources",
            route_segment("grain_fullname", &target.grain_path)?,
            route_segment("resource", &target.resource_id)?,
            "actions",
            route_segment("action", &invocation.action_id)?,
        ],
    );
    parse_joined(&joined)
}

/// `{base}/spaces/{space}/environments`
pub fn workflow_url(base_url: &Url, space: &str) -> Result<Url, ValidationError> {
    let joined = join_encoded_path(base_url.as_str(), &["spaces", route_segment("space", space)?, "environments"]);
    parse_joined(&joined)
}

/// URL parsing collapses `.` and `..` (encoded or not), which would reroute the request.
fn route_segment<'a>(name: &str, value: &'a str) -> Result<&'a str, ValidationError> {
    if matches!(value, "." | "..") {
        return Err(ValidationError::InvalidParameter {
            name: name.to_string(),
            reason: format!("'{value}' is not a usable path segment"),
        });
    }
    Ok(value)
}

/// `"{workflow_name}__instantiation__{timestamp}"`
pub fn synthesize_execution_name(workflow_name: &str, at: DateTime<Utc>) -> String {
    format!("{}__instantiation__{}", workflow_name, instantiation_timestamp(at))
}

#[derive(Serialize)]
struct WorkflowLaunchBody<'a> {
    environment_name: String,
    blueprint_name: &'a str,
    inputs: &'a IndexMap<String, Value>,
    source: LaunchSource<'a>,
    automation: &'static str,
    owner_email: &'a str,
    entity_metadata: EntityMetadata<'a>,
    env_references_values: IndexMap<String, Value>,
    instantiation_name: String,
}

#[derive(Serialize)]
struct LaunchSource<'a> {
    repository_name: &'a str,
}

#[derive(Serialize)]
struct EntityMetadata<'a> {
    r#type: &'static str,
    environment_id: &'a str,
    grain_path: &'a str,
    resource_id: &'a str,
}

/// JSON body launching a workflow against one resource.
///
/// `at` stamps both the generated environment name and, when the caller gave
/// none, the instantiation name.
pub fn workflow_body(invocation: &WorkflowInvocation, at: DateTime<Utc>) -> Result<Value, ValidationError> {
    let instantiation_name = invocation
        .execution_name
        .clone()
        .unwrap_or_else(|| synthesize_execution_name(&invocation.workflow_name, at));

    let body = WorkflowLaunchBody {
        environment_name: format!("{}-{}", invocation.workflow_name, environment_timestamp(at)),
        blueprint_name: &invocation.workflow_name,
        inputs: &invocation.inputs,
        source: LaunchSource {
            repository_name: &invocation.repository_name,
        },
        automation: "false",
        owner_email: &invocation.owner_email,
        entity_metadata: EntityMetadata {
            r#type: "env_resource",
            environment_id: &invocation.target.environment_id,
            grain_path: &invocation.target.grain_path,
            resource_id: &invocation.target.resource_id,
        },
        env_references_values: IndexMap::new(),
        instantiation_name,
    };

    serde_json::to_value(&body).map_err(|error| ValidationError::InvalidParameter {
        name: "inputs".to_string(),
        reason: error.to_string(),
    })
}

fn parse_joined(joined: &str) -> Result<Url, ValidationError> {
    Url::parse(joined).map_err(|error| ValidationError::InvalidParameter {
        name: "api_url".to_string(),
        reason: format!("could not build request URL '{}': {}", joined, error),
    })
}
