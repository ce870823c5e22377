//! Merging args files with command-line flags into typed parameter sets.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use torque_types::{ActionParams, WorkflowParams};
use tracing::debug;

use crate::cli::{ActionArgs, ExportArgs, TargetArgs, WorkflowArgs};

/// Contents accepted by `export-outputs --args-file`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExportFile {
    #[serde(default)]
    outputs: IndexMap<String, Value>,
}

/// Load a JSON or YAML mapping; YAML parsing accepts JSON as well.
pub fn load_args_file<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    let Some(path) = path else {
        return Ok(T::default());
    };
    let content = fs::read_to_string(path).with_context(|| format!("read args file {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    debug!(path = %path.display(), "loaded args file");
    serde_yaml::from_str(&content).with_context(|| format!("parse args file {}", path.display()))
}

pub fn action_params(args: ActionArgs) -> Result<ActionParams> {
    let file: ActionParams = load_args_file(args.target.args_file.as_deref())?;
    let TargetArgs {
        space,
        environment,
        grain_fullname,
        resource,
        api_token,
        api_url,
        ..
    } = args.target;
    Ok(file.overlay(ActionParams {
        space,
        environment,
        grain_fullname,
        resource,
        action: args.action,
        api_token,
        api_url,
    }))
}

pub fn workflow_params(args: WorkflowArgs) -> Result<WorkflowParams> {
    let file: WorkflowParams = load_args_file(args.target.args_file.as_deref())?;
    let TargetArgs {
        space,
        environment,
        grain_fullname,
        resource,
        api_token,
        api_url,
        ..
    } = args.target;
    let inputs = (!args.inputs.is_empty()).then(|| args.inputs.into_iter().collect());
    Ok(file.overlay(WorkflowParams {
        space,
        environment,
        grain_fullname,
        resource,
        workflow_name: args.workflow_name,
        repository_name: args.repository_name,
        inputs,
        owner_email: args.owner_email,
        execution_name: args.execution_name,
        api_token,
        api_url,
    }))
}

/// File outputs first, then `--output` flags, replacing keys in place.
pub fn export_outputs(args: ExportArgs) -> Result<IndexMap<String, Value>> {
    let file: ExportFile = load_args_file(args.args_file.as_deref())?;
    let mut outputs = file.outputs;
    outputs.extend(args.outputs);
    Ok(outputs)
}
