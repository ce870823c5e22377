//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

#[derive(Debug, Parser)]
#[command(name = "torque", about = "Trigger Torque resource actions and workflows from playbook runs", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Validate and report what would happen without calling the API or writing files
    #[arg(long, global = true)]
    pub check: bool,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Trigger a predefined action on a resource
    ExecuteAction(ActionArgs),
    /// Launch a workflow against a resource
    ExecuteWorkflow(WorkflowArgs),
    /// Write the outputs file read back by the platform
    ExportOutputs(ExportArgs),
}

/// Fields shared by both invocation kinds.
#[derive(Debug, Args)]
pub struct TargetArgs {
    /// JSON or YAML file with module parameters; flags override its values
    #[arg(long, value_name = "FILE")]
    pub args_file: Option<PathBuf>,

    #[arg(long)]
    pub space: Option<String>,

    /// Environment id
    #[arg(long)]
    pub environment: Option<String>,

    /// Grain path inside the environment
    #[arg(long)]
    pub grain_fullname: Option<String>,

    /// Resource id, e.g. aws_instance.web_1
    #[arg(long)]
    pub resource: Option<String>,

    /// Bearer token; falls back to TORQUE_API_TOKEN
    #[arg(long)]
    pub api_token: Option<String>,

    /// API base URL; falls back to TORQUE_API_URL
    #[arg(long)]
    pub api_url: Option<String>,
}

#[derive(Debug, Args)]
pub struct ActionArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Action id to run
    #[arg(long)]
    pub action: Option<String>,
}

#[derive(Debug, Args)]
pub struct WorkflowArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Workflow (blueprint) name
    #[arg(long)]
    pub workflow_name: Option<String>,

    /// Repository holding the workflow
    #[arg(long)]
    pub repository_name: Option<String>,

    #[arg(long)]
    pub owner_email: Option<String>,

    /// Execution name; generated from the workflow name when omitted
    #[arg(long)]
    pub execution_name: Option<String>,

    /// Workflow input as KEY=VALUE; VALUE is parsed as JSON when possible
    #[arg(long = "input", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub inputs: Vec<(String, Value)>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// JSON or YAML file with an `outputs` mapping; flags override its values
    #[arg(long, value_name = "FILE")]
    pub args_file: Option<PathBuf>,

    /// Output as KEY=VALUE; VALUE is parsed as JSON when possible
    #[arg(long = "output", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub outputs: Vec<(String, Value)>,
}

/// Parse `KEY=VALUE`, decoding VALUE as JSON and falling back to a plain string.
pub fn parse_key_value(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
