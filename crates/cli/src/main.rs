mod args_file;
mod cli;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use torque_api::{TorqueClient, process_env};
use torque_engine::{FailureReport, export_outputs, execute_action, execute_workflow};
use torque_types::{ExecutionMode, ExecutionResult};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(Ok(result)) => emit(&result),
        Ok(Err(report)) => {
            let _ = emit(&report);
            ExitCode::FAILURE
        }
        Err(err) => {
            error!(error = %format!("{err:#}"), "torque command failed");
            let _ = emit(&FailureReport::plain(format!("{err:#}")));
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout carries only the result document.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Outer `Err` is CLI plumbing (args files, client setup); inner `Err` is a reported failure.
fn run(cli: Cli) -> Result<Result<ExecutionResult, FailureReport>> {
    let mode = if cli.check {
        ExecutionMode::Simulate
    } else {
        ExecutionMode::Execute
    };
    debug!(?mode, timeout_secs = cli.timeout, "starting torque command");

    match cli.command {
        Commands::ExecuteAction(args) => {
            let params = args_file::action_params(args)?;
            let client = build_client(cli.timeout)?;
            Ok(execute_action(&params, mode, process_env, &client).map_err(|failure| failure.report()))
        }
        Commands::ExecuteWorkflow(args) => {
            let params = args_file::workflow_params(args)?;
            let client = build_client(cli.timeout)?;
            Ok(execute_workflow(&params, mode, process_env, &client).map_err(|failure| failure.report()))
        }
        Commands::ExportOutputs(args) => {
            let outputs = args_file::export_outputs(args)?;
            Ok(export_outputs(&outputs, mode).map_err(|err| FailureReport::plain(err.to_string())))
        }
    }
}

fn build_client(timeout_secs: u64) -> Result<TorqueClient> {
    TorqueClient::new(Duration::from_secs(timeout_secs)).context("create torque api client")
}

fn emit<T: Serialize>(document: &T) -> ExitCode {
    match serde_json::to_string_pretty(document) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "could not serialize result");
            ExitCode::FAILURE
        }
    }
}
