//! Invocation runner: build, send at most once, report.

use torque_api::ApiInvoker;
use torque_types::{ActionParams, ExecutionMode, ExecutionResult, PreparedRequest, WorkflowParams};
use tracing::{debug, info, warn};

use crate::reporter::{InvocationFailure, ResultReporter};
use crate::request_builder::{BuiltRequest, build_action_request, build_workflow_request};

/// Run one prepared request through `invoker` unless the reporter is simulating.
pub fn run_invocation<I>(request: &PreparedRequest, reporter: &ResultReporter, invoker: &I) -> Result<ExecutionResult, InvocationFailure>
where
    I: ApiInvoker + ?Sized,
{
    let subject = reporter.subject();
    if let Some(result) = reporter.simulated() {
        info!(kind = %subject.kind, target = %subject.target, "check mode, skipping api call");
        return Ok(result);
    }

    match invoker.invoke(request) {
        Ok(outcome) => {
            info!(
                kind = %subject.kind,
                target = %subject.target,
                resource = %subject.resource,
                status = outcome.status_code,
                "invocation succeeded"
            );
            Ok(reporter.report(outcome))
        }
        Err(error) => {
            warn!(kind = %subject.kind, target = %subject.target, error = %error, "invocation failed");
            Err(reporter.fail(error))
        }
    }
}

/// Trigger an action on a resource.
pub fn execute_action<E, I>(params: &ActionParams, mode: ExecutionMode, env: E, invoker: &I) -> Result<ExecutionResult, InvocationFailure>
where
    E: Fn(&str) -> Option<String>,
    I: ApiInvoker + ?Sized,
{
    let built = build_action_request(params, env).map_err(InvocationFailure::from)?;
    dispatch(built, mode, invoker)
}

/// Launch a workflow against a resource.
pub fn execute_workflow<E, I>(params: &WorkflowParams, mode: ExecutionMode, env: E, invoker: &I) -> Result<ExecutionResult, InvocationFailure>
where
    E: Fn(&str) -> Option<String>,
    I: ApiInvoker + ?Sized,
{
    let built = build_workflow_request(params, env).map_err(InvocationFailure::from)?;
    dispatch(built, mode, invoker)
}

fn dispatch<I>(built: BuiltRequest, mode: ExecutionMode, invoker: &I) -> Result<ExecutionResult, InvocationFailure>
where
    I: ApiInvoker + ?Sized,
{
    debug!(url = %built.request.url, ?mode, "dispatching invocation");
    let reporter = ResultReporter::new(mode, built.subject);
    run_invocation(&built.request, &reporter, invoker)
}
