//! Mapping classified outcomes to caller-facing records.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use torque_types::{ApiOutcome, ExecutionMode, ExecutionResult, InvocationError, InvocationKind, InvocationSubject};
use torque_util::http::status_error_message;

/// Formats results and failures for one invocation subject.
#[derive(Debug, Clone)]
pub struct ResultReporter {
    mode: ExecutionMode,
    subject: InvocationSubject,
}

impl ResultReporter {
    pub fn new(mode: ExecutionMode, subject: InvocationSubject) -> Self {
        Self { mode, subject }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn subject(&self) -> &InvocationSubject {
        &self.subject
    }

    /// The result to return instead of calling the API, when simulating.
    pub fn simulated(&self) -> Option<ExecutionResult> {
        if self.mode != ExecutionMode::Simulate {
            return None;
        }
        let InvocationSubject { kind, target, resource } = &self.subject;
        let result = ExecutionResult::new(
            true,
            format!("Check mode: would execute {kind} '{target}' on resource '{resource}'; no API call was made"),
        )
        .with_data(Some(json!({
            "status": "check_mode",
            "message": format!("Would execute {kind} in normal mode"),
        })));

        Some(match kind {
            InvocationKind::Workflow => result.with_outputs(IndexMap::new()),
            InvocationKind::Action => result,
        })
    }

    /// Success record for a 2xx outcome.
    ///
    /// Workflow responses carrying a non-empty `outputs` object have it lifted
    /// into [`ExecutionResult::outputs`].
    pub fn report(&self, outcome: ApiOutcome) -> ExecutionResult {
        let InvocationSubject { kind, target, resource } = &self.subject;
        let outputs = match kind {
            InvocationKind::Workflow => extract_outputs(outcome.body.as_json()),
            InvocationKind::Action => None,
        };

        let result = ExecutionResult::new(true, format!("Successfully executed {kind} '{target}' on resource '{resource}'"))
            .with_data(outcome.body.into_value());
        match outputs {
            Some(outputs) => result.with_outputs(outputs),
            None => result,
        }
    }

    /// Terminal failure for an error raised after parameters were validated.
    pub fn fail(&self, error: InvocationError) -> InvocationFailure {
        if error.is_local() {
            return InvocationFailure::from(error);
        }
        let InvocationSubject { kind, target, resource } = &self.subject;
        let mut message = format!("Failed to execute {kind} '{target}' on resource '{resource}': {error}");
        if let Some(hint) = error.status_code().and_then(status_error_message) {
            message.push_str(". ");
            message.push_str(&hint);
        }
        InvocationFailure { message, error }
    }
}

fn extract_outputs(body: Option<&Value>) -> Option<IndexMap<String, Value>> {
    let outputs = body?.get("outputs")?.as_object()?;
    if outputs.is_empty() {
        return None;
    }
    Some(outputs.iter().map(|(key, value)| (key.clone(), value.clone())).collect())
}

/// A failed invocation as surfaced to the caller.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct InvocationFailure {
    pub message: String,
    #[source]
    pub error: InvocationError,
}

impl From<InvocationError> for InvocationFailure {
    fn from(error: InvocationError) -> Self {
        Self {
            message: error.to_string(),
            error,
        }
    }
}

impl InvocationFailure {
    pub fn report(&self) -> FailureReport {
        FailureReport {
            failed: true,
            message: self.message.clone(),
            error: self.error.to_string(),
            status_code: self.error.status_code(),
            body: self.error.body().map(str::to_string),
        }
    }
}

/// Serialized form of any terminal failure handed back to the automation engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureReport {
    pub failed: bool,
    pub message: String,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl FailureReport {
    /// Report for failures that carry no HTTP details, such as export errors.
    pub fn plain(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            failed: true,
            error: message.clone(),
            message,
            status_code: None,
            body: None,
        }
    }
}
