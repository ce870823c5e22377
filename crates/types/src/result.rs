use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// How the calling automation engine wants the invocation handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Send the request.
    #[default]
    Execute,
    /// Check/dry-run: validate and report, but never call the API.
    Simulate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationKind {
    Action,
    Workflow,
}

impl fmt::Display for InvocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action => f.write_str("action"),
            Self::Workflow => f.write_str("workflow"),
        }
    }
}

/// What is being invoked, used to phrase result and failure messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSubject {
    pub kind: InvocationKind,
    /// Action id or workflow name.
    pub target: String,
    pub resource: String,
}

impl InvocationSubject {
    pub fn action(action_id: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            kind: InvocationKind::Action,
            target: action_id.into(),
            resource: resource.into(),
        }
    }

    pub fn workflow(workflow_name: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            kind: InvocationKind::Workflow,
            target: workflow_name.into(),
            resource: resource.into(),
        }
    }
}

/// Record returned to the calling automation engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionResult {
    pub changed: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Workflow outputs lifted from the response, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<IndexMap<String, Value>>,
}

impl ExecutionResult {
    pub fn new(changed: bool, message: impl Into<String>) -> Self {
        Self {
            changed,
            message: message.into(),
            data: None,
            outputs: None,
        }
    }

    pub fn with_data(mut self, data: Option<Value>) -> Self {
        self.data = data;
        self
    }

    pub fn with_outputs(mut self, outputs: IndexMap<String, Value>) -> Self {
        self.outputs = Some(outputs);
        self
    }
}
