//! Typed parameter sets for each invocation kind.
//!
//! Parameters arrive with every field optional, mirroring how the automation
//! engine passes module arguments. [`ActionParams::validate`] and
//! [`WorkflowParams::validate`] turn them into invocation structs whose
//! required fields are guaranteed non-empty.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ValidationError;

/// Connection settings shared by both invocation kinds; resolved later against the environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionOverrides<'a> {
    pub api_token: Option<&'a str>,
    pub api_url: Option<&'a str>,
}

/// Parameters for triggering a predefined action on a resource.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionParams {
    pub space: Option<String>,
    pub environment: Option<String>,
    pub grain_fullname: Option<String>,
    pub resource: Option<String>,
    pub action: Option<String>,
    pub api_token: Option<String>,
    pub api_url: Option<String>,
}

/// Parameters for launching a workflow against a resource.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowParams {
    pub space: Option<String>,
    pub environment: Option<String>,
    pub grain_fullname: Option<String>,
    pub resource: Option<String>,
    pub workflow_name: Option<String>,
    pub repository_name: Option<String>,
    pub inputs: Option<IndexMap<String, Value>>,
    pub owner_email: Option<String>,
    pub execution_name: Option<String>,
    pub api_token: Option<String>,
    pub api_url: Option<String>,
}

/// Identifies a resource inside a grain of a deployed environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTarget {
    pub space: String,
    pub environment_id: String,
    pub grain_path: String,
    pub resource_id: String,
}

/// A validated action invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInvocation {
    pub target: ResourceTarget,
    pub action_id: String,
}

/// A validated workflow invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowInvocation {
    pub target: ResourceTarget,
    pub workflow_name: String,
    pub repository_name: String,
    pub owner_email: String,
    pub inputs: IndexMap<String, Value>,
    /// Caller-chosen execution name; synthesized at build time when absent.
    pub execution_name: Option<String>,
}

impl ActionParams {
    /// Validate required fields, reporting every missing one at once.
    pub fn validate(&self) -> Result<ActionInvocation, ValidationError> {
        let mut fields = RequiredFields::default();
        let target = fields.target(&self.space, &self.environment, &self.grain_fullname, &self.resource);
        let action_id = fields.require("action", &self.action);
        fields.finish()?;
        Ok(ActionInvocation { target, action_id })
    }

    pub fn connection(&self) -> ConnectionOverrides<'_> {
        ConnectionOverrides {
            api_token: self.api_token.as_deref(),
            api_url: self.api_url.as_deref(),
        }
    }

    /// Layer `overrides` on top of `self`; any field set in `overrides` wins.
    pub fn overlay(self, overrides: ActionParams) -> ActionParams {
        ActionParams {
            space: overrides.space.or(self.space),
            environment: overrides.environment.or(self.environment),
            grain_fullname: overrides.grain_fullname.or(self.grain_fullname),
            resource: overrides.resource.or(self.resource),
            action: overrides.action.or(self.action),
            api_token: overrides.api_token.or(self.api_token),
            api_url: overrides.api_url.or(self.api_url),
        }
    }
}

impl WorkflowParams {
    /// Validate required fields, reporting every missing one at once.
    ///
    /// `inputs` defaults to an empty mapping and a blank `execution_name` is
    /// treated as absent.
    pub fn validate(&self) -> Result<WorkflowInvocation, ValidationError> {
        let mut fields = RequiredFields::default();
        let target = fields.target(&self.space, &self.environment, &self.grain_fullname, &self.resource);
        let workflow_name = fields.require("workflow_name", &self.workflow_name);
        let repository_name = fields.require("repository_name", &self.repository_name);
        let owner_email = fields.require("owner_email", &self.owner_email);
        fields.finish()?;

        let execution_name = self
            .execution_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        Ok(WorkflowInvocation {
            target,
            workflow_name,
            repository_name,
            owner_email,
            inputs: self.inputs.clone().unwrap_or_default(),
            execution_name,
        })
    }

    pub fn connection(&self) -> ConnectionOverrides<'_> {
        ConnectionOverrides {
            api_token: self.api_token.as_deref(),
            api_url: self.api_url.as_deref(),
        }
    }

    /// Layer `overrides` on top of `self`. Scalar fields in `overrides` win;
    /// input maps are merged with `overrides` replacing matching keys.
    pub fn overlay(self, overrides: WorkflowParams) -> WorkflowParams {
        let inputs = match (self.inputs, overrides.inputs) {
            (Some(mut base), Some(extra)) => {
                base.extend(extra);
                Some(base)
            }
            (base, extra) => extra.or(base),
        };
        WorkflowParams {
            space: overrides.space.or(self.space),
            environment: overrides.environment.or(self.environment),
            grain_fullname: overrides.grain_fullname.or(self.grain_fullname),
            resource: overrides.resource.or(self.resource),
            workflow_name: overrides.workflow_name.or(self.workflow_name),
            repository_name: overrides.repository_name.or(self.repository_name),
            inputs,
            owner_email: overrides.owner_email.or(self.owner_email),
            execution_name: overrides.execution_name.or(self.execution_name),
            api_token: overrides.api_token.or(self.api_token),
            api_url: overrides.api_url.or(self.api_url),
        }
    }
}

#[derive(Default)]
struct RequiredFields {
    missing: Vec<String>,
}

impl RequiredFields {
    fn require(&mut self, name: &str, value: &Option<String>) -> String {
        match value.as_deref().map(str::trim).filter(|text| !text.is_empty()) {
            Some(text) => text.to_string(),
            None => {
                self.missing.push(name.to_string());
                String::new()
            }
        }
    }

    fn target(
        &mut self,
        space: &Option<String>,
        environment: &Option<String>,
        grain_fullname: &Option<String>,
        resource: &Option<String>,
    ) -> ResourceTarget {
        ResourceTarget {
            space: self.require("space", space),
            environment_id: self.require("environment", environment),
            grain_path: self.require("grain_fullname", grain_fullname),
            resource_id: self.require("resource", resource),
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingParameters { names: self.missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn action_params() -> ActionParams {
        ActionParams {
            space: Some("03-Live".into()),
            environment: Some("tuF7LfdwbCs4".into()),
            grain_fullname: Some("elk-2".into()),
            resource: Some("aws_instance.elk_2".into()),
            action: Some("aws-power-on-ec2-tf".into()),
            ..ActionParams::default()
        }
    }

    fn workflow_params() -> WorkflowParams {
        WorkflowParams {
            space: Some("03-Live".into()),
            environment: Some("Rr0LgPNF2j2C".into()),
            grain_fullname: Some("vcenter-win2012-template".into()),
            resource: Some("vsphere_virtual_machine.win-vm".into()),
            workflow_name: Some("vcenter-vm-power-on".into()),
            repository_name: Some("ProductionBPs".into()),
            owner_email: Some("admin@example.com".into()),
            ..WorkflowParams::default()
        }
    }

    #[test]
    fn action_validation_accepts_complete_params() {
        let invocation = action_params().validate().expect("valid params");
        assert_eq!(invocation.target.space, "03-Live");
        assert_eq!(invocation.target.grain_path, "elk-2");
        assert_eq!(invocation.action_id, "aws-power-on-ec2-tf");
    }

    #[test]
    fn action_validation_reports_all_missing_fields() {
        let params = ActionParams {
            space: Some("   ".into()),
            resource: None,
            ..action_params()
        };
        let error = params.validate().expect_err("space and resource are missing");
        assert_eq!(
            error,
            ValidationError::MissingParameters {
                names: vec!["space".into(), "resource".into()]
            }
        );
    }

    #[test]
    fn workflow_validation_defaults_inputs_and_blank_execution_name() {
        let params = WorkflowParams {
            execution_name: Some("".into()),
            ..workflow_params()
        };
        let invocation = params.validate().expect("valid params");
        assert!(invocation.inputs.is_empty());
        assert_eq!(invocation.execution_name, None);
    }

    #[test]
    fn workflow_validation_requires_owner_and_repository() {
        let params = WorkflowParams {
            repository_name: None,
            owner_email: None,
            ..workflow_params()
        };
        let error = params.validate().expect_err("missing fields");
        assert_eq!(error.to_string(), "missing required parameter(s): repository_name, owner_email");
    }

    #[test]
    fn args_file_shape_deserializes_and_rejects_unknown_keys() {
        let yaml = r#"
space: production
environment: env_12345
grain_fullname: web-server
resource: aws_instance.web_1
workflow_name: server-maintenance
repository_name: MaintenanceBPs
owner_email: devops@example.com
inputs:
  vm_name: test-vm
  cpu_count: 2
"#;
        let params: WorkflowParams = serde_yaml::from_str(yaml).expect("parse workflow params");
        let inputs = params.inputs.expect("inputs present");
        assert_eq!(inputs.keys().collect::<Vec<_>>(), vec!["vm_name", "cpu_count"]);
        assert_eq!(inputs["cpu_count"], json!(2));

        let unknown = serde_yaml::from_str::<ActionParams>("space: a\nflavor: b\n");
        assert!(unknown.is_err(), "unknown keys should be rejected");
    }

    #[test]
    fn overlay_prefers_overrides_and_merges_inputs() {
        let base = WorkflowParams {
            inputs: Some(IndexMap::from([("a".to_string(), json!(1)), ("b".to_string(), json!(2))])),
            api_token: Some("from-file".into()),
            ..workflow_params()
        };
        let overrides = WorkflowParams {
            space: Some("staging".into()),
            inputs: Some(IndexMap::from([("b".to_string(), json!(3))])),
            ..WorkflowParams::default()
        };

        let merged = base.overlay(overrides);
        assert_eq!(merged.space.as_deref(), Some("staging"));
        assert_eq!(merged.environment.as_deref(), Some("Rr0LgPNF2j2C"));
        assert_eq!(merged.api_token.as_deref(), Some("from-file"));
        let inputs = merged.inputs.expect("inputs merged");
        assert_eq!(inputs["a"], json!(1));
        assert_eq!(inputs["b"], json!(3));
    }
}
