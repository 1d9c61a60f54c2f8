//! Validation of declared task resources

use std::collections::HashSet;

use tracing::debug;

use crate::declaration::{TaskResource, TaskResources};
use crate::resource_type::ResourceType;
use crate::task::TaskSpec;

/// Errors in a task's resource declarations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A declaration has no name
    #[error("Invalid resource declaration: {field} - name cannot be empty")]
    EmptyName { field: String },

    /// Two sibling declarations share a name
    #[error("Invalid resource declaration: {field} - duplicate resource name '{name}'")]
    DuplicateResourceName { field: String, name: String },

    /// An output uses a type that cannot be produced
    #[error("Invalid resource declaration: {field} - type '{resource_type}' is not allowed as an output")]
    InvalidOutputType {
        field: String,
        resource_type: ResourceType,
    },
}

/// Validate a task's input and output declarations.
///
/// Names must be non-empty and unique within the inputs and, separately,
/// within the outputs. Outputs must use an output-legal type.
pub fn validate_task_resources(resources: &TaskResources) -> Result<(), ValidationError> {
    debug!(
        inputs = resources.inputs.len(),
        outputs = resources.outputs.len(),
        "validating task resources"
    );
    validate_names(&resources.inputs, "resources.inputs")?;
    validate_names(&resources.outputs, "resources.outputs")?;

    for (i, output) in resources.outputs.iter().enumerate() {
        if !output.resource_type.is_output_allowed() {
            return Err(ValidationError::InvalidOutputType {
                field: format!("resources.outputs[{}].type", i),
                resource_type: output.resource_type,
            });
        }
    }

    Ok(())
}

/// Validate the resources declared on a task spec, if any
pub fn validate_task_spec(spec: &TaskSpec) -> Result<(), ValidationError> {
    match &spec.resources {
        Some(resources) => validate_task_resources(resources),
        None => Ok(()),
    }
}

fn validate_names(resources: &[TaskResource], field: &str) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for (i, resource) in resources.iter().enumerate() {
        if resource.name.is_empty() {
            return Err(ValidationError::EmptyName {
                field: format!("{}[{}].name", field, i),
            });
        }
        if !seen.insert(resource.name.as_str()) {
            return Err(ValidationError::DuplicateResourceName {
                field: format!("{}[{}].name", field, i),
                name: resource.name.clone(),
            });
        }
    }
    Ok(())
}
