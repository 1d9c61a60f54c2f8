//! Resource declarations on a task

use serde::{Deserialize, Serialize};

use taskbind_core::config::DEFAULT_WORKSPACE_ROOT;

use crate::resource_type::ResourceType;

/// An input or output resource declared as a requirement of a task.
///
/// The name is how steps refer to the resource. When bound as an input,
/// the resource is made available under the workspace root at its name
/// unless `target_path` says otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDeclaration {
    /// Name the resource is referenced by; unique among its siblings
    pub name: String,

    /// Kind of resource
    #[serde(rename = "type")]
    pub resource_type: ResourceType,

    /// Path in the workspace where the resource will be placed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,
}

impl ResourceDeclaration {
    /// Create a new declaration
    pub fn new(name: impl Into<String>, resource_type: ResourceType) -> Self {
        Self {
            name: name.into(),
            resource_type,
            target_path: None,
        }
    }

    /// Set the target path
    pub fn with_target_path(mut self, path: impl Into<String>) -> Self {
        self.target_path = Some(path.into());
        self
    }

    /// Effective mount path under the default workspace root
    pub fn target_path(&self) -> String {
        self.target_path_in(DEFAULT_WORKSPACE_ROOT)
    }

    /// Effective mount path under `root`.
    ///
    /// No target path yields `<root>/<name>`, a relative one is placed
    /// under `root`, and an absolute one is used unchanged.
    pub fn target_path_in(&self, root: &str) -> String {
        let root = root.trim_end_matches('/');
        match self.target_path.as_deref() {
            None | Some("") => format!("{}/{}", root, self.name),
            Some(path) if path.starts_with('/') => path.to_string(),
            Some(path) => format!("{}/{}", root, path),
        }
    }
}

/// A declaration bound as a task input or output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResource {
    #[serde(flatten)]
    pub declaration: ResourceDeclaration,
}

impl From<ResourceDeclaration> for TaskResource {
    fn from(declaration: ResourceDeclaration) -> Self {
        Self { declaration }
    }
}

impl std::ops::Deref for TaskResource {
    type Target = ResourceDeclaration;

    fn deref(&self) -> &Self::Target {
        &self.declaration
    }
}

/// The inputs and outputs a task requires
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResources {
    /// Resources consumed by the task
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<TaskResource>,

    /// Resources produced by the task
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<TaskResource>,
}

impl TaskResources {
    /// Add an input
    pub fn with_input(mut self, declaration: ResourceDeclaration) -> Self {
        self.inputs.push(declaration.into());
        self
    }

    /// Add an output
    pub fn with_output(mut self, declaration: ResourceDeclaration) -> Self {
        self.outputs.push(declaration.into());
        self
    }

    /// Check if no resources are declared
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty()
    }
}
