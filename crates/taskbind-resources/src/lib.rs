//! Taskbind Resources - binding pipeline resources to task specs
//!
//! This crate defines the resource types a task may declare as inputs and
//! outputs, the task spec model those resources are bound into, and the
//! merge engine that injects resource-provided steps and volumes into a
//! user-authored task spec.

pub mod declaration;
pub mod document;
pub mod merge;
pub mod modifier;
pub mod resource_type;
pub mod task;
pub mod validation;

pub use declaration::{ResourceDeclaration, TaskResource, TaskResources};
pub use document::{load_modifier, load_task_spec};
pub use merge::{apply_task_modifier, apply_task_modifiers, ModifierError};
pub use modifier::{InternalTaskModifier, TaskModifier};
pub use resource_type::{
    is_valid_output_type, is_valid_type, ResourceType, UnknownResourceType, ALL_RESOURCE_TYPES,
};
pub use task::{Step, TaskSpec, Volume};
pub use validation::{validate_task_resources, validate_task_spec, ValidationError};
