//! The task modifier capability
//!
//! A modifier describes what a bound resource contributes to a task: steps to
//! run before the user's steps, steps to run after them, and volumes the pod
//! needs. Resource-specific modifiers compute these from their configuration;
//! [`InternalTaskModifier`] simply holds fixed lists.

use serde::{Deserialize, Serialize};

use crate::task::{Step, Volume};

/// Contributions a resource makes to a task spec
pub trait TaskModifier {
    /// Steps to insert, in order, before all existing steps
    fn steps_to_prepend(&self) -> Vec<Step>;

    /// Steps to insert, in order, after all existing steps
    fn steps_to_append(&self) -> Vec<Step>;

    /// Volumes to add to the task pod
    fn volumes(&self) -> Vec<Volume>;
}

impl<T: TaskModifier + ?Sized> TaskModifier for &T {
    fn steps_to_prepend(&self) -> Vec<Step> {
        (**self).steps_to_prepend()
    }

    fn steps_to_append(&self) -> Vec<Step> {
        (**self).steps_to_append()
    }

    fn volumes(&self) -> Vec<Volume> {
        (**self).volumes()
    }
}

impl<T: TaskModifier + ?Sized> TaskModifier for Box<T> {
    fn steps_to_prepend(&self) -> Vec<Step> {
        (**self).steps_to_prepend()
    }

    fn steps_to_append(&self) -> Vec<Step> {
        (**self).steps_to_append()
    }

    fn volumes(&self) -> Vec<Volume> {
        (**self).volumes()
    }
}

/// Modifier for built-in resources, holding pre-computed lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalTaskModifier {
    #[serde(default)]
    pub steps_to_prepend: Vec<Step>,
    #[serde(default)]
    pub steps_to_append: Vec<Step>,
    #[serde(default)]
    pub volumes: Vec<Volume>,
}

impl InternalTaskModifier {
    /// Create an empty modifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step to prepend
    pub fn prepend(mut self, step: Step) -> Self {
        self.steps_to_prepend.push(step);
        self
    }

    /// Add a step to append
    pub fn append(mut self, step: Step) -> Self {
        self.steps_to_append.push(step);
        self
    }

    /// Add a volume
    pub fn with_volume(mut self, volume: Volume) -> Self {
        self.volumes.push(volume);
        self
    }
}

impl TaskModifier for InternalTaskModifier {
    fn steps_to_prepend(&self) -> Vec<Step> {
        self.steps_to_prepend.clone()
    }

    fn steps_to_append(&self) -> Vec<Step> {
        self.steps_to_append.clone()
    }

    fn volumes(&self) -> Vec<Volume> {
        self.volumes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_modifier_returns_lists_verbatim() {
        let modifier = InternalTaskModifier::new()
            .prepend(Step::new("fetch-a", "git"))
            .prepend(Step::new("fetch-b", "git"))
            .append(Step::new("upload", "gsutil"))
            .with_volume(Volume::secret("creds", "gcs"));

        let names: Vec<_> = modifier
            .steps_to_prepend()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["fetch-a", "fetch-b"]);
        assert_eq!(modifier.steps_to_append()[0].name, "upload");
        assert_eq!(modifier.volumes(), vec![Volume::secret("creds", "gcs")]);
    }

    #[test]
    fn test_boxed_modifiers() {
        let modifiers: Vec<Box<dyn TaskModifier>> = vec![
            Box::new(InternalTaskModifier::new().prepend(Step::new("a", "img"))),
            Box::new(InternalTaskModifier::new().append(Step::new("b", "img"))),
        ];

        assert_eq!(modifiers[0].steps_to_prepend().len(), 1);
        assert!(modifiers[1].steps_to_prepend().is_empty());
        assert_eq!(modifiers[1].steps_to_append()[0].name, "b");
    }

    #[test]
    fn test_deserialize_partial_modifier() {
        let modifier: InternalTaskModifier =
            serde_yaml::from_str("volumes:\n  - name: scratch\n    emptyDir: {}\n").unwrap();
        assert!(modifier.steps_to_prepend.is_empty());
        assert!(modifier.steps_to_append.is_empty());
        assert_eq!(modifier.volumes, vec![Volume::empty_dir("scratch")]);
    }
}
