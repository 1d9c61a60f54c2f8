//! Merge engine: applying task modifiers to a task spec
//!
//! A task spec is amended once per bound resource, in the order the caller
//! processes its resources. Each application validates and inserts the
//! prepend group, then validates and inserts the append group, then merges
//! volumes. Step names must stay unique across the whole task and volumes are
//! deduplicated by name and content.
//!
//! Application is not transactional. If the append group or a volume is
//! rejected, whatever was already inserted by the same call stays in the
//! spec, and nothing from earlier calls is rolled back. Callers that need an
//! all-or-nothing amendment should apply to a clone and keep it only on
//! success.

use tracing::{debug, instrument, warn};

use crate::modifier::TaskModifier;
use crate::task::{Step, TaskSpec};

/// Errors applying a modifier to a task spec
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModifierError {
    /// A contributed step has the same name as a step already in the task
    #[error("Step {0} cannot be added again")]
    DuplicateStepName(String),

    /// A contributed volume has the name of an existing, different volume
    #[error("tried to add volume {0} already added but with different contents")]
    ConflictingVolume(String),
}

impl ModifierError {
    /// Name of the step or volume that caused the conflict
    pub fn name(&self) -> &str {
        match self {
            Self::DuplicateStepName(name) | Self::ConflictingVolume(name) => name,
        }
    }
}

/// Apply a modifier to the task by prepending and appending its steps and
/// merging its volumes.
///
/// Fails with [`ModifierError::DuplicateStepName`] if a contributed step's
/// name is already in the task. An identical volume that is already present
/// is not added again; a same-named volume with different contents fails
/// with [`ModifierError::ConflictingVolume`].
#[instrument(skip_all, fields(existing_steps = spec.steps.len(), existing_volumes = spec.volumes.len()))]
pub fn apply_task_modifier<M>(spec: &mut TaskSpec, modifier: &M) -> Result<(), ModifierError>
where
    M: TaskModifier + ?Sized,
{
    let prepend = modifier.steps_to_prepend();
    for step in &prepend {
        check_step_not_already_added(step, &spec.steps)?;
    }
    debug!(count = prepend.len(), "prepending steps");
    let mut steps = prepend;
    steps.append(&mut spec.steps);
    spec.steps = steps;

    // Checked against the steps as they are now, just-prepended ones included
    let append = modifier.steps_to_append();
    for step in &append {
        check_step_not_already_added(step, &spec.steps)?;
    }
    debug!(count = append.len(), "appending steps");
    spec.steps.extend(append);

    for volume in modifier.volumes() {
        // A spec may already carry several volumes under one name; all must match
        let mut same_name = spec
            .volumes
            .iter()
            .filter(|v| v.name == volume.name)
            .peekable();
        if same_name.clone().any(|v| *v != volume) {
            warn!(volume = %volume.name, "conflicting volume contents");
            return Err(ModifierError::ConflictingVolume(volume.name));
        }
        if same_name.peek().is_some() {
            debug!(volume = %volume.name, "identical volume already present");
        } else {
            debug!(volume = %volume.name, "adding volume");
            spec.volumes.push(volume);
        }
    }

    Ok(())
}

/// Apply modifiers one after another, stopping at the first failure.
///
/// Modifiers applied before the failing one keep their effect, as does any
/// partial effect of the failing one itself.
pub fn apply_task_modifiers<I, M>(spec: &mut TaskSpec, modifiers: I) -> Result<(), ModifierError>
where
    I: IntoIterator<Item = M>,
    M: TaskModifier,
{
    for (index, modifier) in modifiers.into_iter().enumerate() {
        apply_task_modifier(spec, &modifier).map_err(|e| {
            warn!(index, error = %e, "modifier rejected");
            e
        })?;
    }
    Ok(())
}

impl TaskSpec {
    /// Apply a modifier to this spec; see [`apply_task_modifier`]
    pub fn apply_modifier<M>(&mut self, modifier: &M) -> Result<(), ModifierError>
    where
        M: TaskModifier + ?Sized,
    {
        apply_task_modifier(self, modifier)
    }
}

fn check_step_not_already_added(step: &Step, steps: &[Step]) -> Result<(), ModifierError> {
    if steps.iter().any(|s| s.name == step.name) {
        return Err(ModifierError::DuplicateStepName(step.name.clone()));
    }
    Ok(())
}
