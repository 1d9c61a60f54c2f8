//! Loading task specs and modifiers from disk

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use taskbind_core::{DocumentError, Result, TaskbindError};

use crate::modifier::InternalTaskModifier;
use crate::task::TaskSpec;

/// Load a task spec from a YAML, JSON or TOML file
pub fn load_task_spec(path: &Path) -> Result<TaskSpec> {
    let spec: TaskSpec = load_document(path)?;
    debug!(
        path = %path.display(),
        steps = spec.steps.len(),
        volumes = spec.volumes.len(),
        "task spec loaded"
    );
    Ok(spec)
}

/// Load a fixed-list modifier from a YAML, JSON or TOML file
pub fn load_modifier(path: &Path) -> Result<InternalTaskModifier> {
    let modifier: InternalTaskModifier = load_document(path)?;
    debug!(
        path = %path.display(),
        prepend = modifier.steps_to_prepend.len(),
        append = modifier.steps_to_append.len(),
        volumes = modifier.volumes.len(),
        "modifier loaded"
    );
    Ok(modifier)
}

fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(DocumentError::NotFound(path.to_path_buf()).into());
    }

    let format = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => "JSON",
        Some("toml") => "TOML",
        _ => "YAML",
    };
    info!(path = %path.display(), format, "loading document");

    let content = std::fs::read_to_string(path).map_err(DocumentError::Io)?;
    let parsed: std::result::Result<T, String> = match format {
        "JSON" => serde_json::from_str(&content).map_err(|e| e.to_string()),
        "TOML" => toml::from_str(&content).map_err(|e| e.to_string()),
        _ => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|message| {
        TaskbindError::from(DocumentError::Parse {
            path: path.to_path_buf(),
            message,
        })
    })
}
