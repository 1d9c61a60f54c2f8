//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults::DEFAULT_WORKSPACE_ROOT;

/// Main configuration for Taskbind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version of the config schema
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Project name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Workspace layout inside the task pod
    pub workspace: WorkspaceConfig,

    /// Modifier application settings
    pub apply: ApplyConfig,
}

/// Workspace configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Directory under which resources are mounted when no absolute
    /// target path is declared
    pub root: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: DEFAULT_WORKSPACE_ROOT.to_string(),
        }
    }
}

/// Modifier application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplyConfig {
    /// Modifier documents applied, in order, before any given on the command line
    pub modifiers: Vec<PathBuf>,
}

impl Config {
    /// Modifier paths with relative entries resolved against `base_dir`
    /// (normally the directory holding the config file).
    pub fn modifier_paths(&self, base_dir: Option<&Path>) -> Vec<PathBuf> {
        self.apply
            .modifiers
            .iter()
            .map(|p| match base_dir {
                Some(base) if p.is_relative() => base.join(p),
                _ => p.clone(),
            })
            .collect()
    }
}
