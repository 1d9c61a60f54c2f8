//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_workspace(config)?;
    validate_apply(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_workspace(config: &Config) -> Result<()> {
    let root = &config.workspace.root;
    if root.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "workspace.root".to_string(),
            message: "root cannot be empty".to_string(),
        }
        .into());
    }

    if !root.starts_with('/') {
        return Err(ConfigError::InvalidValue {
            field: "workspace.root".to_string(),
            message: "must be an absolute path".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_apply(config: &Config) -> Result<()> {
    for (i, path) in config.apply.modifiers.iter().enumerate() {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("apply.modifiers[{}]", i),
                message: "modifier path cannot be empty".to_string(),
            }
            .into());
        }
    }

    Ok(())
}
