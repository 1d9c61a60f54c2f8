//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "taskbind.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "taskbind.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".taskbind.yaml";

/// Root directory resources are mounted under by default
pub const DEFAULT_WORKSPACE_ROOT: &str = "/workspace";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".taskbind.toml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Taskbind Configuration

workspace:
  root: /workspace

apply:
  modifiers: []
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_template_matches_defaults() {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.workspace.root, DEFAULT_WORKSPACE_ROOT);
        assert!(config.apply.modifiers.is_empty());
    }
}
