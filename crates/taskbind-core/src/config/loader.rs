//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::Config;
use super::validation::validate_config;

/// Document syntax of a config file, picked from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// `.toml` files are TOML; anything else is read as YAML
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }

    fn parse(self, content: &str) -> std::result::Result<Config, ConfigError> {
        Ok(match self {
            Self::Yaml => serde_yaml::from_str(content)?,
            Self::Toml => toml::from_str(content)?,
        })
    }
}

/// Read, parse and validate a config file
pub fn load_config(path: &Path) -> Result<Config> {
    let format = ConfigFormat::of(path);
    info!(path = %path.display(), ?format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = format.parse(&content)?;
    validate_config(&config)?;

    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Places a config file may live for one directory, in priority order
fn candidates(dir: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    config_file_names().into_iter().flat_map(move |name| {
        [dir.join(name), dir.join(".github").join(name)]
    })
}

/// Nearest config file at or above `start_dir`.
///
/// Each directory is tried before its parent; within a directory every file
/// name is tried both directly and under `.github/`.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");

    let found = start_dir
        .ancestors()
        .flat_map(candidates)
        .find(|path| path.is_file());

    match &found {
        Some(path) => info!(path = %path.display(), "found config file"),
        None => debug!("no config file found"),
    }
    found
}

/// Find and load the nearest config file
pub fn load_config_from_dir(dir: &Path) -> Result<(Config, PathBuf)> {
    let path = find_config(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;
    let config = load_config(&path)?;
    Ok((config, path))
}

/// Find and load the nearest config file, falling back to defaults.
///
/// The returned path is `None` when the defaults were used.
pub fn load_config_or_default(dir: &Path) -> (Config, Option<PathBuf>) {
    let Some(path) = find_config(dir) else {
        return (Config::default(), None);
    };

    match load_config(&path) {
        Ok(config) => (config, Some(path)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unusable config, using defaults");
            (Config::default(), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::DEFAULT_WORKSPACE_ROOT;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_yaml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("taskbind.yaml");
        std::fs::write(&config_path, "workspace:\n  root: /workspace\n").unwrap();

        let found = find_config(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_yaml_over_toml() {
        let temp = TempDir::new().unwrap();
        let yaml_path = temp.path().join("taskbind.yaml");
        let toml_path = temp.path().join("taskbind.toml");
        std::fs::write(&yaml_path, "workspace:\n  root: /workspace\n").unwrap();
        std::fs::write(&toml_path, "[workspace]\nroot = \"/srv\"\n").unwrap();

        let found = find_config(temp.path()).unwrap();
        assert_eq!(found, yaml_path);
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("taskbind.toml");
        std::fs::write(&config_path, "[workspace]\nroot = \"/srv\"\n").unwrap();
        let nested = temp.path().join("tasks").join("build");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_config(&nested).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_find_config_in_github_dir() {
        let temp = TempDir::new().unwrap();
        let github_dir = temp.path().join(".github");
        std::fs::create_dir_all(&github_dir).unwrap();
        let config_path = github_dir.join("taskbind.yaml");
        std::fs::write(&config_path, "name: demo\n").unwrap();

        let found = find_config(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_load_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("taskbind.toml");
        std::fs::write(
            &config_path,
            "[workspace]\nroot = \"/srv/work\"\n\n[apply]\nmodifiers = [\"git.yaml\"]\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.workspace.root, "/srv/work");
        assert_eq!(config.apply.modifiers.len(), 1);
    }

    #[test]
    fn test_load_config_yaml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("taskbind.yaml");
        std::fs::write(&config_path, "workspace:\n  root: /data\n").unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.workspace.root, "/data");
    }

    #[test]
    fn test_load_config_rejects_invalid_root() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("taskbind.yaml");
        std::fs::write(&config_path, "workspace:\n  root: relative\n").unwrap();

        assert!(load_config(&config_path).is_err());
    }

    #[test]
    fn test_config_format_from_extension() {
        assert_eq!(ConfigFormat::of(Path::new("taskbind.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::of(Path::new(".taskbind.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::of(Path::new("taskbind.yml")), ConfigFormat::Yaml);
    }

    #[test]
    fn test_nearer_directory_wins_over_preferred_name() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("taskbind.yaml"), "name: outer\n").unwrap();
        let nested = temp.path().join("tasks");
        std::fs::create_dir_all(&nested).unwrap();
        let inner = nested.join(".taskbind.toml");
        std::fs::write(&inner, "name = \"inner\"\n").unwrap();

        assert_eq!(find_config(&nested), Some(inner));
    }

    #[test]
    fn test_load_config_or_default_ignores_broken_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("taskbind.yaml"), "workspace:\n  root: relative\n").unwrap();

        let (config, path) = load_config_or_default(temp.path());
        assert_eq!(config.workspace.root, DEFAULT_WORKSPACE_ROOT);
        assert!(path.is_none());
    }
}
