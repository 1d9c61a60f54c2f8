//! Apply command

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use taskbind_core::Config;
use taskbind_resources::{
    apply_task_modifier, load_modifier, load_task_spec, validate_task_spec, InternalTaskModifier,
    ModifierError, TaskSpec,
};

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};
use crate::exit_codes;

/// Apply resource modifiers to a task spec
#[derive(Debug, Args)]
pub struct ApplyCommand {
    /// Task spec file (YAML, JSON or TOML)
    pub task: PathBuf,

    /// Modifier file to apply; repeat to apply several, in order
    #[arg(short, long = "modifier")]
    pub modifiers: Vec<PathBuf>,

    /// Document format of the amended spec
    #[arg(long, default_value = "yaml")]
    pub output: DocumentFormat,

    /// Still print the spec when a modifier is rejected
    #[arg(long)]
    pub allow_partial: bool,
}

/// Serialization of the amended task spec
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DocumentFormat {
    #[default]
    Yaml,
    Json,
}

/// Outcome of applying a sequence of modifiers
#[derive(Debug)]
struct Amendment {
    /// Number of modifiers applied successfully
    applied: usize,
    /// The rejected modifier and why, if any
    failure: Option<(PathBuf, ModifierError)>,
}

impl ApplyCommand {
    /// Execute the apply command, returning the process exit code
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        info!(
            task = %self.task.display(),
            modifiers = self.modifiers.len(),
            "executing apply command"
        );

        let (config, config_dir) = match cli.load_config() {
            Ok(loaded) => loaded,
            Err(e) => {
                output::error(&format!("Configuration: {}", e));
                return Ok(exit_codes::CONFIG_ERROR);
            }
        };

        let mut spec = load_task_spec(&self.task)?;
        if let Err(e) = validate_task_spec(&spec) {
            output::error(&e.to_string());
            return Ok(exit_codes::VALIDATION_ERROR);
        }

        let modifier_paths = self.modifier_paths(&config, config_dir.as_deref());

        // Load everything up front so a bad file never leaves a half-applied spec
        let modifiers = modifier_paths
            .iter()
            .map(|path| load_modifier(path))
            .collect::<Result<Vec<_>, _>>()?;

        let amendment = amend(&mut spec, &modifier_paths, &modifiers);
        let failed = amendment.failure.is_some();

        match cli.format {
            OutputFormat::Json => {
                let error = amendment.failure.as_ref().map(|(path, e)| {
                    serde_json::json!({
                        "modifier": path.to_string_lossy(),
                        "message": e.to_string(),
                    })
                });
                let amended = (!failed || self.allow_partial).then_some(&spec);
                let result = serde_json::json!({
                    "applied": amendment.applied,
                    "total": modifiers.len(),
                    "error": error,
                    "spec": amended,
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    for path in &modifier_paths[..amendment.applied] {
                        output::info(&format!(
                            "Applied {}",
                            output::path_style().apply_to(path.display())
                        ));
                    }
                }
                if let Some((path, e)) = &amendment.failure {
                    output::error(&format!("{}: {}", path.display(), e));
                }
                if !failed || self.allow_partial {
                    print!("{}", self.render(&spec)?);
                }
                if !failed && !cli.quiet {
                    output::success(&format!("{} modifier(s) applied", amendment.applied));
                }
            }
        }

        Ok(if failed {
            exit_codes::MERGE_ERROR
        } else {
            exit_codes::SUCCESS
        })
    }

    /// Modifier files in application order: those listed in the config
    /// (resolved against its directory), then those given with `-m`.
    fn modifier_paths(&self, config: &Config, config_dir: Option<&Path>) -> Vec<PathBuf> {
        let mut paths = config.modifier_paths(config_dir);
        paths.extend(self.modifiers.iter().cloned());
        paths
    }

    fn render(&self, spec: &TaskSpec) -> anyhow::Result<String> {
        Ok(match self.output {
            DocumentFormat::Yaml => serde_yaml::to_string(spec)?,
            DocumentFormat::Json => format!("{}\n", serde_json::to_string_pretty(spec)?),
        })
    }
}

/// Apply modifiers in order, stopping at the first one rejected
fn amend(spec: &mut TaskSpec, paths: &[PathBuf], modifiers: &[InternalTaskModifier]) -> Amendment {
    let mut applied = 0;
    for (path, modifier) in paths.iter().zip(modifiers) {
        if let Err(e) = apply_task_modifier(spec, modifier) {
            return Amendment {
                applied,
                failure: Some((path.clone(), e)),
            };
        }
        applied += 1;
    }
    Amendment {
        applied,
        failure: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use taskbind_resources::{Step, Volume};
    use tempfile::TempDir;

    fn command(output: DocumentFormat) -> ApplyCommand {
        ApplyCommand {
            task: PathBuf::from("task.yaml"),
            modifiers: Vec::new(),
            output,
            allow_partial: false,
        }
    }

    fn write(dir: &Path, name: &str, content: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_render_yaml() {
        let spec = TaskSpec::with_steps(vec![Step::new("build", "golang")]);
        let rendered = command(DocumentFormat::Yaml).render(&spec).unwrap();
        assert!(rendered.contains("name: build"));
        assert!(rendered.contains("image: golang"));
    }

    #[test]
    fn test_render_json() {
        let spec = TaskSpec::with_steps(vec![Step::new("build", "golang")]);
        let rendered = command(DocumentFormat::Json).render(&spec).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["steps"][0]["name"], "build");
    }

    #[test]
    fn test_config_modifiers_come_before_cli_modifiers() {
        let mut config = Config::default();
        config.apply.modifiers = vec![PathBuf::from("mods/git.yaml")];
        let mut cmd = command(DocumentFormat::Yaml);
        cmd.modifiers = vec![PathBuf::from("local.yaml"), PathBuf::from("/abs/gcs.yaml")];

        let paths = cmd.modifier_paths(&config, Some(Path::new("/project")));

        assert_eq!(
            paths,
            vec![
                PathBuf::from("/project/mods/git.yaml"),
                PathBuf::from("local.yaml"),
                PathBuf::from("/abs/gcs.yaml"),
            ]
        );
    }

    #[test]
    fn test_amend_applies_in_order() {
        let mut spec = TaskSpec::with_steps(vec![Step::new("build", "golang")]);
        let paths = vec![PathBuf::from("config.yaml"), PathBuf::from("cli.yaml")];
        let modifiers = vec![
            InternalTaskModifier::new().prepend(Step::new("fetch-config", "git")),
            InternalTaskModifier::new().prepend(Step::new("fetch-cli", "git")),
        ];

        let amendment = amend(&mut spec, &paths, &modifiers);

        assert_eq!(amendment.applied, 2);
        assert!(amendment.failure.is_none());
        assert_eq!(spec.step_names(), vec!["fetch-cli", "fetch-config", "build"]);
    }

    #[test]
    fn test_amend_stops_at_first_rejected_modifier() {
        let mut spec = TaskSpec::default();
        let paths = vec![
            PathBuf::from("a.yaml"),
            PathBuf::from("b.yaml"),
            PathBuf::from("c.yaml"),
        ];
        let modifiers = vec![
            InternalTaskModifier::new().with_volume(Volume::secret("creds", "x")),
            InternalTaskModifier::new().with_volume(Volume::secret("creds", "y")),
            InternalTaskModifier::new().append(Step::new("never", "busybox")),
        ];

        let amendment = amend(&mut spec, &paths, &modifiers);

        assert_eq!(amendment.applied, 1);
        let (path, err) = amendment.failure.unwrap();
        assert_eq!(path, PathBuf::from("b.yaml"));
        assert_eq!(err, ModifierError::ConflictingVolume("creds".to_string()));
        assert!(spec.step("never").is_none());
    }

    #[test]
    fn test_execute_returns_exit_codes() {
        let temp = TempDir::new().unwrap();
        let config = write(
            temp.path(),
            "taskbind.yaml",
            "apply:\n  modifiers:\n    - fetch.yaml\n",
        );
        write(
            temp.path(),
            "fetch.yaml",
            "stepsToPrepend:\n  - name: fetch\n    image: alpine/git\n",
        );
        let task = write(
            temp.path(),
            "task.yaml",
            "steps:\n  - name: build\n    image: golang\n",
        );
        let upload = write(
            temp.path(),
            "upload.yaml",
            "stepsToAppend:\n  - name: upload\n    image: gsutil\n",
        );
        // Collides with the step contributed by the configured modifier
        let refetch = write(
            temp.path(),
            "refetch.yaml",
            "stepsToAppend:\n  - name: fetch\n    image: alpine/git\n",
        );

        let run = |modifier: &str| {
            let cli = Cli::try_parse_from([
                "taskbind",
                "-q",
                "--format",
                "json",
                "--config",
                config.as_str(),
                "apply",
                task.as_str(),
                "-m",
                modifier,
            ])
            .unwrap();
            match &cli.command {
                crate::cli::Commands::Apply(cmd) => cmd.execute(&cli).unwrap(),
                other => panic!("expected apply, got {:?}", other),
            }
        };

        assert_eq!(run(upload.as_str()), exit_codes::SUCCESS);
        assert_eq!(run(refetch.as_str()), exit_codes::MERGE_ERROR);
    }

    #[test]
    fn test_execute_reports_invalid_resources() {
        let temp = TempDir::new().unwrap();
        let config = write(temp.path(), "taskbind.yaml", "name: demo\n");
        let task = write(
            temp.path(),
            "task.yaml",
            "resources:\n  outputs:\n    - name: built\n      type: image\nsteps: []\n",
        );

        let cli = Cli::try_parse_from([
            "taskbind",
            "-q",
            "--config",
            config.as_str(),
            "apply",
            task.as_str(),
        ])
        .unwrap();
        let code = match &cli.command {
            crate::cli::Commands::Apply(cmd) => cmd.execute(&cli).unwrap(),
            other => panic!("expected apply, got {:?}", other),
        };

        assert_eq!(code, exit_codes::VALIDATION_ERROR);
    }
}
