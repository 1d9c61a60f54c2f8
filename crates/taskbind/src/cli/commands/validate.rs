//! Validate command

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use taskbind_resources::{load_task_spec, validate_task_resources, TaskResources, TaskSpec};

use crate::cli::{Cli, OutputFormat};
use crate::exit_codes;

/// Validate the resources a task spec declares
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Task spec file (YAML, JSON or TOML)
    pub task: PathBuf,

    /// Strict mode - treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// What validation found in a task spec
#[derive(Debug, Default)]
struct Findings {
    errors: Vec<String>,
    warnings: Vec<String>,
    /// Informational only; never fails validation, even in strict mode
    notes: Vec<String>,
}

impl ValidateCommand {
    /// Execute the validate command, returning the process exit code
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        info!(
            task = %self.task.display(),
            strict = self.strict,
            "executing validate command"
        );

        let mut findings = Findings::default();

        let workspace_root = match cli.load_config() {
            Ok((config, _)) => config.workspace.root,
            Err(e) => {
                findings.errors.push(format!("Configuration: {}", e));
                taskbind_core::config::DEFAULT_WORKSPACE_ROOT.to_string()
            }
        };

        match load_task_spec(&self.task) {
            Ok(spec) => findings.review(&spec, &workspace_root),
            Err(e) => findings.errors.push(format!("Task spec: {}", e)),
        }

        if self.strict {
            findings.errors.append(&mut findings.warnings);
        }

        let Findings {
            errors,
            warnings,
            notes,
        } = findings;
        let passed = errors.is_empty();

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "valid": passed,
                    "task": self.task.to_string_lossy(),
                    "errors": errors,
                    "warnings": warnings,
                    "notes": notes
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!("{}", style("Validation Results").bold());
                    println!();
                    println!("Task: {}", style(self.task.display()).cyan());
                    println!();

                    if !errors.is_empty() {
                        println!("{}", style("Errors:").red().bold());
                        for error in &errors {
                            println!("  {} {}", style("✗").red(), error);
                        }
                        println!();
                    }

                    if !warnings.is_empty() {
                        println!("{}", style("Warnings:").yellow().bold());
                        for warning in &warnings {
                            println!("  {} {}", style("!").yellow(), warning);
                        }
                        println!();
                    }

                    for note in &notes {
                        println!("{} {}", style("→").blue(), note);
                    }
                    if !notes.is_empty() {
                        println!();
                    }

                    if passed {
                        if warnings.is_empty() {
                            println!("{}", style("✓ All checks passed").green().bold());
                        } else {
                            println!(
                                "{} with {} warning(s)",
                                style("✓ Validation passed").green().bold(),
                                warnings.len()
                            );
                        }
                    } else {
                        println!(
                            "{} with {} error(s)",
                            style("✗ Validation failed").red().bold(),
                            errors.len()
                        );
                    }
                }
            }
        }

        Ok(if passed {
            exit_codes::SUCCESS
        } else {
            exit_codes::VALIDATION_ERROR
        })
    }
}

impl Findings {
    /// Check the resources a loaded spec declares
    fn review(&mut self, spec: &TaskSpec, workspace_root: &str) {
        match &spec.resources {
            Some(resources) => {
                if let Err(e) = validate_task_resources(resources) {
                    self.errors.push(e.to_string());
                }
                self.warnings
                    .extend(target_path_collisions(resources, workspace_root));
            }
            None => self.notes.push("Task declares no resources".to_string()),
        }
    }
}

/// Inputs that would be placed at the same path in the workspace
fn target_path_collisions(resources: &TaskResources, root: &str) -> Vec<String> {
    let mut by_path: HashMap<String, Vec<&str>> = HashMap::new();
    for input in &resources.inputs {
        by_path
            .entry(input.target_path_in(root))
            .or_default()
            .push(&input.name);
    }

    let mut collisions: Vec<String> = by_path
        .into_iter()
        .filter(|(_, names)| names.len() > 1)
        .map(|(path, names)| format!("Inputs {} share target path {}", names.join(", "), path))
        .collect();
    collisions.sort();
    collisions
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use taskbind_resources::{ResourceDeclaration, ResourceType, Step};
    use tempfile::TempDir;

    #[test]
    fn test_no_collisions() {
        let resources = TaskResources::default()
            .with_input(ResourceDeclaration::new("source", ResourceType::Git))
            .with_input(ResourceDeclaration::new("tools", ResourceType::Git));

        assert!(target_path_collisions(&resources, "/workspace").is_empty());
    }

    #[test]
    fn test_collision_through_target_path() {
        let resources = TaskResources::default()
            .with_input(ResourceDeclaration::new("source", ResourceType::Git))
            .with_input(
                ResourceDeclaration::new("mirror", ResourceType::Storage)
                    .with_target_path("/workspace/source"),
            );

        let warnings = target_path_collisions(&resources, "/workspace");
        assert_eq!(
            warnings,
            vec!["Inputs source, mirror share target path /workspace/source".to_string()]
        );
    }

    #[test]
    fn test_outputs_do_not_collide_with_inputs() {
        let resources = TaskResources::default()
            .with_input(ResourceDeclaration::new("source", ResourceType::Git))
            .with_output(ResourceDeclaration::new("source", ResourceType::Git));

        assert!(target_path_collisions(&resources, "/workspace").is_empty());
    }

    #[test]
    fn test_task_without_resources_is_only_a_note() {
        let spec = TaskSpec::with_steps(vec![Step::new("build", "golang")]);
        let mut findings = Findings::default();

        findings.review(&spec, "/workspace");

        assert!(findings.errors.is_empty());
        assert!(findings.warnings.is_empty());
        assert_eq!(findings.notes, vec!["Task declares no resources".to_string()]);
    }

    #[test]
    fn test_review_collects_errors_and_warnings() {
        let spec = TaskSpec::default().with_resources(
            TaskResources::default()
                .with_input(ResourceDeclaration::new("source", ResourceType::Git))
                .with_input(
                    ResourceDeclaration::new("mirror", ResourceType::Storage)
                        .with_target_path("source"),
                )
                .with_output(ResourceDeclaration::new("built", ResourceType::Image)),
        );
        let mut findings = Findings::default();

        findings.review(&spec, "/workspace");

        assert_eq!(findings.errors.len(), 1);
        assert_eq!(findings.warnings.len(), 1);
        assert!(findings.notes.is_empty());
    }

    #[test]
    fn test_strict_passes_task_without_resources() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("taskbind.yaml");
        std::fs::write(&config, "name: demo\n").unwrap();
        let task = temp.path().join("task.yaml");
        std::fs::write(&task, "steps:\n  - name: build\n    image: golang\n").unwrap();
        let config = config.to_string_lossy().to_string();
        let task = task.to_string_lossy().to_string();

        let cli = Cli::try_parse_from([
            "taskbind",
            "-q",
            "--config",
            config.as_str(),
            "validate",
            task.as_str(),
            "--strict",
        ])
        .unwrap();
        let code = match &cli.command {
            crate::cli::Commands::Validate(cmd) => cmd.execute(&cli).unwrap(),
            other => panic!("expected validate, got {:?}", other),
        };

        assert_eq!(code, exit_codes::SUCCESS);
    }
}
