//! Types command

use clap::Args;

use taskbind_resources::ALL_RESOURCE_TYPES;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};
use crate::exit_codes;

/// List known resource types
#[derive(Debug, Args)]
pub struct TypesCommand {
    /// Only list types that may be bound as outputs
    #[arg(long)]
    pub outputs: bool,
}

impl TypesCommand {
    /// Execute the types command, returning the process exit code
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        let types: Vec<_> = ALL_RESOURCE_TYPES
            .into_iter()
            .filter(|t| !self.outputs || t.is_output_allowed())
            .collect();

        match cli.format {
            OutputFormat::Json => {
                let entries: Vec<_> = types
                    .iter()
                    .map(|t| {
                        serde_json::json!({
                            "type": t.as_str(),
                            "input": true,
                            "output": t.is_output_allowed(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!("{}", output::header("Resource types"));
                }
                for t in types {
                    let usage = if t.is_output_allowed() {
                        "input, output"
                    } else {
                        "input"
                    };
                    println!(
                        "  {:<14} {}",
                        output::type_style().apply_to(t.as_str()),
                        usage
                    );
                }
            }
        }

        Ok(exit_codes::SUCCESS)
    }
}
