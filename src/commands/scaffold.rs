//! CRUD scaffold command
//!
//! Builds a resource description from CLI field specs or from a JSON schema
//! file, runs the generator, and writes the resulting module to disk.
//!
//! # Example
//!
//! ```bash
//! crudcraft scaffold crud Task \
//!   title:string \
//!   done:boolean \
//!   due_date:datetime:optional
//! ```
//!
//! Schema files carry the same description declaratively:
//!
//! ```bash
//! crudcraft scaffold from-schema task.json
//! ```

use anyhow::{Context, Result};
use console::style;
use crudcraft::{ResourceSpec, ScaffoldGenerator};
use std::fs;
use std::path::PathBuf;

/// Where the resource description comes from
enum ScaffoldSource {
    /// `Model field:type...` straight from the command line
    Args { model: String, fields: Vec<String> },
    /// A JSON schema file from an external schema source
    Schema(PathBuf),
}

pub struct ScaffoldCommand {
    source: ScaffoldSource,
    output: PathBuf,
}

impl ScaffoldCommand {
    /// Scaffold from CLI arguments.
    pub fn from_args(model: String, fields: Vec<String>, output: PathBuf) -> Self {
        Self {
            source: ScaffoldSource::Args { model, fields },
            output,
        }
    }

    /// Scaffold from a JSON schema file.
    pub fn from_schema(schema: PathBuf, output: PathBuf) -> Self {
        Self {
            source: ScaffoldSource::Schema(schema),
            output,
        }
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        let generator = match &self.source {
            ScaffoldSource::Args { model, fields } => {
                ScaffoldGenerator::from_args(model, fields)
                    .context("Failed to create scaffold generator")?
            }
            ScaffoldSource::Schema(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read schema file: {}", path.display()))?;
                let resource: ResourceSpec = serde_json::from_str(&raw)
                    .with_context(|| format!("Failed to parse schema file: {}", path.display()))?;
                ScaffoldGenerator::new(resource)
                    .context("Failed to create scaffold generator")?
            }
        };

        let names = generator.names().clone();

        println!(
            "\n{} {} {}",
            style("Scaffolding CRUD module for").cyan().bold(),
            style(&names.pascal_singular).green().bold(),
            style("...").cyan().bold()
        );

        // Generation is all-or-nothing: nothing below runs on failure, so a
        // partial module never reaches the disk.
        let files = generator
            .generate()
            .context("Failed to generate scaffold files")?;

        println!(
            "\n{} {} files:",
            style("Generated").green().bold(),
            files.len()
        );

        for file in &files {
            let full_path = self.output.join(&file.path);

            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }

            fs::write(&full_path, &file.content)
                .with_context(|| format!("Failed to write file: {}", full_path.display()))?;

            println!(
                "  {} {} ({})",
                style("✓").green(),
                style(file.path.display()).dim(),
                style(&file.description).dim()
            );
        }

        println!(
            "\n{} CRUD module for {} is ready!",
            style("✨").green().bold(),
            style(&names.pascal_singular).green().bold()
        );

        println!("\n{}", style("Next steps:").cyan().bold());
        println!(
            "  1. Make sure your API serves {} under {}",
            style(&names.pascal_plural).yellow(),
            style(format!("/{}", names.lower_plural)).yellow()
        );
        println!(
            "  2. Register the module routes for {}",
            style(format!("app/{}", names.lower_plural)).yellow()
        );
        println!(
            "  3. Use the store in your components: {}",
            style(format!("use{}Store()", names.pascal_plural)).yellow()
        );

        Ok(())
    }
}
