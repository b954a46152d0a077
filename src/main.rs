//! crudcraft CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::cognitive_complexity)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::ScaffoldCommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crudcraft")]
#[command(version)]
#[command(about = "CRUD scaffolding generator for Vue/Pinia frontend modules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a CRUD frontend module
    Scaffold {
        #[command(subcommand)]
        command: ScaffoldCommands,
    },
}

#[derive(Subcommand)]
enum ScaffoldCommands {
    /// Generate a complete CRUD module from field specs
    Crud {
        /// Resource name (`PascalCase`, e.g., `Task`, `UserProfile`)
        model: String,
        /// Field definitions (e.g., `title:string`, `due_date:datetime:optional`)
        #[arg(required = true)]
        fields: Vec<String>,
        /// Frontend root the module is written under
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },
    /// Generate a complete CRUD module from a JSON schema file
    FromSchema {
        /// Path to the schema file
        schema: PathBuf,
        /// Frontend root the module is written under
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scaffold { command } => {
            let cmd = match command {
                ScaffoldCommands::Crud {
                    model,
                    fields,
                    output,
                } => ScaffoldCommand::from_args(model, fields, output),
                ScaffoldCommands::FromSchema { schema, output } => {
                    ScaffoldCommand::from_schema(schema, output)
                }
            };
            cmd.execute()?;
        }
    }

    Ok(())
}
