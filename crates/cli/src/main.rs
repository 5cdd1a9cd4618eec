//! CDK Schema Generator CLI
//!
//! Command-line interface for generating language-binding annotated
//! CloudFormation schemas from the AWS service specification.

use anyhow::{Context, Result};
use cdk_schema_generator_common::BindingConfig;
use cdk_schema_generator_generator::{
    generate_schemas, validate_output_path, BindingGenerator, SchemaWriter,
};
use cdk_schema_generator_parser::{SpecDatabase, SpecSource};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cdk-schema-generator")]
#[command(version, about = "Generate CDK binding schemas from the AWS service specification", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate cdk-types.json and cdk-resources.json
    #[command(after_help = "EXAMPLES:\n  \
        # Generate into ./out\n  \
        cdk-schema-generator generate --spec db.json --output ./out\n\n  \
        # Override binding conventions\n  \
        cdk-schema-generator generate --spec db.json --output ./out --bindings bindings.yaml")]
    Generate {
        /// Path to the specification database JSON
        #[arg(short, long)]
        spec: PathBuf,

        /// Output directory
        #[arg(short, long, env = "INPUT_OUTPUT-PATH")]
        output: String,

        /// Binding convention overrides (YAML)
        #[arg(short, long)]
        bindings: Option<PathBuf>,
    },

    /// Load a specification database and summarize its contents
    Inspect {
        /// Path to the specification database JSON
        #[arg(short, long)]
        spec: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "✗".red().bold(), error_message(&e));
        std::process::exit(1);
    }
}

/// One-line error report: each context followed by its cause
fn error_message(error: &anyhow::Error) -> String {
    format!("{:#}", error)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            spec,
            output,
            bindings,
        } => {
            generate_command(&spec, &output, bindings.as_deref(), cli.verbose)?;
        }
        Commands::Inspect { spec } => {
            inspect_command(&spec, cli.verbose)?;
        }
    }

    Ok(())
}

fn generate_command(
    spec_path: &Path,
    output: &str,
    bindings_path: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let output_dir = validate_output_path(output)?;

    let config = match bindings_path {
        Some(path) => {
            println!("{} Loading binding conventions: {}", "→".cyan(), path.display());
            BindingConfig::load(path).context("Failed to load binding conventions")?
        }
        None => BindingConfig::default(),
    };
    info!(
        version = config.version,
        exceptions = config.csharp_service_exceptions.len(),
        "binding conventions ready"
    );

    if verbose {
        println!("  Spec: {}", spec_path.display());
        println!("  Output: {}", output_dir.display());
    }

    println!("{} Loading specification: {}", "→".cyan(), spec_path.display());
    let database =
        SpecDatabase::shared(spec_path).context("Failed to load specification database")?;

    println!("{} Generating schemas...", "→".cyan());
    let schemas = generate_schemas(database, BindingGenerator::new(config))
        .context("Failed to generate schemas")?;

    println!(
        "{} Assembled {} property types and {} resources",
        "✓".green(),
        schemas.property_types.len(),
        schemas.resources.len()
    );

    let written = SchemaWriter::new(output_dir.clone())
        .write(&schemas.property_types, &schemas.resources)
        .context("Failed to write schemas")?;

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("\n{}", "Generated files:".bold());
    for path in written {
        println!("  📄 {}", path.display());
    }

    Ok(())
}

fn inspect_command(spec_path: &Path, verbose: bool) -> Result<()> {
    println!("{} Loading specification: {}", "→".cyan(), spec_path.display());
    let database =
        SpecDatabase::shared(spec_path).context("Failed to load specification database")?;

    println!("\n{}", "✓ Load successful!".green().bold());
    println!("\n{}", "Specification:".bold());
    println!("  Services: {}", database.services().count());
    println!("  Resources: {}", database.resources().len());
    println!("  Type definitions: {}", database.type_definitions().len());

    let dangling = database.dangling_relations();
    if !dangling.is_empty() {
        println!(
            "  {} {} relations reference unknown entities",
            "⚠".yellow(),
            dangling.len()
        );
        if verbose {
            for relation in dangling {
                println!("    {} -> {}", relation.from, relation.to);
            }
        }
    }

    if verbose {
        println!("\n{}", "Resources:".bold());
        for resource in database.resources() {
            match database.service_of(resource) {
                Ok(service) => println!(
                    "  • {} ({})",
                    resource.cloud_formation_type.cyan(),
                    service.name
                ),
                Err(e) => println!(
                    "  • {} ({})",
                    resource.cloud_formation_type.cyan(),
                    e.to_string().red()
                ),
            }
            println!(
                "    Attributes: {}  Properties: {}",
                resource.attributes.len(),
                resource.properties.len()
            );
        }
    }

    Ok(())
}
