//! docgen CLI - Main entry point

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use docgen_core::{Generator, GeneratorConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod input;

#[derive(Parser)]
#[command(name = "docgen")]
#[command(version, about = "Generate DOCX and PDF documents from templates", long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fail when a template uses an undefined variable
    #[arg(long, global = true)]
    strict_undefined: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Inputs and output shared by every command.
#[derive(Args, Debug)]
struct InputArgs {
    /// JSON or YAML file with the data mapping
    #[arg(long)]
    data: Option<PathBuf>,

    /// Data value (KEY=VALUE), applied after --data
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE")]
    defines: Vec<String>,

    /// Write output to FILE
    #[arg(short = 'o', long)]
    output: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill {{key}} placeholders in a DOCX template
    Docx {
        /// DOCX template file
        #[arg(long)]
        template: PathBuf,

        #[command(flatten)]
        inputs: InputArgs,
    },

    /// Render a Jinja template into a DOCX document, one paragraph per line
    DocxTemplate {
        /// Template text file
        #[arg(long)]
        template: PathBuf,

        #[command(flatten)]
        inputs: InputArgs,
    },

    /// Render a PDF from a Jinja template, or from the title and content keys
    Pdf {
        /// Template text file (omit to use the title and content keys)
        #[arg(long)]
        template: Option<PathBuf>,

        #[command(flatten)]
        inputs: InputArgs,
    },
}

fn load_config(cli: &Cli) -> Result<GeneratorConfig> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    if cli.strict_undefined {
        config.strict_undefined = true;
    }
    Ok(config)
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docgen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let generator = Generator::new(load_config(&cli)?);

    let written = match cli.command {
        Commands::Docx { template, inputs } => commands::docx::execute(
            &generator,
            commands::docx::DocxArgs {
                template,
                data: inputs.data,
                defines: inputs.defines,
                output: inputs.output,
            },
        )?,
        Commands::DocxTemplate { template, inputs } => commands::docx_template::execute(
            &generator,
            commands::docx_template::DocxTemplateArgs {
                template,
                data: inputs.data,
                defines: inputs.defines,
                output: inputs.output,
            },
        )?,
        Commands::Pdf { template, inputs } => commands::pdf::execute(
            &generator,
            commands::pdf::PdfArgs {
                template,
                data: inputs.data,
                defines: inputs.defines,
                output: inputs.output,
            },
        )?,
    };

    println!("{}", written.display());
    Ok(())
}
