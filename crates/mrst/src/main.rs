//! mrst CLI - annotated-source documentation generator.
//!
//! Provides commands for:
//! - `generate`: Assemble `.mrst` templates into a reStructuredText tree
//! - `build`: Generate, then run `sphinx-build`
//! - `render`: Assemble a single template to stdout or a file

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, GenerateArgs, RenderArgs};
use output::Output;

/// mrst - Generates reStructuredText from annotated sources.
#[derive(Parser, Debug)]
#[command(name = "mrst", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate reStructuredText sources without building the site.
    Generate(GenerateArgs),
    /// Generate sources and build the site with Sphinx.
    Build(BuildArgs),
    /// Assemble a single template.
    Render(RenderArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Generate(args) => args.common.verbose,
            Self::Build(args) => args.common.verbose,
            Self::Render(args) => args.common.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Generate(args) => args.execute(),
        Commands::Build(args) => args.execute(),
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
