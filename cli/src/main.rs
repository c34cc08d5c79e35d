#![deny(missing_docs)]

//! # oapigen CLI
//!
//! Command Line Interface for the OpenAPI declaration model compiler.
//!
//! Supported Commands:
//! - `model`: OpenAPI `components.schemas` -> declaration model (JSON / YAML).
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `warn`).

use clap::{Parser, Subcommand};
use oapigen_core::AppResult;
use tracing_subscriber::EnvFilter;

mod model_gen;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI model compiler")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile components.schemas into the declaration model.
    Model(model_gen::ModelArgs),
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Model(args) => model_gen::execute(args)?,
    }

    Ok(())
}
