//! proto-stage binary.
//!
//! # Usage
//!
//! ```bash
//! proto-stage stage [--root PATH] [--protoc PATH] [--strict] [--skip-compile]
//! proto-stage list [--root PATH] [--pattern GLOB | --name NAME]
//! ```
//!
//! # Configuration
//!
//! Settings are loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (<root>/proto-stage.toml, or --config PATH)
//! 3. CLI flags

use anyhow::{Context, Result};
use clap::Parser;

use proto_stage::{handle_list, handle_stage, Cli, Commands};

fn init_logging(log_level: Option<&str>) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(log_level.unwrap_or("info"))
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    match cli.command {
        Commands::Stage {
            root,
            protoc,
            output_prefix,
            on_collision,
            strict,
            skip_compile,
        } => {
            handle_stage(
                cli.config.as_deref(),
                root.as_deref(),
                protoc.as_deref(),
                output_prefix.as_deref(),
                on_collision,
                strict,
                skip_compile,
            )?;
        }
        Commands::List {
            root,
            pattern,
            name,
        } => {
            handle_list(root.as_deref(), &pattern, name.as_deref())?;
        }
    }

    Ok(())
}
