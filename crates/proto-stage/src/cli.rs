//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::staging::CollisionPolicy;

/// proto-stage
///
/// Stages `.proto` files into a fresh timestamped directory, injects
/// `option optimize_for = LITE_RUNTIME;` into each copy, and runs protoc
/// against the staged set.
#[derive(Parser, Debug)]
#[command(name = "proto-stage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides <root>/proto-stage.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Tool commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan, stage, patch, and compile proto files
    Stage {
        /// Root directory to scan (default: current directory)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Path to the protoc binary
        #[arg(long)]
        protoc: Option<PathBuf>,

        /// Prefix for the staging directory name
        #[arg(long)]
        output_prefix: Option<String>,

        /// Policy when two protos share a base name
        #[arg(long, value_enum)]
        on_collision: Option<CollisionPolicy>,

        /// Fail the run on any protoc error instead of warning
        #[arg(long)]
        strict: bool,

        /// Stage and patch only, skip protoc entirely
        #[arg(long)]
        skip_compile: bool,
    },

    /// List files found by the scanner, one path per line
    List {
        /// Root directory to scan (default: current directory)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Shell-style file name pattern
        #[arg(short, long, default_value = "*.proto", conflicts_with = "name")]
        pattern: String,

        /// Exact file name to look for instead of a pattern
        #[arg(short, long)]
        name: Option<String>,
    },
}
