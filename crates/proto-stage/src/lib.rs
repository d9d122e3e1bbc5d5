//! proto-stage library exports.
//!
//! Stages `.proto` files into a fresh timestamp-named directory, injects
//! `option optimize_for = LITE_RUNTIME;` after each file's first `package`
//! line, and runs protoc (Java pass plus the protoc-gen-bean plugin pass)
//! against the staged set.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (stage, list)
//! - `compile`: protoc invocation
//! - `config`: Layered settings (defaults -> proto-stage.toml -> CLI)
//! - `error`: Error types
//! - `patch`: LITE_RUNTIME option injection
//! - `scan`: Recursive file discovery
//! - `staging`: Timestamped output staging
//! - `style`: ANSI display styles

pub mod cli;
pub mod commands;
pub mod compile;
pub mod config;
pub mod error;
pub mod patch;
pub mod scan;
pub mod staging;
pub mod style;

pub use cli::{Cli, Commands};
pub use commands::{handle_list, handle_stage, run_pipeline, StageOutcome, PROTO_PATTERN};
pub use compile::{compile_staged, CompileSettings, ProtocInvocation, BUILD_DIR};
pub use config::{Settings, StagingSettings, CONFIG_FILE};
pub use error::StageError;
pub use patch::{insert_after_first, patch_file, patch_source, OPTION_LINE};
pub use scan::{find_files_matching, find_files_named, FilePattern};
pub use staging::{create_staging_dir, stage_files, timestamp_name, CollisionPolicy};
pub use style::{paint, Style};
