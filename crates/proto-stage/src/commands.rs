//! Command implementations.
//!
//! Handles:
//! - stage: scan -> stage/copy -> patch -> compile -> banner
//! - list: expose the scanner on its own

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::compile::compile_staged;
use crate::config::Settings;
use crate::error::StageError;
use crate::patch::patch_file;
use crate::scan::{find_files_matching, find_files_named, FilePattern};
use crate::staging::{create_staging_dir, stage_files, CollisionPolicy};
use crate::style::{paint, Style};

/// File name pattern the stage pipeline scans for.
pub const PROTO_PATTERN: &str = "*.proto";

/// What a stage run produced.
#[derive(Debug)]
pub struct StageOutcome {
    /// The staging directory created for this run.
    pub staging_dir: PathBuf,
    /// Staged file paths, one per distinct base name.
    pub staged: Vec<PathBuf>,
    /// How many staged files received the option block.
    pub patched: usize,
}

/// Run the full pipeline rooted at `root`.
///
/// Linear flow: scan, create the staging directory, copy, patch, then run
/// both protoc passes unless `skip_compile` is set.
pub fn run_pipeline(
    settings: &Settings,
    root: &Path,
    skip_compile: bool,
) -> Result<StageOutcome, StageError> {
    let sources = find_files_matching(root, &FilePattern::new(PROTO_PATTERN));
    info!("Found {} proto file(s) under {}", sources.len(), root.display());

    let staging_dir = create_staging_dir(root, &settings.staging.prefix)?;
    let staged = stage_files(&sources, &staging_dir, settings.staging.on_collision)?;

    let mut patched = 0;
    for path in &staged {
        if patch_file(path)? {
            patched += 1;
        }
    }
    info!("Patched {patched} of {} staged file(s)", staged.len());

    if skip_compile {
        info!("Skipping protoc");
    } else {
        compile_staged(&settings.compile, &staging_dir, &staged)?;
    }

    Ok(StageOutcome {
        staging_dir,
        staged,
        patched,
    })
}

/// `stage` command: resolve settings, run the pipeline, print banners.
#[allow(clippy::too_many_arguments)]
pub fn handle_stage(
    config_path: Option<&Path>,
    root: Option<&Path>,
    protoc: Option<&Path>,
    output_prefix: Option<&str>,
    on_collision: Option<CollisionPolicy>,
    strict: bool,
    skip_compile: bool,
) -> Result<()> {
    let root = match root {
        Some(root) => root.to_path_buf(),
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    let mut settings = Settings::load(&root, config_path).context("Failed to load configuration")?;

    // CLI flags take precedence over the config file.
    if let Some(protoc) = protoc {
        settings.compile.protoc = protoc.to_path_buf();
    }
    if let Some(prefix) = output_prefix {
        settings.staging.prefix = prefix.to_string();
    }
    if let Some(policy) = on_collision {
        settings.staging.on_collision = policy;
    }
    if strict {
        settings.compile.strict = true;
    }

    println!("{}", paint(Style::Header, "🐵  making output..."));

    let outcome = run_pipeline(&settings, &root, skip_compile)?;

    println!(
        "{}",
        paint(
            Style::Green,
            format!(
                "staged {} file(s) into {}",
                outcome.staged.len(),
                outcome.staging_dir.display()
            ),
        )
    );
    println!("{}", paint(Style::Blue, "🍺  All done, have a nice day!"));
    Ok(())
}

/// `list` command: print matches one per line.
pub fn handle_list(root: Option<&Path>, pattern: &str, name: Option<&str>) -> Result<()> {
    let root = match root {
        Some(root) => root.to_path_buf(),
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    let found = match name {
        Some(name) => find_files_named(&root, name),
        None => find_files_matching(&root, &FilePattern::new(pattern)),
    };

    for path in &found {
        println!("{}", path.display());
    }
    info!("Listed {} file(s)", found.len());
    Ok(())
}
