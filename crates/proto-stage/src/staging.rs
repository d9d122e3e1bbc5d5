//! Timestamped output staging.
//!
//! Every run gets a fresh `output_<timestamp>` directory next to the scan
//! root. Discovered protos are copied in flat, under their base name only.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::StageError;

/// Default staging directory prefix.
pub const DEFAULT_PREFIX: &str = "output_";

/// What to do when two source files share a base name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Last copy wins; the overwrite is logged. Matches the historical
    /// behavior of the tool this replaces.
    #[default]
    Overwrite,
    /// Abort staging with an error naming both sources.
    Error,
}

/// Staging directory name for `now`: prefix + `%Y%m%d_%p%H%M%S`.
///
/// The AM/PM marker sits in front of a 24-hour clock, so afternoon runs read
/// like `PM143052`. Kept for name compatibility with prior runs.
pub fn timestamp_name(prefix: &str, now: DateTime<Local>) -> String {
    format!("{}{}", prefix, now.format("%Y%m%d_%p%H%M%S"))
}

/// Create the staging directory for this run under `root`.
///
/// Parents are created as needed, but the leaf must not already exist: a
/// rerun within the same second fails with `StagingDirExists` instead of
/// silently sharing the directory.
pub fn create_staging_dir(root: &Path, prefix: &str) -> Result<PathBuf, StageError> {
    let dir = root.join(timestamp_name(prefix, Local::now()));
    if let Some(parent) = dir.parent() {
        fs::create_dir_all(parent).map_err(|e| StageError::io_at(parent, e))?;
    }
    fs::create_dir(&dir).map_err(|e| {
        if e.kind() == std::io::ErrorKind::AlreadyExists {
            StageError::StagingDirExists(dir.clone())
        } else {
            StageError::io_at(&dir, e)
        }
    })?;
    info!("Created staging directory {}", dir.display());
    Ok(dir)
}

/// Copy `sources` into `dest` flat, byte-for-byte, under their base names.
///
/// Returns the staged paths, one per distinct base name. Collisions are
/// resolved per `policy`.
pub fn stage_files(
    sources: &[PathBuf],
    dest: &Path,
    policy: CollisionPolicy,
) -> Result<Vec<PathBuf>, StageError> {
    let mut staged = Vec::new();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    for source in sources {
        let name = match source.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => continue,
        };

        if let Some(first) = seen.get(&name) {
            match policy {
                CollisionPolicy::Error => {
                    return Err(StageError::NameCollision {
                        name,
                        first: first.clone(),
                        second: source.clone(),
                    });
                }
                CollisionPolicy::Overwrite => {
                    warn!(
                        "{} overwrites previously staged copy from {}",
                        source.display(),
                        first.display()
                    );
                }
            }
        }

        let target = dest.join(&name);
        fs::copy(source, &target).map_err(|e| StageError::io_at(source, e))?;
        if seen.insert(name, source.clone()).is_none() {
            staged.push(target);
        }
    }

    info!("Staged {} file(s) into {}", staged.len(), dest.display());
    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_timestamp_name_morning() {
        let now = Local.with_ymd_and_hms(2026, 8, 30, 9, 5, 7).unwrap();
        assert_eq!(timestamp_name("output_", now), "output_20260830_AM090507");
    }

    #[test]
    fn test_timestamp_name_afternoon_keeps_24h_clock() {
        let now = Local.with_ymd_and_hms(2026, 8, 30, 14, 30, 52).unwrap();
        assert_eq!(timestamp_name("output_", now), "output_20260830_PM143052");
    }

    #[test]
    fn test_create_staging_dir() {
        let root = TempDir::new().unwrap();
        let dir = create_staging_dir(root.path(), "output_").unwrap();
        assert!(dir.is_dir());
        assert!(dir
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("output_"));
    }

    #[test]
    fn test_create_staging_dir_same_second_errors() {
        let root = TempDir::new().unwrap();
        let first = create_staging_dir(root.path(), "output_").unwrap();
        // Second call within the same second computes the same name.
        match create_staging_dir(root.path(), "output_") {
            Err(StageError::StagingDirExists(path)) => assert_eq!(path, first),
            Ok(second) => {
                // Clock ticked over between the two calls; both runs must
                // still be isolated.
                assert_ne!(first, second);
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_stage_files_flattens_tree() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        write(&src.path().join("a/x.proto"), "package a;\n");
        write(&src.path().join("b/deep/y.proto"), "package b;\n");

        let sources = vec![src.path().join("a/x.proto"), src.path().join("b/deep/y.proto")];
        let staged = stage_files(&sources, dest.path(), CollisionPolicy::Overwrite).unwrap();

        assert_eq!(staged.len(), 2);
        assert!(dest.path().join("x.proto").is_file());
        assert!(dest.path().join("y.proto").is_file());
        assert_eq!(
            fs::read_to_string(dest.path().join("x.proto")).unwrap(),
            "package a;\n"
        );
    }

    #[test]
    fn test_stage_files_overwrite_last_wins() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        write(&src.path().join("a/x.proto"), "package one;\n");
        write(&src.path().join("b/x.proto"), "package two;\n");

        let sources = vec![src.path().join("a/x.proto"), src.path().join("b/x.proto")];
        let staged = stage_files(&sources, dest.path(), CollisionPolicy::Overwrite).unwrap();

        // One staged path per distinct base name.
        assert_eq!(staged.len(), 1);
        assert_eq!(
            fs::read_to_string(dest.path().join("x.proto")).unwrap(),
            "package two;\n"
        );
    }

    #[test]
    fn test_stage_files_error_policy_names_both_sources() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        write(&src.path().join("a/x.proto"), "package one;\n");
        write(&src.path().join("b/x.proto"), "package two;\n");

        let sources = vec![src.path().join("a/x.proto"), src.path().join("b/x.proto")];
        let err = stage_files(&sources, dest.path(), CollisionPolicy::Error).unwrap_err();

        match err {
            StageError::NameCollision { name, first, second } => {
                assert_eq!(name, "x.proto");
                assert!(first.ends_with("a/x.proto"));
                assert!(second.ends_with("b/x.proto"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_stage_files_missing_source_is_io_error() {
        let dest = TempDir::new().unwrap();
        let sources = vec![PathBuf::from("/no/such/x.proto")];
        let err = stage_files(&sources, dest.path(), CollisionPolicy::Overwrite).unwrap_err();
        assert!(matches!(err, StageError::Io { .. }));
    }

    #[test]
    fn test_stage_files_empty_is_noop() {
        let dest = TempDir::new().unwrap();
        let staged = stage_files(&[], dest.path(), CollisionPolicy::Overwrite).unwrap();
        assert!(staged.is_empty());
    }

    #[test]
    fn test_collision_policy_default_is_overwrite() {
        assert_eq!(CollisionPolicy::default(), CollisionPolicy::Overwrite);
    }
}
