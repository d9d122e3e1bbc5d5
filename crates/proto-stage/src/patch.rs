//! LITE_RUNTIME option injection.
//!
//! Each staged proto gets `option optimize_for = LITE_RUNTIME;` inserted
//! immediately after its first `package` line. The transform is a pure
//! function over lines; file IO lives in a thin wrapper.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::StageError;

/// The option line injected into every staged proto.
pub const OPTION_LINE: &str = "option optimize_for = LITE_RUNTIME;";

/// Insert `block` immediately after the first line satisfying `predicate`.
///
/// All other lines pass through unchanged. If no line matches, the output
/// equals the input.
pub fn insert_after_first<P>(lines: &[&str], predicate: P, block: &[&str]) -> Vec<String>
where
    P: Fn(&str) -> bool,
{
    let mut out = Vec::with_capacity(lines.len() + block.len());
    let mut inserted = false;
    for &line in lines {
        out.push(line.to_string());
        if !inserted && predicate(line) {
            out.extend(block.iter().map(|b| (*b).to_string()));
            inserted = true;
        }
    }
    out
}

/// Apply the LITE_RUNTIME insertion to a proto source as text.
///
/// Returns `None` when the source contains no `package` line, in which case
/// the caller should leave the file byte-identical.
pub fn patch_source(source: &str) -> Option<String> {
    if !source.contains("package") {
        return None;
    }
    // Splitting on '\n' keeps a trailing empty segment for files ending in a
    // newline, so the join below reproduces the original byte-for-byte
    // outside the inserted block.
    let lines: Vec<&str> = source.split('\n').collect();
    let patched = insert_after_first(&lines, |line| line.contains("package"), &["", OPTION_LINE]);
    Some(patched.join("\n"))
}

/// Rewrite a staged file in place, injecting the option block.
///
/// Returns whether the file was modified. A file without a `package` line is
/// left untouched.
pub fn patch_file(path: &Path) -> Result<bool, StageError> {
    let source = fs::read_to_string(path).map_err(|e| StageError::io_at(path, e))?;
    match patch_source(&source) {
        Some(patched) => {
            fs::write(path, patched).map_err(|e| StageError::io_at(path, e))?;
            debug!("Patched {}", path.display());
            Ok(true)
        }
        None => {
            debug!("No package line in {}, left unmodified", path.display());
            Ok(false)
        }
    }
}
