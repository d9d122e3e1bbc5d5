//! External protoc invocation.
//!
//! Two passes run against the staging directory: native Java bindings, then
//! the `protoc-gen-bean` plugin for value objects and converters. Each pass
//! is an explicit process boundary: exit status and stderr are captured, and
//! failures are reported as warnings unless strict mode is on.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::StageError;

/// Subdirectory of the staging directory receiving generated sources.
pub const BUILD_DIR: &str = "build";

/// Plugin executable loaded for the second pass.
const BEAN_PLUGIN: &str = "protoc-gen-bean";

/// Compiler settings, resolved from defaults, config file, and CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileSettings {
    /// Path to the protoc binary.
    #[serde(default = "default_protoc")]
    pub protoc: PathBuf,

    /// Java package for generated value objects.
    #[serde(default = "default_vo_package")]
    pub vo_package: String,

    /// Java package for generated converters.
    #[serde(default = "default_converter_package")]
    pub converter_package: String,

    /// When true, a failed invocation aborts the run instead of warning.
    #[serde(default)]
    pub strict: bool,
}

fn default_protoc() -> PathBuf {
    PathBuf::from("./protoc")
}

fn default_vo_package() -> String {
    "vo".to_string()
}

fn default_converter_package() -> String {
    "protobuf.converter".to_string()
}

impl Default for CompileSettings {
    fn default() -> Self {
        Self {
            protoc: default_protoc(),
            vo_package: default_vo_package(),
            converter_package: default_converter_package(),
            strict: false,
        }
    }
}

/// A fully-built protoc command line, ready to spawn.
#[derive(Debug)]
pub struct ProtocInvocation {
    /// Short label used in logs ("java" or "bean").
    pub label: &'static str,
    program: PathBuf,
    args: Vec<String>,
}

impl ProtocInvocation {
    /// Native Java bindings pass: `--java_out=<build>`.
    pub fn java(settings: &CompileSettings, staging: &Path, protos: &[PathBuf]) -> Self {
        let mut args = vec![
            format!("--java_out={}", staging.join(BUILD_DIR).display()),
            format!("-I={}", staging.display()),
        ];
        args.extend(protos.iter().map(|p| p.display().to_string()));
        Self {
            label: "java",
            program: settings.protoc.clone(),
            args,
        }
    }

    /// Plugin pass: `--bean_out=vopackage=<vo>,cvtpackage=<cvt>:<build>`.
    pub fn bean(settings: &CompileSettings, staging: &Path, protos: &[PathBuf]) -> Self {
        let mut args = vec![
            format!("-I={}", staging.display()),
            format!("--plugin={BEAN_PLUGIN}"),
            format!(
                "--bean_out=vopackage={},cvtpackage={}:{}",
                settings.vo_package,
                settings.converter_package,
                staging.join(BUILD_DIR).display()
            ),
        ];
        args.extend(protos.iter().map(|p| p.display().to_string()));
        Self {
            label: "bean",
            program: settings.protoc.clone(),
            args,
        }
    }

    /// The argument vector, for inspection and logging.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Run the invocation, capturing exit status and stderr.
    ///
    /// Returns an error string describing the failure, or `None` on success.
    pub fn run(&self) -> Option<String> {
        debug!("Running {} {}", self.program.display(), self.args.join(" "));
        match Command::new(&self.program).args(&self.args).output() {
            Ok(output) if output.status.success() => {
                info!("protoc {} pass succeeded", self.label);
                None
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Some(format!(
                    "{} pass: {}: {}",
                    self.label,
                    output.status,
                    stderr.trim()
                ))
            }
            Err(e) => Some(format!(
                "{} pass: failed to launch {}: {}",
                self.label,
                self.program.display(),
                e
            )),
        }
    }
}

/// Run both protoc passes over the staged protos.
///
/// Creates `<staging>/build` first. With no staged protos both passes are
/// skipped. Failures warn by default and only abort under `strict`.
pub fn compile_staged(
    settings: &CompileSettings,
    staging: &Path,
    protos: &[PathBuf],
) -> Result<(), StageError> {
    let build = staging.join(BUILD_DIR);
    std::fs::create_dir_all(&build).map_err(|e| StageError::io_at(&build, e))?;

    if protos.is_empty() {
        debug!("No staged protos, skipping protoc");
        return Ok(());
    }

    for invocation in [
        ProtocInvocation::java(settings, staging, protos),
        ProtocInvocation::bean(settings, staging, protos),
    ] {
        if let Some(failure) = invocation.run() {
            if settings.strict {
                return Err(StageError::compile(failure));
            }
            warn!("protoc {failure}");
        }
    }

    Ok(())
}
