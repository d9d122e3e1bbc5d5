//! Error types for staging operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while staging and compiling proto files.
#[derive(Error, Debug)]
pub enum StageError {
    /// The timestamped staging directory already exists.
    ///
    /// Happens when two runs start within the same second; the run that
    /// loses the race fails rather than sharing a directory.
    #[error("Staging directory already exists: {0:?}")]
    StagingDirExists(PathBuf),

    /// Two source files share a base name under the `error` collision policy.
    #[error("File name collision on {name:?}: {first:?} and {second:?}")]
    NameCollision {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Configuration file not found or invalid.
    #[error("Configuration error at {path:?}: {message}")]
    Config {
        path: Option<PathBuf>,
        message: String,
    },

    /// IO error with the path that triggered it.
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A protoc invocation failed and strict mode is on.
    #[error("protoc failed: {0}")]
    Compile(String),
}

impl StageError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            path: None,
            message: message.into(),
        }
    }

    /// Create a configuration error with path context.
    pub fn config_at(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: Some(path.into()),
            message: message.into(),
        }
    }

    /// Create an IO error with path context.
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a compile error.
    pub fn compile(message: impl Into<String>) -> Self {
        Self::Compile(message.into())
    }
}
