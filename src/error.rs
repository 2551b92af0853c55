//! Error types for the launcher.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Failure to read or parse a `.tetsuorc` file.
///
/// Never fatal: the launcher reports it and carries on without the file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that stop the launcher.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to determine current directory: {0}")]
    CurrentDir(#[source] io::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

/// Errors from the packaging step.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("missing build input {}", .0.display())]
    MissingSource(PathBuf),

    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} exited with {status}")]
    Failed {
        tool: String,
        status: std::process::ExitStatus,
    },

    #[error("failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
