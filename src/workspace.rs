//! Workspace directory resolution.

use std::path::{Path, PathBuf};

use crate::error::LaunchError;

/// Resolves the workspace argument to an absolute directory.
///
/// Falls back to the current directory when no path is given. The path is
/// made absolute lexically, so symlinks are kept as the caller wrote them.
pub fn resolve_workspace(arg: Option<&Path>) -> Result<PathBuf, LaunchError> {
    let raw = match arg {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().map_err(LaunchError::CurrentDir)?,
    };

    let absolute = std::path::absolute(&raw).map_err(LaunchError::CurrentDir)?;
    if !absolute.is_dir() {
        return Err(LaunchError::NotADirectory(absolute));
    }
    Ok(absolute)
}
