//! Single-file executable packaging.
//!
//! Drives `cargo build` with a fixed argument list and copies the release
//! binary into `dist/`. The page templates and static assets are compiled
//! into that binary (see [`crate::assets`]), so the one file is all a user
//! needs. Cargo's own output is passed through untouched.

use std::{
    env::consts::EXE_SUFFIX,
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
    process::Command,
};
use tracing::info;

use crate::assets::DATA_DIRS;
use crate::error::PackageError;

/// Name of the produced executable.
pub const APP_NAME: &str = "tetsuocode";

/// The build tool: the `cargo` running us if there is one, else from `PATH`.
pub fn bundler() -> OsString {
    std::env::var_os("CARGO").unwrap_or_else(|| OsString::from("cargo"))
}

/// Paths for one packaging run, all derived from the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    root: PathBuf,
}

impl Bundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Bundle { root: root.into() }
    }

    /// Bundle rooted at this crate's source tree.
    pub fn from_source_tree() -> Self {
        Bundle::new(env!("CARGO_MANIFEST_DIR"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> PathBuf {
        self.root.join("Cargo.toml")
    }

    /// Source of the launcher binary.
    pub fn entry_point(&self) -> PathBuf {
        self.root.join("src").join("main.rs")
    }

    /// Asset directories compiled into the executable.
    pub fn data_dirs(&self) -> Vec<PathBuf> {
        DATA_DIRS.iter().map(|dir| self.root.join(dir)).collect()
    }

    pub fn dist_dir(&self) -> PathBuf {
        self.root.join("dist")
    }

    /// Cargo target directory for packaging builds.
    pub fn build_dir(&self) -> PathBuf {
        self.root.join("build")
    }

    /// Where cargo leaves the release binary.
    pub fn built_executable(&self) -> PathBuf {
        self.build_dir()
            .join("release")
            .join(format!("{}{}", APP_NAME, EXE_SUFFIX))
    }

    /// The packaged executable.
    pub fn output_executable(&self) -> PathBuf {
        self.dist_dir().join(format!("{}{}", APP_NAME, EXE_SUFFIX))
    }

    /// The full build argument list, in order.
    pub fn args(&self) -> Vec<OsString> {
        vec![
            "build".into(),
            "--release".into(),
            "--bin".into(),
            APP_NAME.into(),
            "--manifest-path".into(),
            self.manifest().into(),
            "--target-dir".into(),
            self.build_dir().into(),
        ]
    }

    /// Checks that the manifest, entry point and asset directories exist.
    pub fn verify_sources(&self) -> Result<(), PackageError> {
        let files = [self.manifest(), self.entry_point()];
        if let Some(missing) = files.into_iter().find(|path| !path.is_file()) {
            return Err(PackageError::MissingSource(missing));
        }
        match self.data_dirs().into_iter().find(|dir| !dir.is_dir()) {
            Some(missing) => Err(PackageError::MissingSource(missing)),
            None => Ok(()),
        }
    }

    /// Builds the release binary and places it in `dist/`.
    ///
    /// A previous output is removed first and replaced without asking.
    pub fn run(&self) -> Result<PathBuf, PackageError> {
        self.verify_sources()?;

        let output = self.output_executable();
        if output.exists() {
            fs::remove_file(&output).map_err(|source| PackageError::Output {
                path: output.clone(),
                source,
            })?;
        }

        let tool = bundler();
        let tool_name = tool.to_string_lossy().into_owned();
        info!("Running {} for {}", tool_name, self.entry_point().display());
        let status = Command::new(&tool)
            .args(self.args())
            .status()
            .map_err(|source| PackageError::Spawn {
                tool: tool_name.clone(),
                source,
            })?;
        if !status.success() {
            return Err(PackageError::Failed {
                tool: tool_name,
                status,
            });
        }

        let dist = self.dist_dir();
        fs::create_dir_all(&dist).map_err(|source| PackageError::Output {
            path: dist.clone(),
            source,
        })?;
        fs::copy(self.built_executable(), &output).map_err(|source| PackageError::Output {
            path: output.clone(),
            source,
        })?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_as_strings(bundle: &Bundle) -> Vec<String> {
        bundle
            .args()
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect()
    }

    #[test]
    #[cfg(not(windows))]
    fn test_full_argument_list() {
        let bundle = Bundle::new("/proj");
        assert_eq!(
            args_as_strings(&bundle),
            vec![
                "build",
                "--release",
                "--bin",
                "tetsuocode",
                "--manifest-path",
                "/proj/Cargo.toml",
                "--target-dir",
                "/proj/build",
            ]
        );
        assert_eq!(
            bundle.built_executable(),
            PathBuf::from("/proj/build/release/tetsuocode")
        );
        assert_eq!(bundle.output_executable(), PathBuf::from("/proj/dist/tetsuocode"));
    }

    #[test]
    fn test_source_tree_has_every_input() {
        let bundle = Bundle::from_source_tree();
        assert_eq!(bundle.root(), Path::new(env!("CARGO_MANIFEST_DIR")));
        assert!(bundle.entry_point().is_file());
        assert!(bundle.manifest().is_file());
        for dir in bundle.data_dirs() {
            assert!(dir.is_dir(), "{} should exist", dir.display());
        }
        bundle.verify_sources().unwrap();
    }

    #[test]
    fn test_missing_sources_stop_before_building() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = Bundle::new(dir.path());
        match bundle.run() {
            Err(PackageError::MissingSource(path)) => assert_eq!(path, bundle.manifest()),
            other => panic!("expected MissingSource, got {:?}", other),
        }
        assert!(!bundle.dist_dir().exists());
    }

    #[test]
    fn test_missing_asset_dir_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Cargo.toml"), "").unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/main.rs"), "fn main() {}").unwrap();
        std::fs::create_dir_all(dir.path().join("web/templates")).unwrap();

        match Bundle::new(dir.path()).verify_sources() {
            Err(PackageError::MissingSource(path)) => {
                assert_eq!(path, dir.path().join("web/static"))
            }
            other => panic!("expected MissingSource, got {:?}", other),
        }
    }
}
