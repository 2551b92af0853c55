//! Launch settings and the `.tetsuorc` config file.
//!
//! Credentials come from three layers, highest precedence first:
//! command-line arguments, the process environment, and the per-workspace
//! `.tetsuorc` file. An empty argument or config value counts as absent. An
//! environment variable that is set, even to an empty string, keeps the
//! config file from supplying that credential.

use serde::Deserialize;
use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::error::ConfigError;

/// File name of the per-workspace config file.
pub const RC_FILE_NAME: &str = ".tetsuorc";

/// Environment variable holding the access password.
pub const PASSWORD_ENV: &str = "TETSUO_PASSWORD";
/// Environment variable holding the xAI API key.
pub const API_KEY_ENV: &str = "XAI_API_KEY";

/// Contents of a `.tetsuorc` file. Unknown keys are ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct RcFile {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Path of the config file inside `workspace`.
pub fn rc_path(workspace: &Path) -> PathBuf {
    workspace.join(RC_FILE_NAME)
}

/// Reads `<workspace>/.tetsuorc`.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load_rc(workspace: &Path) -> Result<Option<RcFile>, ConfigError> {
    let path = rc_path(workspace);
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(&path)?;
    Ok(Some(serde_json::from_str(&text)?))
}

/// Where a credential value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Argument,
    Environment,
    ConfigFile,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::Argument => "command line",
            Source::Environment => "environment",
            Source::ConfigFile => RC_FILE_NAME,
        };
        f.write_str(name)
    }
}

/// A resolved credential and its origin.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub value: String,
    pub source: Source,
}

// Keep secrets out of debug output and logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("value", &"***")
            .field("source", &self.source)
            .finish()
    }
}

/// Picks the highest-precedence value.
///
/// The config file only fills a credential whose environment variable is
/// unset. A set-but-empty variable wins and yields no credential.
pub fn resolve_credential(
    arg: Option<&str>,
    env: Option<String>,
    rc: Option<&str>,
) -> Option<Credential> {
    if let Some(value) = arg.filter(|v| !v.is_empty()) {
        return Some(Credential {
            value: value.to_string(),
            source: Source::Argument,
        });
    }
    if let Some(value) = env {
        return (!value.is_empty()).then_some(Credential {
            value,
            source: Source::Environment,
        });
    }
    rc.filter(|v| !v.is_empty()).map(|value| Credential {
        value: value.to_string(),
        source: Source::ConfigFile,
    })
}

/// Finalized configuration handed to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub workspace: PathBuf,
    pub password: Option<Credential>,
    pub api_key: Option<Credential>,
}

impl Settings {
    /// Merges arguments, environment and config file into settings.
    ///
    /// `env` looks up a variable by name; pass `|k| std::env::var(k).ok()`
    /// for the real process environment.
    pub fn merge<F>(
        workspace: PathBuf,
        password_arg: &str,
        api_key_arg: &str,
        env: F,
        rc: Option<&RcFile>,
    ) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let rc_password = rc.and_then(|rc| rc.password.as_deref());
        let rc_api_key = rc.and_then(|rc| rc.api_key.as_deref());

        Settings {
            workspace,
            password: resolve_credential(Some(password_arg), env(PASSWORD_ENV), rc_password),
            api_key: resolve_credential(Some(api_key_arg), env(API_KEY_ENV), rc_api_key),
        }
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().map(|c| c.value.as_str())
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|c| c.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn rc(api_key: Option<&str>, password: Option<&str>) -> RcFile {
        RcFile {
            api_key: api_key.map(String::from),
            password: password.map(String::from),
        }
    }

    #[test]
    fn test_argument_beats_config_file() {
        let file = rc(Some("from-file"), None);
        let settings = Settings::merge(PathBuf::from("/ws"), "", "from-arg", no_env, Some(&file));
        let key = settings.api_key.unwrap();
        assert_eq!(key.value, "from-arg");
        assert_eq!(key.source, Source::Argument);
    }

    #[test]
    fn test_config_file_used_without_argument() {
        let file = rc(Some("X"), Some("pw"));
        let settings = Settings::merge(PathBuf::from("/ws"), "", "", no_env, Some(&file));
        assert_eq!(settings.api_key(), Some("X"));
        assert_eq!(settings.password(), Some("pw"));
        assert_eq!(settings.password.unwrap().source, Source::ConfigFile);
    }

    #[test]
    fn test_environment_beats_config_file() {
        let file = rc(Some("from-file"), None);
        let env = |k: &str| (k == API_KEY_ENV).then(|| "from-env".to_string());
        let settings = Settings::merge(PathBuf::from("/ws"), "", "", env, Some(&file));
        let key = settings.api_key.unwrap();
        assert_eq!(key.value, "from-env");
        assert_eq!(key.source, Source::Environment);
    }

    #[test]
    fn test_argument_beats_environment() {
        let env = |k: &str| (k == PASSWORD_ENV).then(|| "from-env".to_string());
        let settings = Settings::merge(PathBuf::from("/ws"), "from-arg", "", env, None);
        assert_eq!(settings.password(), Some("from-arg"));
    }

    #[test]
    fn test_empty_argument_and_config_values_are_absent() {
        let file = rc(Some(""), Some(""));
        let settings = Settings::merge(PathBuf::from("/ws"), "", "", no_env, Some(&file));
        assert!(settings.api_key.is_none());
        assert!(settings.password.is_none());
    }

    #[test]
    fn test_empty_argument_falls_through_to_config_file() {
        let file = rc(Some("from-file"), None);
        let settings = Settings::merge(PathBuf::from("/ws"), "", "", no_env, Some(&file));
        assert_eq!(settings.api_key(), Some("from-file"));
    }

    #[test]
    fn test_set_but_empty_environment_blocks_config_file() {
        let file = rc(Some("from-file"), Some("pw-file"));
        let env = |k: &str| (k == API_KEY_ENV).then(String::new);
        let settings = Settings::merge(PathBuf::from("/ws"), "", "", env, Some(&file));
        assert!(settings.api_key.is_none());
        assert_eq!(settings.password(), Some("pw-file"));
    }

    #[test]
    fn test_argument_beats_empty_environment() {
        let env = |_: &str| Some(String::new());
        let settings = Settings::merge(PathBuf::from("/ws"), "", "from-arg", env, None);
        assert_eq!(settings.api_key(), Some("from-arg"));
    }

    #[test]
    fn test_load_rc_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_rc(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_rc_parses_known_keys() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            rc_path(dir.path()),
            r#"{"api_key": "xai-1", "password": "pw", "theme": "dark"}"#,
        )
        .unwrap();
        let file = load_rc(dir.path()).unwrap().unwrap();
        assert_eq!(file, rc(Some("xai-1"), Some("pw")));
    }

    #[test]
    fn test_load_rc_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(rc_path(dir.path()), "{not json").unwrap();
        assert!(matches!(load_rc(dir.path()), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_credential_debug_hides_value() {
        let cred = Credential {
            value: "secret".to_string(),
            source: Source::Argument,
        };
        assert!(!format!("{:?}", cred).contains("secret"));
    }
}
