//! Options accepted by the alias entry point.
//!
//! Options are layered with Figment: built-in defaults first, then
//! `MODALIAS_`-prefixed environment variables. Callers holding explicit
//! values (CLI flags, programmatic use) merge them on top with
//! [`AliasOptions::merge`].

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use path_clean::PathClean;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConfigError, Result};

/// Settings file read when none is configured.
pub const DEFAULT_SETTINGS_FILE: &str = "package.json";

/// Conventional dependency directory. Host resolution already covers it, so
/// it is never registered as an extra search directory, and requests made
/// from inside it never see the extra directories.
pub const DEPENDENCY_DIR: &str = "node_modules";

/// Prefix for environment overrides (`MODALIAS_CWD`, `MODALIAS_FILE`,
/// `MODALIAS_MODULES_DIR`).
pub const ENV_PREFIX: &str = "MODALIAS_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasOptions {
    /// Root directory for settings lookup and relative targets.
    /// Defaults to the process working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,

    /// Extra module directories, relative to `cwd`.
    #[serde(
        default,
        alias = "modules_dir",
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub modules_dir: Vec<String>,

    /// Settings filename, relative to `cwd`. Defaults to `package.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl AliasOptions {
    /// Load options from defaults and the environment.
    pub fn load() -> Result<Self> {
        Self::figment()
            .extract()
            .map_err(|e| ConfigError::InvalidValue {
                field: "options".to_string(),
                hint: Some(e.to_string()),
            })
    }

    /// The provider stack behind [`AliasOptions::load`].
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(AliasOptions::default()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Overlay `other` on top of `self`. Set fields in `other` win; a
    /// non-empty `modules_dir` replaces the current list.
    pub fn merge(mut self, other: AliasOptions) -> Self {
        if other.cwd.is_some() {
            self.cwd = other.cwd;
        }
        if other.file.is_some() {
            self.file = other.file;
        }
        if !other.modules_dir.is_empty() {
            self.modules_dir = other.modules_dir;
        }
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_modules_dir<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules_dir = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Effective root directory, always absolute.
    ///
    /// An absolute `cwd` is used as given. A relative one is taken against
    /// the process working directory and cleaned; no `cwd` at all means the
    /// process working directory itself.
    ///
    /// # Errors
    ///
    /// `ConfigError::Io` when the process working directory is needed and
    /// cannot be read.
    ///
    /// # Examples
    ///
    /// ```
    /// use modalias_config::AliasOptions;
    ///
    /// let opts = AliasOptions::default().with_cwd("proj/./app");
    /// let cwd = opts.resolved_cwd().unwrap();
    /// assert!(cwd.is_absolute());
    /// assert!(cwd.ends_with("proj/app"));
    /// ```
    pub fn resolved_cwd(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(cwd) if cwd.is_absolute() => Ok(cwd.clone()),
            Some(cwd) => Ok(std::env::current_dir()?.join(cwd).clean()),
            None => Ok(std::env::current_dir()?),
        }
    }

    /// Effective settings filename.
    pub fn settings_file(&self) -> &str {
        self.file
            .as_deref()
            .filter(|f| !f.is_empty())
            .unwrap_or(DEFAULT_SETTINGS_FILE)
    }

    /// Full path of the settings file (`cwd` joined with the filename).
    pub fn settings_path(&self) -> Result<PathBuf> {
        Ok(join_under(&self.resolved_cwd()?, self.settings_file()))
    }
}

/// Join `rel` under `root` even when `rel` starts with a separator.
///
/// `Path::join` replaces the base with an absolute argument; settings
/// filenames and module directories are always read relative to the root,
/// so `/shared` under `/proj` is `/proj/shared`.
///
/// # Examples
///
/// ```
/// use modalias_config::join_under;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(join_under(Path::new("/proj"), "/shared"), PathBuf::from("/proj/shared"));
/// assert_eq!(join_under(Path::new("/proj"), "shared"), PathBuf::from("/proj/shared"));
/// ```
pub fn join_under(root: &Path, rel: &str) -> PathBuf {
    root.join(rel.trim_start_matches(|c| c == '/' || c == MAIN_SEPARATOR))
}

// Environment values arrive as a single string; accept a comma-separated
// list there and a real sequence everywhere else.
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        OneOrMany::Many(v) => v,
    })
}
