//! File-based settings loading.
//!
//! The settings file is located by joining a root directory with a filename.
//! TOML files are recognized by extension; anything else is read as JSON.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::options::join_under;
use crate::settings::AliasSettings;

/// Settings document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    Json,
    Toml,
}

impl SettingsFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => SettingsFormat::Toml,
            _ => SettingsFormat::Json,
        }
    }
}

/// Loads [`AliasSettings`] relative to a root directory.
///
/// # Example
///
/// ```no_run
/// use modalias_config::SettingsLoader;
///
/// let loader = SettingsLoader::new("/proj");
/// let settings = loader.load("package.json").unwrap();
/// for (name, target) in settings.aliases() {
///     println!("{name} -> {target}");
/// }
/// ```
pub struct SettingsLoader {
    root: PathBuf,
}

impl SettingsLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Where `file` is looked up. A leading separator on `file` does not
    /// take it outside the root.
    pub fn path_for(&self, file: &str) -> PathBuf {
        join_under(&self.root, file)
    }

    /// Load and parse `file` under the root.
    ///
    /// # Errors
    ///
    /// `ConfigError::NotFound` when the file is absent, `ConfigError::Malformed`
    /// when it cannot be parsed into settings.
    pub fn load(&self, file: &str) -> Result<AliasSettings> {
        load_settings(&self.path_for(file))
    }
}

/// Load settings from an explicit path.
pub fn load_settings(path: &Path) -> Result<AliasSettings> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(ConfigError::Io(e)),
    };

    tracing::debug!(path = %path.display(), "read settings file");
    parse_settings(path, &content)
}

fn parse_settings(path: &Path, content: &str) -> Result<AliasSettings> {
    let malformed = |message: String| ConfigError::Malformed {
        path: path.to_path_buf(),
        message,
    };

    let value: Value = match SettingsFormat::from_path(path) {
        SettingsFormat::Toml => {
            let toml_val: toml::Value = toml::from_str(content)
                .map_err(|e| malformed(format!("invalid TOML syntax: {e}")))?;
            serde_json::to_value(toml_val)
                .map_err(|e| malformed(format!("TOML to JSON conversion failed: {e}")))?
        }
        SettingsFormat::Json => serde_json::from_str(content)
            .map_err(|e| malformed(format!("invalid JSON: {e}")))?,
    };

    if !value.is_object() {
        return Err(malformed("settings must be an object".to_string()));
    }

    AliasSettings::from_value(value).map_err(|e| malformed(e.to_string()))
}
