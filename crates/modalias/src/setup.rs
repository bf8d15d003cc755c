//! Load-and-register: reading options and settings into a resolver.

use std::path::PathBuf;

use modalias_config::{AliasOptions, DEPENDENCY_DIR, SettingsLoader, join_under};

use crate::error::Result;
use crate::host::ModuleHost;
use crate::resolver::AliasResolver;

/// What happened to the settings file during [`AliasResolver::configure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsStatus {
    Loaded,
    /// Absent; aliasing is disabled for this run.
    NotFound,
    /// Present but unusable; aliasing is disabled for this run.
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureReport {
    pub cwd: PathBuf,
    pub settings_file: PathBuf,
    pub settings: SettingsStatus,
    pub aliases_registered: usize,
    pub search_dirs_added: usize,
}

impl<H: ModuleHost> AliasResolver<H> {
    /// Read the settings file named by `options` and register its aliases,
    /// then register the extra module directories.
    ///
    /// Relative alias targets and every module directory are taken under
    /// the resolved `cwd`, which is always absolute. Module directories from
    /// `options` are registered before those listed in the settings file.
    ///
    /// # Errors
    ///
    /// A missing settings file logs a warning and a malformed one is skipped
    /// quietly; module directories are registered either way. Only failing
    /// to determine the working directory is an error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use modalias::{AliasOptions, AliasResolver, SettingsStatus, StandardHost};
    ///
    /// let resolver = AliasResolver::new(StandardHost::new("/proj"));
    /// let report = resolver
    ///     .configure(&AliasOptions::default().with_cwd("/proj").with_modules_dir(["shared"]))
    ///     .unwrap();
    /// if report.settings == SettingsStatus::NotFound {
    ///     eprintln!("no aliases configured");
    /// }
    /// ```
    pub fn configure(&self, options: &AliasOptions) -> Result<ConfigureReport> {
        let cwd = options.resolved_cwd()?;
        let file = options.settings_file();
        let loader = SettingsLoader::new(&cwd);
        let settings_file = loader.path_for(file);

        let mut report = ConfigureReport {
            cwd: cwd.clone(),
            settings_file,
            settings: SettingsStatus::Loaded,
            aliases_registered: 0,
            search_dirs_added: 0,
        };

        let settings = match loader.load(file) {
            Ok(settings) => Some(settings),
            Err(err) if err.is_not_found() => {
                tracing::warn!("Unable to find {file}");
                report.settings = SettingsStatus::NotFound;
                None
            }
            Err(err) => {
                tracing::debug!(error = %err, "ignoring unusable settings file");
                report.settings = SettingsStatus::Malformed(err.to_string());
                None
            }
        };

        let mut settings_dirs = Vec::new();
        if let Some(settings) = settings {
            if !settings.has_aliases() {
                tracing::debug!(file, "settings file has no aliases");
            }
            for (name, target) in settings.aliases() {
                if name.is_empty() {
                    tracing::warn!(alias_target = target, "skipping alias with an empty name");
                    continue;
                }
                self.register_alias(name, target, &cwd)?;
                report.aliases_registered += 1;
            }
            settings_dirs = settings.modules_dir;
        }

        for dir in options.modules_dir.iter().chain(settings_dirs.iter()) {
            if dir == DEPENDENCY_DIR {
                continue;
            }
            if self.add_search_dir(join_under(&cwd, dir)) {
                report.search_dirs_added += 1;
            }
        }

        tracing::debug!(
            aliases = report.aliases_registered,
            search_dirs = report.search_dirs_added,
            "alias configuration applied"
        );
        Ok(report)
    }
}

/// Build a resolver over `host` and configure it from `options`.
///
/// # Example
///
/// ```no_run
/// use modalias::{AliasOptions, StandardHost, alias};
///
/// let options = AliasOptions::default().with_cwd("/proj").with_modules_dir(["shared"]);
/// let resolver = alias(StandardHost::new("/proj"), &options).unwrap();
/// println!("{:?}", resolver.search_dirs());
/// ```
pub fn alias<H: ModuleHost>(host: H, options: &AliasOptions) -> Result<AliasResolver<H>> {
    let resolver = AliasResolver::new(host);
    resolver.configure(options)?;
    Ok(resolver)
}
