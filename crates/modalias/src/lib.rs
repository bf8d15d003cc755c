//! # modalias
//!
//! Module request aliasing and search-path augmentation for module loaders.
//!
//! Import requests starting with a configured alias prefix are rewritten to
//! a directory before the host resolves them, and extra directories are
//! prepended to the list the host scans for bare module names.
//!
//! ## Overview
//!
//! - [`AliasTable`]: prefix → target directory, first match in sorted
//!   prefix order wins.
//! - [`SearchPathList`]: extra directories, prepended to the host's list for
//!   requests made outside `node_modules`.
//! - [`ModuleNode`] / [`propagate_search_dir`]: patching modules that were
//!   already loaded when a directory is added.
//! - [`ModuleHost`] / [`ResolutionHook`]: the host's original behavior and
//!   the replacement [`AliasResolver`] provides.
//!
//! ## Quick Start
//!
//! ```no_run
//! use modalias::{AliasOptions, ResolutionHook, ResolveOptions, StandardHost, alias};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads `aliases` from /proj/package.json
//! let options = AliasOptions::default().with_cwd("/proj");
//! let resolver = alias(StandardHost::new("/proj"), &options)?;
//!
//! let file = resolver.resolve_filename("@utils/format.js", None, false, &ResolveOptions::default())?;
//! println!("{}", file.display());
//! # Ok(())
//! # }
//! ```

pub mod alias;
pub mod error;
pub mod host;
pub mod module_tree;
pub mod normalize;
pub mod resolver;
pub mod search_path;
pub mod setup;

pub use alias::{AliasEntry, AliasTable};
pub use error::{AliasError, Result};
pub use host::{
    HostError, HostResult, ModuleHost, ResolutionHook, ResolveOptions, StandardHost,
};
pub use module_tree::{ModuleNode, ModuleRegistry, propagate_search_dir};
pub use resolver::AliasResolver;
pub use search_path::{SearchPathList, is_in_dependency_dir};
pub use setup::{ConfigureReport, SettingsStatus, alias};

pub use modalias_config::{AliasOptions, AliasSettings, ConfigError};
