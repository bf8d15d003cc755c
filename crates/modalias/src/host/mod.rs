//! Host module loader contract.
//!
//! A host is the module system being extended. [`ModuleHost`] is its original
//! behavior: computing the directory search list for a location, mapping a
//! request to a filename, and exposing the entry module. [`ResolutionHook`]
//! is the pair of capabilities a host calls instead of its originals once
//! aliasing is installed; implementations pre-process and then delegate.
//!
//! Whether a given loader can route its lookups through a hook is up to that
//! loader. Hosts written against this crate call the hook directly.

mod standard;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use standard::{StandardHost, node_module_paths};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::module_tree::ModuleNode;

pub type HostResult<T> = Result<T, HostError>;

/// Errors raised by a host while resolving. They pass through aliasing
/// untouched.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error(
        "Cannot find module '{request}'{}",
        parent.as_ref().map(|p| format!(" from '{}'", p.display())).unwrap_or_default()
    )]
    ModuleNotFound {
        request: String,
        parent: Option<PathBuf>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Host error: {0}")]
    Other(String),
}

/// Extra arguments to a filename resolution, passed through as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Explicit lookup directories overriding the parent's search paths.
    pub paths: Option<Vec<PathBuf>>,
}

/// The host's original resolution behavior.
pub trait ModuleHost: Send + Sync + std::fmt::Debug {
    /// Directory search list for requests made from `from`.
    fn node_module_paths(&self, from: &Path) -> Vec<PathBuf>;

    /// Map `request` to a filename.
    fn resolve_filename(
        &self,
        request: &str,
        parent: Option<&ModuleNode>,
        is_main: bool,
        options: &ResolveOptions,
    ) -> HostResult<PathBuf>;

    /// The entry module, once loaded.
    fn main_module(&self) -> Option<Arc<ModuleNode>>;
}

impl<H: ModuleHost + ?Sized> ModuleHost for Arc<H> {
    fn node_module_paths(&self, from: &Path) -> Vec<PathBuf> {
        (**self).node_module_paths(from)
    }

    fn resolve_filename(
        &self,
        request: &str,
        parent: Option<&ModuleNode>,
        is_main: bool,
        options: &ResolveOptions,
    ) -> HostResult<PathBuf> {
        (**self).resolve_filename(request, parent, is_main, options)
    }

    fn main_module(&self) -> Option<Arc<ModuleNode>> {
        (**self).main_module()
    }
}

/// Replacement for the host's two extension points.
pub trait ResolutionHook: Send + Sync {
    /// Replacement for [`ModuleHost::node_module_paths`].
    fn compute_search_paths(&self, from: &Path) -> Vec<PathBuf>;

    /// Replacement for [`ModuleHost::resolve_filename`].
    fn resolve_filename(
        &self,
        request: &str,
        parent: Option<&ModuleNode>,
        is_main: bool,
        options: &ResolveOptions,
    ) -> HostResult<PathBuf>;
}
