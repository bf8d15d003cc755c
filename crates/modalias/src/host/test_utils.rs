//! In-memory host for tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use path_clean::PathClean;
use rustc_hash::FxHashSet;

use super::{HostError, HostResult, ModuleHost, ResolveOptions, node_module_paths};
use crate::module_tree::{ModuleNode, ModuleRegistry};

/// Host backed by a set of known filenames. Records every request it is
/// asked to resolve.
#[derive(Debug, Default)]
pub struct MockHost {
    modules: ModuleRegistry,
    files: RwLock<FxHashSet<PathBuf>>,
    requests: RwLock<Vec<String>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_files<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let host = Self::new();
        for file in files {
            host.add_file(file);
        }
        host
    }

    pub fn add_file(&self, path: impl Into<PathBuf>) {
        self.files.write().insert(path.into());
    }

    pub fn load_module(
        &self,
        filename: impl Into<PathBuf>,
        parent: Option<&Arc<ModuleNode>>,
        paths: Vec<PathBuf>,
    ) -> Arc<ModuleNode> {
        self.modules.load(filename, parent, paths)
    }

    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    /// Requests as the host received them.
    pub fn requests(&self) -> Vec<String> {
        self.requests.read().clone()
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().contains(path)
    }
}

impl ModuleHost for MockHost {
    fn node_module_paths(&self, from: &Path) -> Vec<PathBuf> {
        node_module_paths(from)
    }

    fn resolve_filename(
        &self,
        request: &str,
        parent: Option<&ModuleNode>,
        _is_main: bool,
        options: &ResolveOptions,
    ) -> HostResult<PathBuf> {
        self.requests.write().push(request.to_string());

        let direct = match parent {
            Some(parent) => parent.dirname().join(request).clean(),
            None => PathBuf::from(request).clean(),
        };
        if self.exists(&direct) {
            return Ok(direct);
        }

        let dirs = match (&options.paths, parent) {
            (Some(paths), _) => paths.clone(),
            (None, Some(parent)) => parent.paths(),
            (None, None) => Vec::new(),
        };
        dirs.iter()
            .map(|dir| dir.join(request).clean())
            .find(|candidate| self.exists(candidate))
            .ok_or_else(|| HostError::ModuleNotFound {
                request: request.to_string(),
                parent: parent.map(|p| p.filename().to_path_buf()),
            })
    }

    fn main_module(&self) -> Option<Arc<ModuleNode>> {
        self.modules.main()
    }
}
