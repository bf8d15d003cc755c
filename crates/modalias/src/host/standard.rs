//! A minimal filesystem host.
//!
//! Computes the conventional ancestor `node_modules` search list and resolves
//! requests by exact path existence. No extension or index-file probing.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use modalias_config::DEPENDENCY_DIR;
use path_clean::PathClean;

use super::{HostError, HostResult, ModuleHost, ResolveOptions};
use crate::module_tree::{ModuleNode, ModuleRegistry};

/// Search list for `from`: `<dir>/node_modules` for `from` and each ancestor,
/// nearest first, skipping directories that are themselves `node_modules`.
pub fn node_module_paths(from: &Path) -> Vec<PathBuf> {
    let from = from.clean();
    from.ancestors()
        .filter(|dir| !dir.as_os_str().is_empty())
        .filter(|dir| dir.file_name().is_none_or(|name| name != DEPENDENCY_DIR))
        .map(|dir| dir.join(DEPENDENCY_DIR))
        .collect()
}

fn is_path_request(request: &str) -> bool {
    let path = Path::new(request);
    path.is_absolute()
        || matches!(
            path.components().next(),
            Some(Component::CurDir | Component::ParentDir | Component::RootDir)
        )
}

#[derive(Debug)]
pub struct StandardHost {
    root: PathBuf,
    modules: ModuleRegistry,
}

impl StandardHost {
    /// Host rooted at `root`; relative requests without a parent module
    /// resolve against it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            modules: ModuleRegistry::new(),
        }
    }

    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    /// Record a loaded module. `paths` is its search list, normally what the
    /// installed hook computed for the module's directory.
    pub fn load_module(
        &self,
        filename: impl Into<PathBuf>,
        parent: Option<&Arc<ModuleNode>>,
        paths: Vec<PathBuf>,
    ) -> Arc<ModuleNode> {
        self.modules.load(filename, parent, paths)
    }

    fn candidates(
        &self,
        request: &str,
        parent: Option<&ModuleNode>,
        options: &ResolveOptions,
    ) -> Vec<PathBuf> {
        if is_path_request(request) {
            let base = parent.map_or(self.root.as_path(), ModuleNode::dirname);
            return vec![base.join(request).clean()];
        }

        let dirs = match (&options.paths, parent) {
            (Some(paths), _) => paths.clone(),
            (None, Some(parent)) => parent.paths(),
            (None, None) => node_module_paths(&self.root),
        };
        dirs.iter().map(|dir| dir.join(request).clean()).collect()
    }
}

impl ModuleHost for StandardHost {
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
        self.candidates(request, parent, options)
            .into_iter()
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| HostError::ModuleNotFound {
                request: request.to_string(),
                parent: parent.map(|p| p.filename().to_path_buf()),
            })
    }

    fn main_module(&self) -> Option<Arc<ModuleNode>> {
        self.modules.main()
    }
}
