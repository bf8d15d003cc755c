//! Loaded-module records and search-directory propagation.
//!
//! The host owns every [`ModuleNode`]; parents reference children through
//! `Weak` handles only. [`ModuleRegistry`] is the owning side for hosts that
//! keep their module cache in this crate's types.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

/// One loaded module: its own search paths and the modules it loaded.
#[derive(Debug)]
pub struct ModuleNode {
    filename: PathBuf,
    paths: RwLock<Vec<PathBuf>>,
    children: RwLock<Vec<Weak<ModuleNode>>>,
}

impl ModuleNode {
    pub fn new(filename: impl Into<PathBuf>, paths: Vec<PathBuf>) -> Arc<Self> {
        Arc::new(Self {
            filename: filename.into(),
            paths: RwLock::new(paths),
            children: RwLock::new(Vec::new()),
        })
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// Directory relative requests from this module resolve against.
    pub fn dirname(&self) -> &Path {
        self.filename.parent().unwrap_or(Path::new(""))
    }

    /// Snapshot of the search paths.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.paths.read().clone()
    }

    /// Put `dir` at the front of the search paths unless already present.
    pub fn prepend_path(&self, dir: &Path) -> bool {
        let mut paths = self.paths.write();
        if paths.iter().any(|p| p == dir) {
            return false;
        }
        paths.insert(0, dir.to_path_buf());
        true
    }

    /// Record `child` as loaded by this module. Re-adding is a no-op.
    pub fn add_child(&self, child: &Arc<ModuleNode>) {
        let mut children = self.children.write();
        let already = children
            .iter()
            .any(|c| std::ptr::eq(c.as_ptr(), Arc::as_ptr(child)));
        if !already {
            children.push(Arc::downgrade(child));
        }
    }

    /// Children still alive in the host.
    pub fn children(&self) -> Vec<Arc<ModuleNode>> {
        self.children.read().iter().filter_map(Weak::upgrade).collect()
    }
}

/// Prepend `dir` to `root` and every module reachable from it.
///
/// Iterative depth-first walk; each node is visited once even when it is
/// shared between parents or part of a cycle. Returns the number of nodes
/// whose paths changed.
pub fn propagate_search_dir(root: &Arc<ModuleNode>, dir: &Path) -> usize {
    let mut visited: FxHashSet<*const ModuleNode> = FxHashSet::default();
    let mut stack = vec![Arc::clone(root)];
    let mut patched = 0;

    while let Some(node) = stack.pop() {
        if !visited.insert(Arc::as_ptr(&node)) {
            continue;
        }
        if node.prepend_path(dir) {
            patched += 1;
        }
        stack.extend(node.children().into_iter().rev());
    }

    tracing::debug!(
        dir = %dir.display(),
        root = %root.filename().display(),
        visited = visited.len(),
        patched,
        "propagated search directory"
    );
    patched
}

/// Owning cache of loaded modules, keyed by filename.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    main: RwLock<Option<Arc<ModuleNode>>>,
    modules: RwLock<FxHashMap<PathBuf, Arc<ModuleNode>>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The entry module: the first module loaded without a parent.
    pub fn main(&self) -> Option<Arc<ModuleNode>> {
        self.main.read().clone()
    }

    /// Load `filename` on behalf of `parent`.
    ///
    /// A module already in the cache is reused (and attached to `parent`);
    /// `paths` only applies to a newly created node.
    ///
    /// # Arguments
    ///
    /// * `filename` - Cache key and module path
    /// * `parent` - Loading module; `None` for an entry point, and the first
    ///   such load becomes [`ModuleRegistry::main`]
    /// * `paths` - Initial search paths for a new node
    ///
    /// # Examples
    ///
    /// ```
    /// use modalias::ModuleRegistry;
    /// use std::sync::Arc;
    ///
    /// let registry = ModuleRegistry::new();
    /// let main = registry.load("/proj/index.js", None, vec![]);
    /// let child = registry.load("/proj/lib.js", Some(&main), vec![]);
    ///
    /// assert!(Arc::ptr_eq(&registry.main().unwrap(), &main));
    /// assert!(Arc::ptr_eq(&main.children()[0], &child));
    /// ```
    pub fn load(
        &self,
        filename: impl Into<PathBuf>,
        parent: Option<&Arc<ModuleNode>>,
        paths: Vec<PathBuf>,
    ) -> Arc<ModuleNode> {
        let filename = filename.into();
        let node = {
            let mut modules = self.modules.write();
            Arc::clone(
                modules
                    .entry(filename.clone())
                    .or_insert_with(|| ModuleNode::new(filename, paths)),
            )
        };

        match parent {
            Some(parent) => parent.add_child(&node),
            None => {
                let mut main = self.main.write();
                if main.is_none() {
                    *main = Some(Arc::clone(&node));
                }
            }
        }
        node
    }

    pub fn get(&self, filename: &Path) -> Option<Arc<ModuleNode>> {
        self.modules.read().get(filename).cloned()
    }

    /// Drop the cache's handle on `filename`. Parents keep only weak
    /// references, so the node goes away once no caller holds it.
    pub fn unload(&self, filename: &Path) -> bool {
        let removed = self.modules.write().remove(filename);
        if let Some(node) = &removed {
            let mut main = self.main.write();
            if main.as_ref().is_some_and(|m| Arc::ptr_eq(m, node)) {
                *main = None;
            }
        }
        removed.is_some()
    }

    pub fn len(&self) -> usize {
        self.modules.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir(p: &str) -> PathBuf {
        PathBuf::from(p)
    }

    #[test]
    fn prepend_path_skips_existing_entries() {
        let node = ModuleNode::new("/proj/index.js", vec![dir("/proj/node_modules")]);
        assert!(node.prepend_path(&dir("/proj/shared")));
        assert!(!node.prepend_path(&dir("/proj/shared")));
        assert!(!node.prepend_path(&dir("/proj/node_modules")));
        assert_eq!(
            node.paths(),
            vec![dir("/proj/shared"), dir("/proj/node_modules")]
        );
    }

    #[test]
    fn propagation_reaches_all_descendants() {
        let registry = ModuleRegistry::new();
        let main = registry.load("/proj/index.js", None, vec![]);
        let a = registry.load("/proj/a.js", Some(&main), vec![]);
        let b = registry.load("/proj/b.js", Some(&a), vec![]);
        let c = registry.load("/proj/c.js", Some(&main), vec![]);

        let patched = propagate_search_dir(&main, &dir("/proj/shared"));

        assert_eq!(patched, 4);
        for node in [&main, &a, &b, &c] {
            assert_eq!(node.paths(), vec![dir("/proj/shared")]);
        }
    }

    #[test]
    fn shared_children_and_cycles_are_patched_once() {
        let registry = ModuleRegistry::new();
        let main = registry.load("/proj/index.js", None, vec![]);
        let a = registry.load("/proj/a.js", Some(&main), vec![]);
        let b = registry.load("/proj/b.js", Some(&main), vec![]);
        // both a and b load shared; shared loads main back
        let shared = registry.load("/proj/shared.js", Some(&a), vec![]);
        registry.load("/proj/shared.js", Some(&b), vec![]);
        registry.load("/proj/index.js", Some(&shared), vec![]);

        assert_eq!(propagate_search_dir(&main, &dir("/extra")), 4);
        assert_eq!(shared.paths(), vec![dir("/extra")]);
        assert_eq!(propagate_search_dir(&main, &dir("/extra")), 0);
    }

    #[test]
    fn dead_children_are_skipped() {
        let registry = ModuleRegistry::new();
        let main = registry.load("/proj/index.js", None, vec![]);
        registry.load("/proj/gone.js", Some(&main), vec![]);
        assert!(registry.unload(Path::new("/proj/gone.js")));

        assert!(main.children().is_empty());
        assert_eq!(propagate_search_dir(&main, &dir("/extra")), 1);
    }

    #[test]
    fn registry_reuses_cached_modules() {
        let registry = ModuleRegistry::new();
        let main = registry.load("/proj/index.js", None, vec![dir("/first")]);
        let again = registry.load("/proj/index.js", None, vec![dir("/second")]);

        assert!(Arc::ptr_eq(&main, &again));
        assert_eq!(again.paths(), vec![dir("/first")]);
        assert_eq!(registry.len(), 1);
        assert!(Arc::ptr_eq(&registry.main().unwrap(), &main));
    }

    #[test]
    fn add_child_is_idempotent() {
        let parent = ModuleNode::new("/p.js", vec![]);
        let child = ModuleNode::new("/c.js", vec![]);
        parent.add_child(&child);
        parent.add_child(&child);
        assert_eq!(parent.children().len(), 1);
    }
}
