//! The alias resolver: alias table, extra search directories and the host
//! they are layered over.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::alias::{AliasEntry, AliasTable};
use crate::error::Result;
use crate::host::{HostResult, ModuleHost, ResolutionHook, ResolveOptions};
use crate::module_tree::{ModuleNode, propagate_search_dir};
use crate::normalize::normalize_dir;
use crate::search_path::SearchPathList;

#[derive(Debug, Default)]
struct ResolverState {
    aliases: AliasTable,
    search_paths: SearchPathList,
}

/// Aliasing layered over a [`ModuleHost`].
///
/// Configure it once (see [`AliasResolver::configure`]) and then route the
/// host's lookups through its [`ResolutionHook`] implementation. Shared
/// access goes through `&self`; wrap it in an `Arc` to hand it to several
/// threads.
///
/// # Example
///
/// ```
/// use modalias::{AliasResolver, ResolutionHook, StandardHost};
/// use std::path::{Path, PathBuf};
///
/// let resolver = AliasResolver::new(StandardHost::new("/proj"));
/// resolver.register_alias("@utils", "src/utils", Path::new("/proj")).unwrap();
/// resolver.add_search_dir("/proj/shared");
///
/// assert_eq!(resolver.resolve_request("@utils/format"), "/proj/src/utils/format");
/// assert_eq!(
///     resolver.compute_search_paths(Path::new("/proj"))[0],
///     PathBuf::from("/proj/shared")
/// );
/// ```
#[derive(Debug)]
pub struct AliasResolver<H> {
    host: H,
    state: RwLock<ResolverState>,
}

impl<H: ModuleHost> AliasResolver<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            state: RwLock::new(ResolverState::default()),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Register an alias. Relative targets resolve against `root`, which
    /// should be absolute so the stored target is too.
    ///
    /// A bare `@` is stored as `@/`, and registering a prefix again replaces
    /// its target.
    ///
    /// # Errors
    ///
    /// `AliasError::EmptyPrefix` when `prefix` is empty.
    pub fn register_alias(&self, prefix: &str, target: &str, root: &Path) -> Result<AliasEntry> {
        let mut state = self.state.write();
        state.aliases.register(prefix, target, root).cloned()
    }

    /// Effective request for `request`: the alias rewrite of the first
    /// matching prefix, or `request` unchanged.
    pub fn resolve_request<'a>(&self, request: &'a str) -> Cow<'a, str> {
        self.state.read().aliases.rewrite(request)
    }

    /// Track an extra search directory and patch every loaded module.
    ///
    /// The directory is normalized first. When it is new it is appended to
    /// the global list, then prepended to the entry module and each of its
    /// live descendants that lack it. Modules loaded later pick it up from
    /// [`ResolutionHook::compute_search_paths`]. Returns whether the
    /// directory was new. Existence on disk is not checked.
    ///
    /// # Arguments
    ///
    /// * `dir` - Absolute directory to search for bare module names. Callers
    ///   holding a relative entry join it under their root first.
    ///
    /// # Examples
    ///
    /// ```
    /// use modalias::{AliasResolver, StandardHost};
    /// use std::path::PathBuf;
    ///
    /// let host = StandardHost::new("/proj");
    /// let entry = host.load_module("/proj/index.js", None, vec![]);
    /// let resolver = AliasResolver::new(host);
    ///
    /// assert!(resolver.add_search_dir("/proj/./shared"));
    /// assert!(!resolver.add_search_dir("/proj/shared/"));
    /// assert_eq!(entry.paths(), vec![PathBuf::from("/proj/shared")]);
    /// ```
    pub fn add_search_dir(&self, dir: impl AsRef<Path>) -> bool {
        let dir = normalize_dir(dir);
        if !self.state.write().search_paths.insert(dir.clone()) {
            tracing::debug!(dir = %dir.display(), "search directory already tracked");
            return false;
        }

        tracing::debug!(dir = %dir.display(), "added search directory");
        if let Some(main) = self.host.main_module() {
            propagate_search_dir(&main, &dir);
        }
        true
    }

    /// Aliases in lookup order.
    pub fn aliases(&self) -> Vec<AliasEntry> {
        let state = self.state.read();
        state
            .aliases
            .prefixes()
            .iter()
            .filter_map(|prefix| state.aliases.get(prefix).cloned())
            .collect()
    }

    /// Extra search directories in registration order.
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        self.state.read().search_paths.as_slice().to_vec()
    }
}

impl<H: ModuleHost> ResolutionHook for AliasResolver<H> {
    fn compute_search_paths(&self, from: &Path) -> Vec<PathBuf> {
        let host_paths = self.host.node_module_paths(from);
        self.state.read().search_paths.augment(from, host_paths)
    }

    fn resolve_filename(
        &self,
        request: &str,
        parent: Option<&ModuleNode>,
        is_main: bool,
        options: &ResolveOptions,
    ) -> HostResult<PathBuf> {
        let effective = self.resolve_request(request);
        if let Cow::Owned(rewritten) = &effective {
            tracing::trace!(request, rewritten = %rewritten, "rewrote aliased request");
        }
        self.host
            .resolve_filename(&effective, parent, is_main, options)
    }
}
