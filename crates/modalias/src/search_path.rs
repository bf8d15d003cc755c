//! Extra search directories prepended to the host's computed lookup list.

use std::path::{Path, PathBuf};

use modalias_config::DEPENDENCY_DIR;

/// Ordered, duplicate-free list of extra module directories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPathList {
    dirs: Vec<PathBuf>,
}

impl SearchPathList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `dir` unless it is already tracked. Returns whether it was added.
    pub fn insert(&mut self, dir: PathBuf) -> bool {
        if self.contains(&dir) {
            return false;
        }
        self.dirs.push(dir);
        true
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.dirs.iter().any(|d| d == dir)
    }

    /// Prepend the extra directories to `host_paths`, the list the host
    /// computed for a request made from `from`. Requests from inside a
    /// dependency directory keep the host list untouched.
    pub fn augment(&self, from: &Path, host_paths: Vec<PathBuf>) -> Vec<PathBuf> {
        if self.dirs.is_empty() || is_in_dependency_dir(from) {
            return host_paths;
        }

        let mut paths = Vec::with_capacity(self.dirs.len() + host_paths.len());
        paths.extend(self.dirs.iter().cloned());
        paths.extend(host_paths);
        paths
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.dirs.iter()
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

/// Whether any component of `path` is the dependency directory.
pub fn is_in_dependency_dir(path: &Path) -> bool {
    path.components()
        .any(|component| component.as_os_str() == DEPENDENCY_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(dirs: &[&str]) -> SearchPathList {
        let mut list = SearchPathList::new();
        for dir in dirs {
            list.insert(PathBuf::from(dir));
        }
        list
    }

    #[test]
    fn first_insert_is_kept() {
        let mut list = SearchPathList::new();
        assert!(list.insert(PathBuf::from("/proj/shared")));
        assert_eq!(list.as_slice(), &[PathBuf::from("/proj/shared")]);
    }

    #[test]
    fn duplicates_are_ignored() {
        let mut list = list(&["/proj/shared", "/proj/lib"]);
        assert!(!list.insert(PathBuf::from("/proj/shared")));
        assert!(!list.insert(PathBuf::from("/proj/lib")));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn augment_prepends_in_registration_order() {
        let list = list(&["/proj/shared", "/proj/lib"]);
        let host = vec![PathBuf::from("/proj/src/node_modules")];

        assert_eq!(
            list.augment(Path::new("/proj/src"), host),
            vec![
                PathBuf::from("/proj/shared"),
                PathBuf::from("/proj/lib"),
                PathBuf::from("/proj/src/node_modules"),
            ]
        );
    }

    #[test]
    fn augment_skips_dependency_dirs() {
        let list = list(&["/proj/shared"]);
        let host = vec![PathBuf::from("/proj/node_modules/pkg/node_modules")];

        assert_eq!(
            list.augment(Path::new("/proj/node_modules/pkg"), host.clone()),
            host
        );
    }

    #[test]
    fn dependency_dir_check_matches_whole_components() {
        assert!(is_in_dependency_dir(Path::new("/proj/node_modules/pkg/lib")));
        assert!(is_in_dependency_dir(Path::new("node_modules")));
        assert!(!is_in_dependency_dir(Path::new("/proj/my_node_modules_backup")));
        assert!(!is_in_dependency_dir(Path::new("/proj/src")));
    }
}
