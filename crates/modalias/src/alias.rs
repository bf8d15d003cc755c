//! Alias table: prefix to target directory mapping and prefix lookup.
//!
//! Lookup walks the prefixes in ascending lexicographic order and takes the
//! first one the request starts with. This is a plain string-prefix test, so
//! a shorter prefix shadows a longer one sharing its leading characters
//! (`@u` wins over `@utils` for `@utils/x`).

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::{AliasError, Result};
use crate::normalize::{join_request, normalize_target};

/// A bare `@` would also match scoped package names such as `@scope/pkg`.
const BARE_SCOPE_PREFIX: &str = "@";
const SCOPE_ROOT_PREFIX: &str = "@/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub prefix: String,
    /// Always absolute.
    pub target_dir: PathBuf,
}

impl AliasEntry {
    /// Rewrite a request this entry matches.
    pub fn apply(&self, request: &str) -> String {
        let suffix = request.strip_prefix(self.prefix.as_str()).unwrap_or(request);
        join_request(&self.target_dir, suffix)
    }
}

/// Prefix stored for a configured alias name.
pub fn canonical_prefix(prefix: &str) -> &str {
    if prefix == BARE_SCOPE_PREFIX {
        SCOPE_ROOT_PREFIX
    } else {
        prefix
    }
}

#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: IndexMap<String, AliasEntry>,
    // Lookup order; kept sorted.
    prefixes: Vec<String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `prefix` with a target resolved against `root`.
    ///
    /// Registering a prefix again replaces its target.
    ///
    /// # Errors
    ///
    /// `AliasError::EmptyPrefix` when `prefix` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use modalias::AliasTable;
    /// use std::path::Path;
    ///
    /// let mut table = AliasTable::new();
    /// table.register("@", "src", Path::new("/proj")).unwrap();
    /// assert_eq!(table.rewrite("@/app"), "/proj/src/app");
    /// assert_eq!(table.rewrite("@scope/pkg"), "@scope/pkg");
    /// ```
    pub fn register(&mut self, prefix: &str, target: &str, root: &Path) -> Result<&AliasEntry> {
        self.insert(prefix, normalize_target(target, root))
    }

    /// Register `prefix` with an already-absolute target directory.
    pub fn insert(&mut self, prefix: &str, target_dir: PathBuf) -> Result<&AliasEntry> {
        if prefix.is_empty() {
            return Err(AliasError::EmptyPrefix);
        }
        let prefix = canonical_prefix(prefix).to_string();

        if !self.entries.contains_key(&prefix) {
            self.prefixes.push(prefix.clone());
            self.prefixes.sort();
        }

        tracing::debug!(
            prefix = %prefix,
            target = %target_dir.display(),
            "registered alias"
        );

        let entry = AliasEntry {
            prefix: prefix.clone(),
            target_dir,
        };
        let index = self.entries.insert_full(prefix, entry).0;
        Ok(&self.entries[index])
    }

    /// First entry, in prefix order, whose prefix starts `request`.
    pub fn lookup(&self, request: &str) -> Option<&AliasEntry> {
        self.prefixes
            .iter()
            .find(|prefix| request.starts_with(prefix.as_str()))
            .and_then(|prefix| self.entries.get(prefix))
    }

    /// The effective request: rewritten when a prefix matches, otherwise
    /// `request` itself.
    pub fn rewrite<'a>(&self, request: &'a str) -> Cow<'a, str> {
        match self.lookup(request) {
            Some(entry) => Cow::Owned(entry.apply(request)),
            None => Cow::Borrowed(request),
        }
    }

    pub fn get(&self, prefix: &str) -> Option<&AliasEntry> {
        self.entries.get(canonical_prefix(prefix))
    }

    /// Entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &AliasEntry> {
        self.entries.values()
    }

    /// Prefixes in lookup order.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(aliases: &[(&str, &str)]) -> AliasTable {
        let mut table = AliasTable::new();
        for (prefix, target) in aliases {
            table.register(prefix, target, Path::new("/proj")).unwrap();
        }
        table
    }

    #[test]
    fn rewrites_matching_requests() {
        let table = table(&[("@utils", "/src/utils"), ("@", "/src")]);

        assert_eq!(table.rewrite("@utils/format"), "/src/utils/format");
        assert_eq!(table.rewrite("@utils"), "/src/utils");
        assert_eq!(table.rewrite("@/components/button"), "/src/components/button");
    }

    #[test]
    fn unmatched_requests_are_borrowed_unchanged() {
        let table = table(&[("@utils", "/src/utils"), ("@", "/src")]);

        let rewritten = table.rewrite("@other/thing");
        assert!(matches!(rewritten, Cow::Borrowed("@other/thing")));
        assert_eq!(table.rewrite("lodash"), "lodash");
        assert_eq!(table.rewrite("./local"), "./local");
    }

    #[test]
    fn bare_at_is_stored_as_at_slash() {
        let table = table(&[("@", "/src")]);

        assert_eq!(table.prefixes(), &["@/".to_string()]);
        assert!(table.get("@").is_some());
        assert!(table.lookup("@foo").is_none());
        assert!(table.lookup("@scope/pkg").is_none());
        assert_eq!(table.rewrite("@/foo"), "/src/foo");
    }

    #[test]
    fn lexicographically_earlier_prefix_wins() {
        let forward = table(&[("@u", "/short"), ("@utils", "/long")]);
        let reverse = table(&[("@utils", "/long"), ("@u", "/short")]);

        for t in [&forward, &reverse] {
            assert_eq!(t.prefixes(), &["@u".to_string(), "@utils".to_string()]);
            assert_eq!(t.rewrite("@utils/x"), "/short/tils/x");
        }
    }

    #[test]
    fn prefix_match_ignores_segment_boundaries() {
        let table = table(&[("lib", "/vendor/lib")]);
        assert_eq!(table.rewrite("library"), "/vendor/lib/rary");
    }

    #[test]
    fn relative_targets_resolve_under_root() {
        let table = table(&[("~", "src")]);
        assert_eq!(
            table.get("~").unwrap().target_dir,
            PathBuf::from("/proj/src")
        );
        assert_eq!(table.rewrite("~/a/b"), "/proj/src/a/b");
    }

    #[test]
    fn re_registering_replaces_target_without_duplicating() {
        let mut table = table(&[("@", "/old")]);
        table.register("@/", "/new", Path::new("/proj")).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.prefixes().len(), 1);
        assert_eq!(table.rewrite("@/x"), "/new/x");
    }

    #[test]
    fn empty_prefix_is_rejected() {
        let mut table = AliasTable::new();
        let err = table.register("", "/src", Path::new("/")).unwrap_err();
        assert!(matches!(err, AliasError::EmptyPrefix));
        assert!(table.is_empty());
    }

    #[test]
    fn entries_keep_registration_order() {
        let table = table(&[("@z", "/z"), ("@a", "/a")]);
        let prefixes: Vec<_> = table.entries().map(|e| e.prefix.as_str()).collect();
        assert_eq!(prefixes, vec!["@z", "@a"]);
        assert_eq!(table.prefixes(), &["@a".to_string(), "@z".to_string()]);
    }
}
