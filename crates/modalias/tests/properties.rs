//! Property tests for request rewriting.

use modalias::AliasTable;
use modalias::normalize::join_request;
use proptest::prelude::*;
use std::path::{Path, PathBuf};

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,7}"
}

proptest! {
    #[test]
    fn matching_requests_join_target_and_suffix(
        name in segment(),
        target in proptest::collection::vec(segment(), 1..4),
        rest in proptest::collection::vec(segment(), 0..4),
    ) {
        let prefix = format!("#{name}");
        let target_dir = PathBuf::from(format!("/{}", target.join("/")));
        let mut table = AliasTable::new();
        table.insert(&prefix, target_dir.clone()).unwrap();

        let suffix = if rest.is_empty() { String::new() } else { format!("/{}", rest.join("/")) };
        let request = format!("{prefix}{suffix}");

        prop_assert_eq!(table.rewrite(&request).into_owned(), join_request(&target_dir, &suffix));
    }

    #[test]
    fn unmatched_requests_are_identity(request in "[a-z./][a-z0-9./_-]{0,20}") {
        let mut table = AliasTable::new();
        table.register("@", "/src", Path::new("/")).unwrap();
        table.register("~utils", "lib/utils", Path::new("/proj")).unwrap();

        prop_assert_eq!(table.rewrite(&request), request.as_str());
    }

    #[test]
    fn registration_order_does_not_change_lookup(
        a in segment(),
        b in segment(),
        rest in segment(),
    ) {
        let (p1, p2) = (format!("@{a}"), format!("@{a}{b}"));
        let request = format!("{p2}/{rest}");

        let mut forward = AliasTable::new();
        forward.insert(&p1, PathBuf::from("/one")).unwrap();
        forward.insert(&p2, PathBuf::from("/two")).unwrap();

        let mut reverse = AliasTable::new();
        reverse.insert(&p2, PathBuf::from("/two")).unwrap();
        reverse.insert(&p1, PathBuf::from("/one")).unwrap();

        prop_assert_eq!(forward.rewrite(&request), reverse.rewrite(&request));
        prop_assert_eq!(forward.lookup(&request).map(|e| e.prefix.clone()), Some(p1));
    }
}
