//! Property tests for the page cache.

use std::path::PathBuf;

use proptest::prelude::*;

use dhow::PageCache;

fn page() -> impl Strategy<Value = PathBuf> {
    proptest::string::string_regex("[a-e]")
        .unwrap()
        .prop_map(|name| PathBuf::from(format!("/site/pages/{}.js", name)))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `dependents_of` is exactly the pages whose recorded
    /// dependency lists contain the path.
    #[test]
    fn property_dependents_match_recorded_dependencies(
        edges in proptest::collection::vec((page(), page()), 0..16),
        target in page()
    ) {
        let mut cache = PageCache::new();
        let mut expected: Vec<PathBuf> = Vec::new();
        for (from, _) in &edges {
            let deps: Vec<PathBuf> = edges
                .iter()
                .filter(|(f, _)| f == from)
                .map(|(_, to)| to.clone())
                .collect();
            cache.set_dependencies(from, deps.clone());
            if deps.contains(&target) && !expected.contains(from) {
                expected.push(from.clone());
            }
        }

        let mut actual = cache.dependents_of(&target);
        actual.sort();
        expected.sort();
        prop_assert_eq!(actual, expected);
    }

    /// PROPERTY: Clearing routes keeps the dependency record.
    #[test]
    fn property_clear_routes_keeps_dependencies(
        source in page(),
        deps in proptest::collection::vec(page(), 0..4)
    ) {
        let mut cache = PageCache::new();
        cache.set_dependencies(&source, deps.clone());
        cache.append_route(&source, PathBuf::from("/site/out/index.html"));

        cache.clear_routes(&source);

        let entry = cache.get(&source).unwrap();
        prop_assert!(entry.routes().is_empty());
        prop_assert_eq!(entry.dependencies(), deps.as_slice());
    }
}
