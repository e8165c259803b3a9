//! Property tests for route resolution.

use std::path::Path;

use proptest::prelude::*;

use dhow::domain::services::resolve_routes;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9-]{1,10}").unwrap()
}

fn logical_dir() -> impl Strategy<Value = String> {
    proptest::collection::vec(segment(), 0..=3).prop_map(|s| s.join("/"))
}

fn hostile_suffix() -> impl Strategy<Value = String> {
    prop_oneof![
        segment(),
        proptest::string::string_regex("[a-z./\\\\]{0,24}").unwrap(),
        Just("../../../etc/passwd".to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Output files always stay under the destination.
    #[test]
    fn property_outputs_never_escape_destination(
        dir in logical_dir(),
        suffixes in proptest::collection::vec(hostile_suffix(), 0..8)
    ) {
        let out = Path::new("/site/out");
        for route in resolve_routes(&dir, "page", Some(suffixes)) {
            let file = route.output_file(out);
            prop_assert!(file.starts_with(out));
            prop_assert!(file.ends_with("index.html"));
        }
    }

    /// PROPERTY: Routes are unique and at most one per suffix.
    #[test]
    fn property_routes_are_unique(
        dir in logical_dir(),
        suffixes in proptest::collection::vec(segment(), 0..10)
    ) {
        let count = suffixes.len();
        let routes = resolve_routes(&dir, "page", Some(suffixes));

        prop_assert!(routes.len() <= count);
        for (i, route) in routes.iter().enumerate() {
            prop_assert!(!routes[i + 1..].iter().any(|r| r.path() == route.path()));
        }
    }

    /// PROPERTY: Enumerated routes live under the page's directory and hand
    /// back the suffix they were built from.
    #[test]
    fn property_enumerated_routes_carry_their_suffix(
        dir in logical_dir(),
        suffix in segment()
    ) {
        let routes = resolve_routes(&dir, "page", Some(vec![suffix.clone()]));

        prop_assert_eq!(routes.len(), 1);
        prop_assert_eq!(routes[0].suffix(), suffix.as_str());
        if !dir.is_empty() {
            let prefix = format!("{}/", dir);
            prop_assert!(routes[0].path().starts_with(&prefix));
        }
    }

    /// PROPERTY: A page without enumeration renders exactly one route.
    #[test]
    fn property_plain_page_has_one_route(dir in logical_dir(), name in segment()) {
        prop_assert_eq!(resolve_routes(&dir, &name, None).len(), 1);
    }
}
