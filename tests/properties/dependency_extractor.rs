//! Property tests for local dependency extraction.

use std::path::{Component, Path};

use proptest::prelude::*;

use dhow::domain::services::extract_local_dependencies;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-]{1,12}").unwrap()
}

fn relative_specifier() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("./".to_string()), Just("../".to_string()), Just("../../".to_string())],
        proptest::collection::vec(segment(), 1..=3),
    )
        .prop_map(|(prefix, segments)| format!("{}{}", prefix, segments.join("/")))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Extraction never panics on arbitrary text.
    #[test]
    fn property_extract_never_panics(content in "(?s).{0,512}") {
        let _ = extract_local_dependencies(Path::new("/site/pages/index.js"), &content);
    }

    /// PROPERTY: Every dependency is absolute, normalized and ends in `.js`.
    #[test]
    fn property_dependencies_are_normalized_modules(
        specifiers in proptest::collection::vec(relative_specifier(), 0..6)
    ) {
        let content: String = specifiers
            .iter()
            .map(|s| format!("import X from '{}'\n", s))
            .collect();

        let deps = extract_local_dependencies(Path::new("/site/pages/blog/post.js"), &content);

        for dep in &deps {
            prop_assert!(dep.is_absolute());
            prop_assert!(dep.extension().map(|e| e == "js").unwrap_or(false));
            prop_assert!(!dep
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::CurDir)));
        }
    }

    /// PROPERTY: Output is deduplicated and no longer than the import list.
    #[test]
    fn property_dependencies_are_unique(
        specifiers in proptest::collection::vec(relative_specifier(), 0..8)
    ) {
        let content: String = specifiers
            .iter()
            .chain(specifiers.iter())
            .map(|s| format!("import X from \"{}\"\n", s))
            .collect();

        let deps = extract_local_dependencies(Path::new("/site/pages/index.js"), &content);

        prop_assert!(deps.len() <= specifiers.len());
        for (i, dep) in deps.iter().enumerate() {
            prop_assert!(!deps[i + 1..].contains(dep));
        }
    }

    /// PROPERTY: Package imports are never reported.
    #[test]
    fn property_bare_specifiers_are_ignored(name in segment()) {
        let content = format!("import pkg from '{}'\nimport {{ h }} from '@scope/{}'", name, name);
        prop_assert!(extract_local_dependencies(Path::new("/site/pages/a.js"), &content).is_empty());
    }
}
