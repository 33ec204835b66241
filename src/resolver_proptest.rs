//! Property-based tests for version resolution and workspace link naming.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::linker::link_name;
    use crate::resolver::{resolve_dependency, GlobalDependencySet, VersionPolicy};
    use crate::manifest::DependencyMap;
    use proptest::prelude::*;
    use std::path::Path;

    const NAMESPACE: &str = "@theia/";

    fn package_name() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z][a-z0-9-]{0,12}",
            "@theia/[a-z][a-z0-9-]{0,12}",
            "@[a-z]{1,6}/[a-z][a-z0-9-]{0,12}",
        ]
    }

    fn version() -> impl Strategy<Value = String> {
        "[\\^~]?[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{1,2}"
    }

    fn pins() -> impl Strategy<Value = Vec<(String, String)>> {
        prop::collection::vec((package_name(), version()), 0..8)
    }

    // ============================================================================
    // resolve_dependency property tests
    // ============================================================================

    proptest! {
        /// Property: resolving an already resolved version changes nothing
        #[test]
        fn resolution_is_a_fixed_point(
            pins in pins(),
            name in package_name(),
            declared in version(),
            host in version(),
        ) {
            let global: GlobalDependencySet = pins.into_iter().collect();
            let once = resolve_dependency(&name, &declared, &global, &host, NAMESPACE);
            let twice = resolve_dependency(&name, &once, &global, &host, NAMESPACE);
            prop_assert_eq!(once, twice);
        }

        /// Property: a host pin wins even for names in the host namespace
        #[test]
        fn global_pin_beats_namespace(
            suffix in "[a-z][a-z0-9-]{0,12}",
            pinned in version(),
            declared in version(),
            host in version(),
        ) {
            let name = format!("{}{}", NAMESPACE, suffix);
            let global: GlobalDependencySet = [(name.clone(), pinned.clone())].into_iter().collect();
            let resolved = resolve_dependency(&name, &declared, &global, &host, NAMESPACE);
            prop_assert_eq!(resolved, pinned);
        }

        /// Property: names outside both the pins and the namespace keep their version
        #[test]
        fn unrelated_names_are_untouched(
            name in "[a-z][a-z0-9-]{0,12}",
            declared in version(),
            host in version(),
        ) {
            let global = GlobalDependencySet::default();
            let resolved = resolve_dependency(&name, &declared, &global, &host, NAMESPACE);
            prop_assert_eq!(resolved, declared);
        }

        /// Property: applying the policy never adds, removes or reorders keys
        #[test]
        fn apply_preserves_key_sequence(
            pins in pins(),
            entries in prop::collection::vec((package_name(), version()), 0..16),
            host in version(),
        ) {
            let global: GlobalDependencySet = pins.into_iter().collect();
            let policy = VersionPolicy::new(&global, &host, NAMESPACE);
            let mut dependencies: DependencyMap = entries.into_iter().collect();
            let keys_before: Vec<String> = dependencies.keys().cloned().collect();

            policy.apply(&mut dependencies);

            let keys_after: Vec<String> = dependencies.keys().cloned().collect();
            prop_assert_eq!(keys_before, keys_after);
        }
    }

    // ============================================================================
    // link_name property tests
    // ============================================================================

    proptest! {
        /// Property: the link name is the prefix followed by the last path component
        #[test]
        fn link_name_uses_basename(
            parents in prop::collection::vec("[a-z0-9_-]{1,8}", 0..4),
            base in "[a-z0-9_-]{1,12}",
        ) {
            let mut path = parents.join("/");
            if !path.is_empty() {
                path.push('/');
            }
            path.push_str(&base);

            let name = link_name("@che-", Path::new(&path));
            prop_assert_eq!(name, Some(format!("@che-{}", base)));
        }
    }
}
