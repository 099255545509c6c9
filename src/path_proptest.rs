//! Property-based tests for stub name classification.
//!
//! These tests use proptest to generate random names and verify that the
//! helpers in `path` agree with each other.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{is_stub_name, module_stem, stub_file_name};
    use proptest::prelude::*;

    proptest! {
        /// Property: building a stub name and taking its stem gives the stem back
        #[test]
        fn module_stem_inverts_stub_file_name(stem in "[A-Za-z_][A-Za-z0-9_.]{0,20}") {
            let name = stub_file_name(&stem, "pyi");
            prop_assert!(is_stub_name(&name, "pyi"));
            prop_assert_eq!(module_stem(&name, "pyi"), Some(stem.as_str()));
        }

        /// Property: every name with a stem is a stub name
        #[test]
        fn module_stem_implies_stub_name(name in ".{0,30}") {
            if module_stem(&name, "pyi").is_some() {
                prop_assert!(is_stub_name(&name, "pyi"));
            }
        }

        /// Property: names without a dot before the extension are never stubs
        #[test]
        fn names_without_dot_are_not_stubs(name in "[A-Za-z0-9_]{0,20}") {
            prop_assert!(!is_stub_name(&name, "pyi"));
            prop_assert_eq!(module_stem(&name, "pyi"), None);
        }
    }
}
