//! Property-based tests for the document model.
//!
//! These tests use proptest to drive random sequences of mutations and check
//! that the item-group and field invariants hold afterwards.

#[cfg(test)]
mod proptest_tests {
    use std::collections::HashSet;

    use crate::document::ConfigDocument;
    use crate::fields::{dash_to_camel_case, Field};
    use proptest::prelude::*;

    fn empty_doc() -> ConfigDocument {
        ConfigDocument::parse(r#"<ti:app xmlns:ti="http://ti.appcelerator.org"/>"#).unwrap()
    }

    #[derive(Debug, Clone)]
    enum Op {
        Set {
            id: String,
            version: Option<String>,
            platform: Option<String>,
        },
        Remove {
            id: String,
            platform: Option<String>,
        },
    }

    fn id_strategy() -> impl Strategy<Value = String> {
        prop_oneof![Just("foo".to_string()), Just("bar".to_string())]
    }

    fn platform_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some("android".to_string())),
            Just(Some("iphone".to_string())),
        ]
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (
                id_strategy(),
                proptest::option::of("[0-9]\\.[0-9]"),
                platform_strategy()
            )
                .prop_map(|(id, version, platform)| Op::Set {
                    id,
                    version,
                    platform
                }),
            (id_strategy(), platform_strategy())
                .prop_map(|(id, platform)| Op::Remove { id, platform }),
        ]
    }

    // ============================================================================
    // Item group invariants
    // ============================================================================

    proptest! {
        /// Property: (id, platform) pairs stay unique under any mutation sequence
        #[test]
        fn module_keys_stay_unique(ops in proptest::collection::vec(op_strategy(), 0..40)) {
            let mut doc = empty_doc();
            for op in &ops {
                match op {
                    Op::Set { id, version, platform } => {
                        doc.set_module(id, version.as_deref(), platform.as_deref()).unwrap();
                    }
                    Op::Remove { id, platform } => {
                        doc.remove_module(id, platform.as_deref()).unwrap();
                    }
                }
            }

            let modules = doc.modules();
            let keys: HashSet<_> = modules
                .iter()
                .map(|m| (m.id.clone(), m.platform.clone()))
                .collect();
            prop_assert_eq!(keys.len(), modules.len());
        }

        /// Property: the last set for a key determines its version
        #[test]
        fn last_set_wins(
            platform in platform_strategy(),
            versions in proptest::collection::vec(proptest::option::of("[0-9]\\.[0-9]"), 1..10),
        ) {
            let mut doc = empty_doc();
            for version in &versions {
                doc.set_module("foo", version.as_deref(), platform.as_deref()).unwrap();
            }
            let modules = doc.modules();
            prop_assert_eq!(modules.len(), 1);
            prop_assert_eq!(&modules[0].version, versions.last().unwrap());
            prop_assert_eq!(&modules[0].platform, &platform);
        }

        /// Property: serializing and reparsing keeps the module list
        #[test]
        fn modules_survive_round_trip(ops in proptest::collection::vec(op_strategy(), 0..20)) {
            let mut doc = empty_doc();
            for op in &ops {
                if let Op::Set { id, version, platform } = op {
                    doc.set_module(id, version.as_deref(), platform.as_deref()).unwrap();
                }
            }
            let reparsed = ConfigDocument::parse(&doc.serialize().unwrap()).unwrap();
            prop_assert_eq!(reparsed.modules(), doc.modules());
        }
    }

    // ============================================================================
    // Field alias properties
    // ============================================================================

    proptest! {
        /// Property: camel-casing never leaves a dash behind
        #[test]
        fn camel_case_has_no_dashes(input in "[a-z]+(-[a-z]+)*") {
            prop_assert!(!dash_to_camel_case(&input).contains('-'));
        }

        /// Property: setting through either name writes the same element
        #[test]
        fn alias_and_name_are_interchangeable(index in 0..Field::ALL.len(), value in "[a-zA-Z0-9 .]{0,20}") {
            let field = Field::ALL[index];
            let mut by_camel = empty_doc();
            by_camel.set_by_name(&field.camel_name(), &value).unwrap();
            let mut by_name = empty_doc();
            by_name.set_by_name(field.name(), &value).unwrap();

            prop_assert_eq!(by_camel.serialize().unwrap(), by_name.serialize().unwrap());
            prop_assert_eq!(by_camel.get(field), Some(value));
        }
    }
}
