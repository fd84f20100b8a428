//! Property-based tests using proptest.
//!
//! These tests verify entry name matching and removal invariants using
//! randomly generated entry names.

mod common;

use proptest::prelude::*;
use std::collections::BTreeSet;

use jndi_strip::TARGET_ENTRY;
use jndi_strip::gate::AlwaysYes;
use jndi_strip::inspect::{NameMatching, base_name};

use common::{Workspace, read_entries, write_zip};

/// Strategy for generating directory prefixes such as `a/b_c/`.
fn dir_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-zA-Z0-9_-]{1,8}", 0..4).prop_map(|parts| {
        parts.into_iter().map(|p| p + "/").collect::<String>()
    })
}

/// Strategy for generating file names that never equal the target.
fn other_name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,12}\\.(class|txt|MF)"
        .prop_filter("must differ from the target", |s| {
            !s.eq_ignore_ascii_case(TARGET_ENTRY)
        })
}

proptest! {
    /// The base name is the last segment, whatever the prefix.
    #[test]
    fn base_name_is_last_segment(dir in dir_strategy(), name in other_name_strategy()) {
        let full = format!("{}{}", dir, name);
        prop_assert_eq!(base_name(&full), name.as_str());
    }

    /// Case-insensitive matching accepts any ASCII casing of the target.
    #[test]
    fn case_insensitive_matches_any_casing(mask in proptest::collection::vec(any::<bool>(), TARGET_ENTRY.len())) {
        let name: String = TARGET_ENTRY
            .chars()
            .zip(mask)
            .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect();
        prop_assert!(NameMatching::CaseInsensitive.matches(&name, TARGET_ENTRY));
        prop_assert_eq!(
            NameMatching::CaseSensitive.matches(&name, TARGET_ENTRY),
            name == TARGET_ENTRY
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// After a confirmed run no target entry remains and all others survive
    /// with their contents.
    #[test]
    fn removal_keeps_exactly_the_other_entries(
        targets in proptest::collection::vec(dir_strategy(), 0..3),
        others in proptest::collection::vec((dir_strategy(), other_name_strategy()), 1..6),
    ) {
        let mut names = BTreeSet::new();
        for dir in &targets {
            names.insert(format!("{}{}", dir, TARGET_ENTRY));
        }
        for (dir, name) in &others {
            names.insert(format!("{}{}", dir, name));
        }
        let entries: Vec<(String, Vec<u8>)> = names
            .iter()
            .map(|n| (n.clone(), n.as_bytes().to_vec()))
            .collect();
        let borrowed: Vec<(&str, &[u8])> = entries
            .iter()
            .map(|(n, d)| (n.as_str(), d.as_slice()))
            .collect();

        let ws = Workspace::new();
        let jar = write_zip(ws.path(), "p.jar", &borrowed);
        let records = ws.driver(AlwaysYes).run([&jar]).unwrap();

        let expected: Vec<_> = entries
            .iter()
            .filter(|(n, _)| base_name(n) != TARGET_ENTRY)
            .cloned()
            .collect();
        let removed = entries.len() - expected.len();

        prop_assert_eq!(read_entries(&jar), expected);
        if removed == 0 {
            prop_assert_eq!(records.len(), 1);
            prop_assert_eq!(records[0].result.kind(), "not_found");
        } else {
            prop_assert_eq!(records.len(), removed);
            prop_assert!(records.iter().all(|r| r.result.kind() == "removed"));
        }
    }
}
