// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::allocator::{Allocator, Inventory};
use crate::reachability::ReachabilityTable;
use crate::solver::{solve, Outcome, Policy};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

prop_compose! {
    fn weights()(weights in proptest::collection::vec(1..40u64, 0..12)) -> Vec<u64> {
        weights
    }
}

prop_compose! {
    fn input()(weights in weights(), target in 0..120u64) -> (Vec<u64>, u64) {
        (weights, target)
    }
}

prop_compose! {
    fn inventory()(counts in proptest::collection::vec((1..30u64, 0..8u64), 0..8)) -> Inventory {
        Inventory::from_counts(counts).unwrap()
    }
}

// All subset sums, by enumeration.
fn brute_force_sums(weights: &[u64]) -> BTreeSet<u64> {
    let mut sums = BTreeSet::from([0]);
    for &w in weights {
        let next: Vec<u64> = sums.iter().map(|s| s + w).collect();
        sums.extend(next);
    }
    sums
}

fn multiplicities(weights: &[u64]) -> BTreeMap<u64, usize> {
    let mut counts = BTreeMap::new();
    for &w in weights {
        *counts.entry(w).or_default() += 1;
    }
    counts
}

fn is_sub_multiset(subset: &[u64], weights: &[u64]) -> bool {
    let available = multiplicities(weights);
    multiplicities(subset)
        .iter()
        .all(|(w, n)| available.get(w).is_some_and(|m| n <= m))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]
    #[test]
    fn table_matches_brute_force((weights, target) in input()) {
        let table = ReachabilityTable::build(&weights, target).unwrap();
        let expected: Vec<u64> = brute_force_sums(&weights)
            .into_iter()
            .filter(|&s| s <= target)
            .collect();
        prop_assert_eq!(table.reached_sums().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn witnesses_are_sound((weights, target) in input()) {
        let table = ReachabilityTable::build(&weights, target).unwrap();
        for sum in table.reached_sums() {
            let witness = table.witness(sum).unwrap();
            prop_assert_eq!(witness.iter().sum::<u64>(), sum);
            prop_assert!(is_sub_multiset(&witness, &weights));
        }
    }

    #[test]
    fn nearest_below((weights, target) in input()) {
        let solution = solve(&weights, target, Policy::AtMost).unwrap();
        let best = brute_force_sums(&weights)
            .into_iter()
            .filter(|&s| s <= target)
            .max()
            .unwrap_or_default();
        prop_assert!(is_sub_multiset(&solution.subset, &weights));
        prop_assert_eq!(solution.total(), best);
        match solution.outcome {
            Outcome::Exact => prop_assert_eq!(best, target),
            Outcome::Nearest(sum) => prop_assert!(sum == best && sum < target),
            Outcome::NoneReachable => prop_assert!(solution.is_empty() && best == 0),
        }
    }

    #[test]
    fn nearest_above((weights, target) in input()) {
        let solution = solve(&weights, target, Policy::AtLeast).unwrap();
        let best = brute_force_sums(&weights).into_iter().find(|&s| s >= target);
        prop_assert!(is_sub_multiset(&solution.subset, &weights));
        match best {
            Some(best) => prop_assert_eq!(solution.total(), best),
            None => prop_assert_eq!(solution.outcome, Outcome::NoneReachable),
        }
    }

    #[test]
    fn exact_only_on_target((weights, target) in input()) {
        let solution = solve(&weights, target, Policy::Exact).unwrap();
        if brute_force_sums(&weights).contains(&target) {
            prop_assert_eq!(solution.total(), target);
            prop_assert_eq!(solution.outcome, Outcome::Exact);
        } else {
            prop_assert_eq!(solution.outcome, Outcome::NoneReachable);
        }
    }

    #[test]
    fn allocator_terminates_and_conserves(initial in inventory(), target in 1..60u64) {
        let mut inventory = initial.clone();
        let allocation = Allocator::new(&mut inventory, target).run().unwrap();
        prop_assert!(allocation.exhausted);
        prop_assert!(allocation.rounds.len() as u64 <= initial.total_items());

        let mut used = Inventory::new();
        for round in &allocation.rounds {
            prop_assert!(round.total >= target);
            for &w in &round.subset {
                used.insert(w, 1).unwrap();
            }
        }
        for (w, n) in initial.iter() {
            prop_assert_eq!(inventory.count(w) + used.count(w), n);
        }
        // Whatever is left cannot fill another bucket.
        prop_assert!(inventory.total_weight() < target);
    }
}
