// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::error::SubsetSumError;
use crate::reachability::ReachabilityTable;
use test_case::test_case;

struct TestCase<'a> {
    weights: &'a [u64],
    target: u64,
    reached: &'a [u64],
}

#[test_case(
    &TestCase {
        weights: &[],
        target: 5,
        reached: &[0],
    };
    "empty"
)]
#[test_case(
    &TestCase {
        weights: &[3],
        target: 0,
        reached: &[0],
    };
    "zero_target"
)]
#[test_case(
    &TestCase {
        weights: &[2, 6, 3, 5],
        target: 10,
        reached: &[0, 2, 3, 5, 6, 7, 8, 9, 10],
    };
    "basic"
)]
#[test_case(
    &TestCase {
        weights: &[4, 4],
        target: 12,
        reached: &[0, 4, 8],
    };
    "no_reuse"
)]
#[test_case(
    &TestCase {
        weights: &[20, 30],
        target: 10,
        reached: &[0],
    };
    "all_too_heavy"
)]
fn reached_sums(test_case: &TestCase<'_>) {
    let table = ReachabilityTable::build(test_case.weights, test_case.target).unwrap();
    assert_eq!(
        table.reached_sums().collect::<Vec<_>>(),
        test_case.reached.to_vec()
    );
    assert_eq!(table.reached_count(), test_case.reached.len());
    assert_eq!(table.max_reached(), *test_case.reached.last().unwrap());
    for &sum in test_case.reached {
        assert_eq!(table.witness(sum).unwrap().iter().sum::<u64>(), sum);
    }
}

#[test]
fn test_first_writer_wins() {
    // 20 is first reached as 10 + 10 and the later single 20 must not replace it.
    let table = ReachabilityTable::build(&[10, 10, 10, 20, 20], 40).unwrap();
    assert_eq!(table.witness(20), Some(vec![10, 10]));
    assert_eq!(table.witness(40), Some(vec![10, 10, 20]));

    let table = ReachabilityTable::build(&[20, 20, 10, 10, 10], 40).unwrap();
    assert_eq!(table.witness(20), Some(vec![20]));
    assert_eq!(table.witness(40), Some(vec![20, 20]));
}

#[test]
fn test_witness_order() {
    let table = ReachabilityTable::build(&[2, 5, 9, 3, 4], 10).unwrap();
    assert_eq!(table.witness(10), Some(vec![2, 5, 3]));
    assert_eq!(table.witness(0), Some(vec![]));
    assert_eq!(table.witness(1), None);
    assert_eq!(table.witness(11), None);
    assert!(!table.is_reached(u64::MAX));
}

#[test]
fn test_deterministic() {
    let weights = [215, 275, 335, 355, 420, 580].repeat(3);
    let first = ReachabilityTable::build(&weights, 1505).unwrap();
    let second = ReachabilityTable::build(&weights, 1505).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_one_cell_per_reached_sum() {
    let weights = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10].repeat(4);
    let table = ReachabilityTable::build(&weights, 100).unwrap();
    // Every reached sum except 0 owns exactly one arena cell.
    assert_eq!(table.arena().len(), table.reached_count() - 1);
    assert_eq!(table.reached_count(), 101);
}

#[test]
fn test_sparse_large_target() {
    let table = ReachabilityTable::build(&[1 << 19, 3], 1 << 20).unwrap();
    assert_eq!(table.reached_sums().collect::<Vec<_>>(), vec![0, 3, 1 << 19, (1 << 19) + 3]);
    // The arena only grows with reached sums, not with the target.
    assert_eq!(table.arena().len(), 3);
}

#[test]
fn test_zero_weight_rejected() {
    assert_eq!(
        ReachabilityTable::build(&[3, 0, 2], 10),
        Err(SubsetSumError::ZeroWeight { index: 1 })
    );
}

#[test]
fn test_huge_target_rejected() {
    assert_eq!(
        ReachabilityTable::build(&[1], u64::MAX),
        Err(SubsetSumError::TargetTooLarge(u64::MAX))
    );
}

#[test]
fn test_huge_weight_does_not_overflow() {
    let table = ReachabilityTable::build(&[u64::MAX, 3, u64::MAX - 1], 5).unwrap();
    assert_eq!(table.reached_sums().collect::<Vec<_>>(), vec![0, 3]);
}
