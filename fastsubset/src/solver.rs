// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Nearest-target subset selection on top of the reachability scan.
//!
//! A [Policy] chooses which side of the target is acceptable when the target itself cannot
//! be reached. The fallback candidate is tracked during the same scan that builds the
//! table, so each call costs exactly one pass over the weights.
//!
//! Among candidates of the same quality the first one discovered wins, so the order of the
//! weights decides which witness is returned but never which sums are reachable. Callers
//! that prefer large items should sort the weights in descending order first.

use crate::error::SubsetSumResult;
use crate::reachability::{validate_weights, ReachabilityTable, ScanObserver};
use crate::witness::WitnessId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Which sums are acceptable when the target is not exactly reachable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    /// Only the target itself.
    Exact,
    /// The largest reachable sum below the target.
    AtMost,
    /// The smallest reachable sum above the target.
    AtLeast,
}

impl Policy {
    pub const ALL: [Policy; 3] = [Policy::Exact, Policy::AtMost, Policy::AtLeast];

    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Exact => "exact",
            Policy::AtMost => "at-most",
            Policy::AtLeast => "at-least",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Policy::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown policy '{s}', expected exact, at-most or at-least"))
    }
}

/// How a [Solution] relates to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// The subset sums to the target.
    Exact,
    /// The target is unreachable; the subset sums to the given nearest value on the side
    /// allowed by the policy.
    Nearest(u64),
    /// Neither the target nor any sum on the allowed side is reachable. The subset is empty.
    NoneReachable,
}

/// A chosen subset together with how it was found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub subset: Vec<u64>,
    pub outcome: Outcome,
}

impl Solution {
    fn exact(subset: Vec<u64>) -> Self {
        Self {
            subset,
            outcome: Outcome::Exact,
        }
    }

    fn none() -> Self {
        Self {
            subset: Vec::new(),
            outcome: Outcome::NoneReachable,
        }
    }

    pub fn total(&self) -> u64 {
        self.subset.iter().sum()
    }

    /// True iff no item was selected. This is also the case for an exact match of target 0.
    pub fn is_empty(&self) -> bool {
        self.subset.is_empty()
    }

    pub fn into_subset(self) -> Vec<u64> {
        self.subset
    }
}

/// Best candidate seen so far, stored without materializing its witness.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    sum: u64,
    base: WitnessId,
    /// Weight appended to `base`, for sums beyond the table that have no cell of their own.
    last: Option<u64>,
}

#[derive(Debug)]
struct Tracker {
    policy: Policy,
    target: u64,
    best: Option<Candidate>,
}

impl ScanObserver for Tracker {
    fn reached(&mut self, sum: u64, id: WitnessId) {
        if self.policy != Policy::AtMost || sum >= self.target {
            return;
        }
        if self.best.map_or(true, |best| best.sum < sum) {
            self.best = Some(Candidate {
                sum,
                base: id,
                last: None,
            });
        }
    }

    fn overshoot(&mut self, sum: u64, base: WitnessId, weight: u64) {
        if self.policy != Policy::AtLeast {
            return;
        }
        if self.best.map_or(true, |best| sum < best.sum) {
            self.best = Some(Candidate {
                sum,
                base,
                last: Some(weight),
            });
        }
    }
}

/// Select a subset of `weights` (each used at most once) whose sum is `target`, or the
/// nearest reachable sum on the side allowed by `policy`.
pub fn solve(weights: &[u64], target: u64, policy: Policy) -> SubsetSumResult<Solution> {
    validate_weights(weights)?;
    if target == 0 {
        return Ok(Solution::exact(Vec::new()));
    }

    let mut tracker = Tracker {
        policy,
        target,
        best: None,
    };
    let table = ReachabilityTable::build_with(weights, target, &mut tracker)?;

    let solution = if let Some(subset) = table.witness(target) {
        Solution::exact(subset)
    } else if let Some(best) = tracker.best {
        let mut subset = table.arena().to_vec(best.base);
        subset.extend(best.last);
        Solution {
            subset,
            outcome: Outcome::Nearest(best.sum),
        }
    } else {
        Solution::none()
    };

    debug!(
        target,
        %policy,
        weights = weights.len(),
        outcome = ?solution.outcome,
        picked = solution.subset.len(),
        "subset selected"
    );
    Ok(solution)
}

/// A subset summing exactly to `target`, or an empty one.
pub fn exact(weights: &[u64], target: u64) -> SubsetSumResult<Vec<u64>> {
    solve(weights, target, Policy::Exact).map(Solution::into_subset)
}

/// A subset with the largest reachable sum `<= target`. Empty if nothing below the target
/// is reachable.
pub fn at_most(weights: &[u64], target: u64) -> SubsetSumResult<Vec<u64>> {
    solve(weights, target, Policy::AtMost).map(Solution::into_subset)
}

/// A subset with the smallest reachable sum `>= target`. Empty if every reachable sum is
/// below the target; use [solve] to tell this apart from an exact match.
pub fn at_least(weights: &[u64], target: u64) -> SubsetSumResult<Vec<u64>> {
    solve(weights, target, Policy::AtLeast).map(Solution::into_subset)
}
