// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Repeated extraction of subsets from a finite inventory.
//!
//! Each round expands the remaining [Inventory] into a weight sequence, asks the solver
//! for the subset nearest to the target and removes the picked units. The first round
//! that yields an empty subset ends the allocation. Every productive round removes at
//! least one unit, so the number of rounds never exceeds the initial item count.

use crate::error::{SubsetSumError, SubsetSumResult};
use crate::solver::{solve, Outcome, Policy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Multiset of weights, stored as weight -> remaining count.
///
/// Serialized as a plain `{weight: count}` map. Deserialization goes through
/// [Inventory::from_counts], so zero weights are rejected and zero counts dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<u64, u64>", into = "BTreeMap<u64, u64>")]
pub struct Inventory {
    counts: BTreeMap<u64, u64>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from (weight, count) pairs. Repeated weights accumulate and zero
    /// counts are ignored.
    pub fn from_counts<I: IntoIterator<Item = (u64, u64)>>(counts: I) -> SubsetSumResult<Self> {
        let mut inventory = Self::new();
        for (weight, count) in counts {
            inventory.insert(weight, count)?;
        }
        Ok(inventory)
    }

    /// Add `count` units of `weight`.
    pub fn insert(&mut self, weight: u64, count: u64) -> SubsetSumResult<()> {
        if weight == 0 {
            return Err(SubsetSumError::ZeroWeightInInventory);
        }
        if count > 0 {
            let entry = self.counts.entry(weight).or_default();
            *entry = entry
                .checked_add(count)
                .ok_or(SubsetSumError::CountOverflow { weight })?;
        }
        Ok(())
    }

    pub fn count(&self, weight: u64) -> u64 {
        self.counts.get(&weight).copied().unwrap_or_default()
    }

    /// Total number of units over all weights, saturating at `u64::MAX`.
    pub fn total_items(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |total, &n| total.saturating_add(n))
    }

    /// Sum of all unit weights, saturating at `u64::MAX`.
    pub fn total_weight(&self) -> u64 {
        self.counts
            .iter()
            .fold(0u64, |total, (&w, &n)| total.saturating_add(w.saturating_mul(n)))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// (weight, count) pairs with a positive count, heaviest first.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.counts.iter().rev().map(|(&w, &n)| (w, n))
    }

    /// One entry per unit. Heaviest first if `descending`, lightest first otherwise.
    ///
    /// Fails with [SubsetSumError::InventoryTooLarge] if the units cannot be held in a
    /// single `Vec` on this platform.
    pub fn expand(&self, descending: bool) -> SubsetSumResult<Vec<u64>> {
        let items = self.total_items();
        let len = usize::try_from(items)
            .ok()
            .filter(|&len| len <= isize::MAX as usize / std::mem::size_of::<u64>())
            .ok_or(SubsetSumError::InventoryTooLarge(items))?;
        let mut weights = Vec::with_capacity(len);
        // Every count fits in usize since their sum does.
        for (&w, &n) in self.counts.iter() {
            weights.extend(std::iter::repeat(w).take(n as usize));
        }
        if descending {
            weights.reverse();
        }
        Ok(weights)
    }

    /// Remove one unit per entry of `subset`. Nothing is removed if some weight is short.
    pub fn remove(&mut self, subset: &[u64]) -> SubsetSumResult<()> {
        let mut needed: BTreeMap<u64, u64> = BTreeMap::new();
        for &w in subset {
            *needed.entry(w).or_default() += 1;
        }
        if let Some((&weight, _)) = needed.iter().find(|&(&w, &n)| self.count(w) < n) {
            return Err(SubsetSumError::InventoryUnderflow { weight });
        }
        for (w, n) in needed {
            if let Some(count) = self.counts.get_mut(&w) {
                *count -= n;
                if *count == 0 {
                    self.counts.remove(&w);
                }
            }
        }
        Ok(())
    }
}

impl TryFrom<BTreeMap<u64, u64>> for Inventory {
    type Error = SubsetSumError;

    fn try_from(counts: BTreeMap<u64, u64>) -> SubsetSumResult<Self> {
        Self::from_counts(counts)
    }
}

impl From<Inventory> for BTreeMap<u64, u64> {
    fn from(inventory: Inventory) -> Self {
        inventory.counts
    }
}

impl FromIterator<u64> for Inventory {
    /// Count the units of a weight sequence. Zero weights are skipped.
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut inventory = Self::new();
        for w in iter.into_iter().filter(|&w| w > 0) {
            *inventory.counts.entry(w).or_default() += 1;
        }
        inventory
    }
}

/// One productive allocation round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based round number.
    pub index: usize,
    pub total: u64,
    pub subset: Vec<u64>,
    pub outcome: Outcome,
}

/// Result of running an [Allocator] to completion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub rounds: Vec<Round>,
    /// False if the run stopped at the round limit rather than on an empty round.
    pub exhausted: bool,
}

impl Allocation {
    /// The total of each round, in order.
    pub fn totals(&self) -> Vec<u64> {
        self.rounds.iter().map(|r| r.total).collect()
    }

    /// Units removed from the inventory over all rounds.
    pub fn items_used(&self) -> usize {
        self.rounds.iter().map(|r| r.subset.len()).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Scanning,
    Done,
}

/// Drains an [Inventory] in rounds of subsets nearest to a fixed target.
///
/// Rounds can be pulled one at a time through [Iterator] or all at once with
/// [Allocator::run]. The inventory is updated in place after every round.
#[derive(Debug)]
pub struct Allocator<'a> {
    inventory: &'a mut Inventory,
    target: u64,
    policy: Policy,
    descending: bool,
    max_rounds: Option<usize>,
    rounds: usize,
    exhausted: bool,
    state: State,
}

impl<'a> Allocator<'a> {
    /// Allocator picking the smallest sum `>= target` from descending weights each round.
    pub fn new(inventory: &'a mut Inventory, target: u64) -> Self {
        Self {
            inventory,
            target,
            policy: Policy::AtLeast,
            descending: true,
            max_rounds: None,
            rounds: 0,
            exhausted: false,
            state: State::Scanning,
        }
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Expand the inventory heaviest first (the default) or lightest first.
    pub fn with_descending(mut self, descending: bool) -> Self {
        self.descending = descending;
        self
    }

    /// Stop after at most `max_rounds` productive rounds.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    pub fn inventory(&self) -> &Inventory {
        self.inventory
    }

    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Run one round. Returns `None` once no qualifying subset is left.
    pub fn next_round(&mut self) -> SubsetSumResult<Option<Round>> {
        if self.state == State::Done {
            return Ok(None);
        }
        if self.max_rounds.is_some_and(|max| self.rounds >= max) {
            info!(rounds = self.rounds, "allocation stopped at round limit");
            self.state = State::Done;
            return Ok(None);
        }

        let solution = match self
            .inventory
            .expand(self.descending)
            .and_then(|weights| solve(&weights, self.target, self.policy))
        {
            Ok(solution) => solution,
            Err(e) => {
                self.state = State::Done;
                return Err(e);
            }
        };
        if solution.is_empty() {
            info!(
                rounds = self.rounds,
                remaining_items = self.inventory.total_items(),
                remaining_weight = self.inventory.total_weight(),
                "allocation exhausted"
            );
            self.exhausted = true;
            self.state = State::Done;
            return Ok(None);
        }

        if let Err(e) = self.inventory.remove(&solution.subset) {
            self.state = State::Done;
            return Err(e);
        }
        self.rounds += 1;
        let round = Round {
            index: self.rounds,
            total: solution.total(),
            subset: solution.subset,
            outcome: solution.outcome,
        };
        debug!(
            round = round.index,
            total = round.total,
            items = round.subset.len(),
            "round allocated"
        );
        Ok(Some(round))
    }

    /// Run rounds until the inventory cannot produce another subset.
    pub fn run(mut self) -> SubsetSumResult<Allocation> {
        let mut rounds = Vec::new();
        while let Some(round) = self.next_round()? {
            rounds.push(round);
        }
        Ok(Allocation {
            rounds,
            exhausted: self.exhausted,
        })
    }
}

impl Iterator for Allocator<'_> {
    type Item = SubsetSumResult<Round>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_round().transpose()
    }
}

/// Drain `inventory` with the default [Allocator] and return the total of every round.
pub fn allocate(inventory: &mut Inventory, target: u64) -> SubsetSumResult<Vec<u64>> {
    Allocator::new(inventory, target)
        .run()
        .map(|allocation| allocation.totals())
}
