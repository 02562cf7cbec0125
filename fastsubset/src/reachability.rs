// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The 0/1 subset-sum reachability table.
//!
//! For a target `T`, [ReachabilityTable::build] scans the weights once, item by item, and
//! records for every sum `s` in `0..=T` the first subset found that adds up to exactly `s`.
//! The inner loop walks the sums downwards so a cell written for the current weight is
//! never read again while that weight is processed, which keeps every weight used at most
//! once per witness. Cells are write-once: the first witness reaching a sum is kept.

use crate::display::TableDisplay;
use crate::error::{SubsetSumError, SubsetSumResult};
use crate::witness::{WitnessArena, WitnessId};
use tracing::trace;

/// Hook into a scan, called for every candidate sum as it is discovered.
pub(crate) trait ScanObserver {
    /// `sum <= target` was reached for the first time; its witness is `id`.
    fn reached(&mut self, sum: u64, id: WitnessId);

    /// `sum > target` is reachable as the witness `base` followed by `weight`. Such sums are
    /// not stored in the table.
    fn overshoot(&mut self, sum: u64, base: WitnessId, weight: u64);
}

impl ScanObserver for () {
    fn reached(&mut self, _sum: u64, _id: WitnessId) {}

    fn overshoot(&mut self, _sum: u64, _base: WitnessId, _weight: u64) {}
}

/// Check that every weight is positive.
pub(crate) fn validate_weights(weights: &[u64]) -> SubsetSumResult<()> {
    match weights.iter().position(|&w| w == 0) {
        Some(index) => Err(SubsetSumError::ZeroWeight { index }),
        None => Ok(()),
    }
}

/// Number of cells needed for `target`, or an error if it cannot be allocated.
pub(crate) fn table_len(target: u64) -> SubsetSumResult<usize> {
    usize::try_from(target)
        .ok()
        .and_then(|t| t.checked_add(1))
        .filter(|&len| len <= isize::MAX as usize / std::mem::size_of::<Option<WitnessId>>())
        .ok_or(SubsetSumError::TargetTooLarge(target))
}

/// Sums reachable by a subset of the weights, each with a witness.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReachabilityTable {
    target: u64,
    cells: Vec<Option<WitnessId>>,
    arena: WitnessArena,
}

impl ReachabilityTable {
    /// Build the table of all sums in `0..=target` reachable by the given weights.
    pub fn build(weights: &[u64], target: u64) -> SubsetSumResult<Self> {
        Self::build_with(weights, target, &mut ())
    }

    pub(crate) fn build_with<O: ScanObserver>(
        weights: &[u64],
        target: u64,
        observer: &mut O,
    ) -> SubsetSumResult<Self> {
        validate_weights(weights)?;
        let len = table_len(target)?;

        let mut cells = vec![None; len];
        cells[0] = Some(WitnessId::EMPTY);
        let mut table = Self {
            target,
            cells,
            arena: WitnessArena::new(),
        };
        for &w in weights {
            table.apply(w, observer);
        }

        trace!(
            target,
            weights = weights.len(),
            reached = table.reached_count(),
            cells = table.arena.len(),
            "reachability scan done"
        );
        Ok(table)
    }

    fn apply<O: ScanObserver>(&mut self, w: u64, observer: &mut O) {
        for i in (0..self.cells.len() - 1).rev() {
            let Some(base) = self.cells[i] else {
                continue;
            };
            // A sum that overflows u64 is neither storable nor a useful overshoot.
            let Some(sum) = (i as u64).checked_add(w) else {
                continue;
            };
            if sum > self.target {
                observer.overshoot(sum, base, w);
                continue;
            }
            let cell = &mut self.cells[sum as usize];
            if cell.is_none() {
                let id = self.arena.extend(base, w);
                *cell = Some(id);
                observer.reached(sum, id);
            }
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn is_reached(&self, sum: u64) -> bool {
        self.id(sum).is_some()
    }

    /// The witness recorded for `sum`, in the order its weights were added.
    pub fn witness(&self, sum: u64) -> Option<Vec<u64>> {
        self.id(sum).map(|id| self.arena.to_vec(id))
    }

    /// All reached sums in increasing order. Always starts with 0.
    pub fn reached_sums(&self) -> impl Iterator<Item = u64> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_some())
            .map(|(sum, _)| sum as u64)
    }

    pub fn reached_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// The largest reached sum not above the target.
    pub fn max_reached(&self) -> u64 {
        self.cells
            .iter()
            .rposition(Option::is_some)
            .unwrap_or_default() as u64
    }

    pub fn arena(&self) -> &WitnessArena {
        &self.arena
    }

    pub(crate) fn id(&self, sum: u64) -> Option<WitnessId> {
        usize::try_from(sum)
            .ok()
            .and_then(|s| self.cells.get(s).copied().flatten())
    }

    /// Render every reached sum with its witness, one per line.
    pub fn display(&self) -> TableDisplay<'_> {
        TableDisplay(self)
    }
}
