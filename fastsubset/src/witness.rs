// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Persistent storage for witness subsets.
//!
//! A witness is a cons list of weights: each cell holds the weight added last and a link to
//! the witness it extended. All cells of one scan live in a single [WitnessArena], so
//! extending a witness is a single push and sibling witnesses share their common prefix
//! instead of copying it. Reading a witness back walks the links once.

/// Handle to a witness stored in a [WitnessArena].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WitnessId(usize);

impl WitnessId {
    /// The empty witness. Every arena starts with it.
    pub const EMPTY: WitnessId = WitnessId(0);

    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cell {
    weight: u64,
    parent: WitnessId,
}

/// Append-only arena of witness cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WitnessArena {
    cells: Vec<Cell>,
}

impl Default for WitnessArena {
    fn default() -> Self {
        Self::new()
    }
}

impl WitnessArena {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an arena expecting about `capacity` extensions.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut cells = Vec::with_capacity(capacity.saturating_add(1));
        // Root cell backing the empty witness. Its fields are never read.
        cells.push(Cell {
            weight: 0,
            parent: WitnessId::EMPTY,
        });
        Self { cells }
    }

    /// Return a new witness equal to `base` followed by `weight`. `base` is left untouched.
    pub fn extend(&mut self, base: WitnessId, weight: u64) -> WitnessId {
        debug_assert!(base.0 < self.cells.len());
        self.cells.push(Cell {
            weight,
            parent: base,
        });
        WitnessId(self.cells.len() - 1)
    }

    /// Iterate over the weights of `id`, most recently added first.
    pub fn iter(&self, id: WitnessId) -> Iter<'_> {
        Iter {
            arena: self,
            current: id,
        }
    }

    /// The weights of `id` in the order they were added.
    pub fn to_vec(&self, id: WitnessId) -> Vec<u64> {
        let mut weights: Vec<u64> = self.iter(id).collect();
        weights.reverse();
        weights
    }

    pub fn sum(&self, id: WitnessId) -> u64 {
        self.iter(id).sum()
    }

    /// Number of weights in the witness `id`.
    pub fn depth(&self, id: WitnessId) -> usize {
        self.iter(id).count()
    }

    /// Number of cells allocated so far, not counting the root.
    pub fn len(&self) -> usize {
        self.cells.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Iterator over a witness, from the last added weight back to the first.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    arena: &'a WitnessArena,
    current: WitnessId,
}

impl Iterator for Iter<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.current.is_empty() {
            return None;
        }
        let cell = self.arena.cells[self.current.0];
        self.current = cell.parent;
        Some(cell.weight)
    }
}
