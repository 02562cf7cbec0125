// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Human readable rendering of subsets, inventories and tables.

use crate::allocator::Inventory;
use crate::reachability::ReachabilityTable;
use crate::solver::Outcome;
use core::fmt;
use itertools::Itertools;

/// Run-length rendering of a weight sequence, e.g. `[[20; 2], [10; 1]]`.
#[derive(Debug, Clone, Copy)]
pub struct CompactDisplay<'a>(pub &'a [u64]);

impl fmt::Display for CompactDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (count, weight)) in self.0.iter().dedup_with_count().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[{weight}; {count}]")?;
        }
        write!(f, "]")
    }
}

/// A subset followed by its total, e.g. `2, 3, 5 (= 10)`.
#[derive(Debug, Clone, Copy)]
pub struct SubsetDisplay<'a>(pub &'a [u64]);

impl fmt::Display for SubsetDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(empty)");
        }
        write!(
            f,
            "{} (= {})",
            self.0.iter().join(", "),
            self.0.iter().sum::<u64>()
        )
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.iter().map(|(w, n)| format!("{w}: {n}")).join(", ")
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Exact => write!(f, "exact"),
            Outcome::Nearest(sum) => write!(f, "nearest {sum}"),
            Outcome::NoneReachable => write!(f, "none reachable"),
        }
    }
}

/// Every reached sum of a [ReachabilityTable] with its witness, one per line.
#[derive(Debug, Clone, Copy)]
pub struct TableDisplay<'a>(pub &'a ReachabilityTable);

impl fmt::Display for TableDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.0;
        let width = table.target().to_string().len();
        for sum in table.reached_sums() {
            let witness = table.witness(sum).unwrap_or_default();
            writeln!(f, "{sum:>width$}: [{}]", witness.iter().join(", "))?;
        }
        Ok(())
    }
}
