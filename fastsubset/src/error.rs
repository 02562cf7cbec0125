// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Collection of errors to be used in fastsubset.
//!
//! Functions validate their arguments up front and return an indicative error before any
//! table is allocated. Once a scan has started it cannot fail: an unreachable target is
//! reported through [crate::solver::Outcome], never through [SubsetSumError].

use thiserror::Error;

pub type SubsetSumResult<T> = Result<T, SubsetSumError>;

/// Collection of errors to be used in fastsubset.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SubsetSumError {
    /// A weight of zero was found in the input sequence.
    #[error("Weight at position {index} is zero, weights must be positive")]
    ZeroWeight { index: usize },

    /// An inventory entry was keyed by a zero weight.
    #[error("Inventory weights must be positive")]
    ZeroWeightInInventory,

    /// The target does not fit in a table indexable on this platform.
    #[error("Target {0} is too large for a reachability table")]
    TargetTooLarge(u64),

    /// A subset referenced more units of a weight than the inventory holds.
    #[error("Inventory holds no remaining unit of weight {weight}")]
    InventoryUnderflow { weight: u64 },

    /// Adding units would overflow the count held for a weight.
    #[error("Inventory count of weight {weight} overflows")]
    CountOverflow { weight: u64 },

    /// The inventory holds more units than fit in a weight sequence on this platform.
    #[error("Inventory of {0} units is too large to expand")]
    InventoryTooLarge(u64),
}
