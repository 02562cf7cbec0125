// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

#![warn(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    rust_2021_compatibility
)]

//! A crate that solves the 0/1 subset-sum nearest-target problem: pick a subset of positive
//! weights, each used at most once, whose sum is the target or as close to it as possible
//! on a chosen side. On top of the solver, [allocator::Allocator] repeatedly drains a
//! finite inventory into target-sized buckets.
//!
//! ```
//! use fastsubset::solver::{solve, Outcome, Policy};
//!
//! let solution = solve(&[7, 6, 5, 2], 10, Policy::AtLeast).unwrap();
//! assert_eq!(solution.subset, vec![6, 5]);
//! assert_eq!(solution.outcome, Outcome::Nearest(11));
//! ```

pub mod allocator;
pub mod display;
pub mod error;
pub mod reachability;
pub mod solver;
pub mod witness;

pub use allocator::{allocate, Allocation, Allocator, Inventory, Round};
pub use error::{SubsetSumError, SubsetSumResult};
pub use reachability::ReachabilityTable;
pub use solver::{at_least, at_most, exact, solve, Outcome, Policy, Solution};

#[cfg(test)]
#[path = "tests/witness_tests.rs"]
pub mod witness_tests;

#[cfg(test)]
#[path = "tests/reachability_tests.rs"]
pub mod reachability_tests;

#[cfg(test)]
#[path = "tests/solver_tests.rs"]
pub mod solver_tests;

#[cfg(test)]
#[path = "tests/allocator_tests.rs"]
pub mod allocator_tests;

#[cfg(test)]
#[path = "tests/display_tests.rs"]
pub mod display_tests;

#[cfg(test)]
#[path = "tests/property_tests.rs"]
pub mod property_tests;
