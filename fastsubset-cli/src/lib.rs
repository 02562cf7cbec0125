// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Input parsing shared by the subset-cli tool.

pub mod input;
