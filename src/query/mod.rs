// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query module - search and weight inspection commands

pub mod search;
pub mod weights;
