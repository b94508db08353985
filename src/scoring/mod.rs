// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how tools get their numbers.
//!
//! Match weights dominate, rating only breaks ties. A tool that matches one
//! more keyword beats a better-rated tool that doesn't, every time.

mod core;
pub mod ranking;

pub use core::*;
