// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for score calculation invariants.
//!
//! Scores must be finite, non-negative and deterministic for any query and any
//! entry labels, and a query that normalizes to nothing scores 0.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scout::testing::make_entry;
use scout::{normalize, score, Tier, MAX_TIEBREAK};

#[derive(Debug, arbitrary::Arbitrary)]
struct ScoreInput {
    query: String,
    categories: Vec<String>,
    keywords: Vec<String>,
    /// Tenths of a star, reduced into 0..=50.
    rating: u8,
}

fuzz_target!(|input: ScoreInput| {
    let query = &input.query[..floor_char_boundary(&input.query, 200)];
    let categories: Vec<&str> = input.categories.iter().take(8).map(String::as_str).collect();
    let keywords: Vec<&str> = input.keywords.iter().take(16).map(String::as_str).collect();
    let rating = f64::from(input.rating % 51) / 10.0;

    let entry = make_entry("fuzz", Tier::Free, rating, &categories, &keywords);
    let first = score(query, &entry);
    let second = score(query, &entry);

    // INVARIANT 1: Deterministic
    assert_eq!(first.to_bits(), second.to_bits(), "Score changed between calls");

    // INVARIANT 2: Finite and non-negative
    assert!(first.is_finite(), "Score {} is not finite", first);
    assert!(first >= 0.0, "Score {} is negative", first);

    // INVARIANT 3: Nothing to match scores 0
    if normalize(query).is_empty() {
        assert_eq!(first, 0.0, "Empty normalized query scored {}", first);
    }

    // INVARIANT 4: Without labels only the tie-break remains
    let bare = make_entry("bare", Tier::Free, rating, &[], &[]);
    assert!(score(query, &bare) <= MAX_TIEBREAK);
});

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}
