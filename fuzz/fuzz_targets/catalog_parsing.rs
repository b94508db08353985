// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for catalog parsing.
//!
//! Arbitrary bytes must either load into a valid catalog or be rejected with an
//! error. A catalog that loads has unique non-empty ids and in-range ratings,
//! and recommending from it never panics.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scout::{recommend, Catalog};
use std::collections::HashSet;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(catalog) = Catalog::from_json_str(json) else {
        return;
    };

    let mut ids = HashSet::new();
    for entry in catalog.entries() {
        assert!(!entry.id.trim().is_empty(), "Empty id accepted");
        assert!(ids.insert(entry.id.as_str()), "Duplicate id {} accepted", entry.id);
        assert!((0.0..=5.0).contains(&entry.rating), "Rating {} accepted", entry.rating);
    }

    // Same bytes, same fingerprint.
    if let Ok(again) = Catalog::from_json_str(json) {
        assert_eq!(catalog.fingerprint(), again.fingerprint());
    }

    assert!(recommend("route trip", catalog.entries()).is_ok());
});
