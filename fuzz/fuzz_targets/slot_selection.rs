// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for slot assembly.
//!
//! A result must never repeat an id across slots, must keep non-fallback picks
//! inside their slot's tiers, and must fill a slot whenever any-tier fallback
//! has an unused entry to offer.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scout::testing::make_entry;
use scout::{Assembler, EngineConfig, FallbackPolicy, LayoutKind, Tier};
use std::collections::HashSet;

#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzEntry {
    tier: u8,
    rating: u8,
    labels: Vec<u8>,
}

#[derive(Debug, arbitrary::Arbitrary)]
struct SelectionInput {
    query_words: Vec<u8>,
    entries: Vec<FuzzEntry>,
    strict: bool,
    tiered: bool,
}

const WORDS: &[&str] = &[
    "route", "trip", "travel", "plan", "budget", "map", "delivery", "itinerary",
];

fuzz_target!(|input: SelectionInput| {
    let query: Vec<&str> = input
        .query_words
        .iter()
        .take(6)
        .map(|&w| WORDS[w as usize % WORDS.len()])
        .collect();
    let query = query.join(" ");

    let catalog: Vec<_> = input
        .entries
        .iter()
        .take(32)
        .enumerate()
        .map(|(i, e)| {
            let labels: Vec<&str> = e
                .labels
                .iter()
                .take(4)
                .map(|&w| WORDS[w as usize % WORDS.len()])
                .collect();
            make_entry(
                &format!("tool-{}", i),
                Tier::ALL[e.tier as usize % Tier::ALL.len()],
                f64::from(e.rating % 51) / 10.0,
                &labels[..labels.len() / 2],
                &labels[labels.len() / 2..],
            )
        })
        .collect();

    let config = EngineConfig {
        fallback: if input.strict { FallbackPolicy::Strict } else { FallbackPolicy::AnyTier },
        layout: if input.tiered { LayoutKind::Tiered } else { LayoutKind::ThreeSlot },
        ..EngineConfig::default()
    };
    let assembler = Assembler::new(config);
    let selection = match assembler.assemble(&query, &catalog) {
        Ok(selection) => selection,
        Err(err) => panic!("Rating-order policy must not fail: {}", err),
    };

    // INVARIANT 1: Distinct ids
    let mut seen = HashSet::new();
    for entry in selection.entries() {
        assert!(seen.insert(&entry.id), "Id {} selected twice", entry.id);
    }

    // INVARIANT 2: Non-fallback picks stay in their tiers
    for (pick, spec) in selection.picks.iter().zip(assembler.layout().slots()) {
        if let (Some(entry), false) = (pick.entry, pick.fallback) {
            assert!(
                spec.tiers.contains(&entry.tier),
                "{} ({}) placed in slot {}",
                entry.id,
                entry.tier,
                pick.slot
            );
        }
        if input.strict {
            assert!(!pick.fallback, "Strict policy produced a fallback pick");
        }
    }

    // INVARIANT 3: Any-tier fills as long as entries remain
    if !input.strict {
        assert_eq!(
            selection.entries().count(),
            catalog.len().min(selection.picks.len()),
            "Slot left empty while entries were unused"
        );
    }

    // INVARIANT 4: Serializable
    assert!(serde_json::to_string(&selection).is_ok());
});
